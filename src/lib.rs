//! Decoders for Sigfox uplink payloads from Wisol GPS trackers and Sensit
//! multi-sensors.
//!
//! Decoding is pure and synchronous: a hex payload goes in, a typed reading
//! or a [`DecodeError`] comes out.

pub mod config;
pub mod decoder;
pub mod error;
pub mod models;
pub mod utils;

pub use decoder::tables::{EventType, Mode, Timeframe};
pub use decoder::{decode_raw_frame, decode_sensit_frame, decode_wisol_frame, FrameKind};
pub use error::{DecodeError, DecodeResult, DecodeWarning, FrameFault};
pub use models::{
    DecodedFrame, DmsAngle, FirmwareVersion, GeoPosition, RawFrame, SensitMeasurement,
    SensitReading, WisolReading,
};
