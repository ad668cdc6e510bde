pub mod bits;
pub mod sensit;
pub mod tables;
pub mod wisol;

pub use sensit::decode_sensit_frame;
pub use wisol::decode_wisol_frame;

use crate::error::DecodeResult;
use crate::models::{DecodedFrame, RawFrame};

/// Payloads up to this many hex digits come from Sensit devices
pub const SENSIT_MAX_HEX_LEN: usize = 8;

/// Device family a payload is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Sensit,
    Wisol,
}

impl FrameKind {
    /// Route by payload length: short frames are Sensit, longer are Wisol.
    pub fn classify(hex: &str) -> Self {
        if hex.len() <= SENSIT_MAX_HEX_LEN {
            FrameKind::Sensit
        } else {
            FrameKind::Wisol
        }
    }
}

/// Decode a frame with the decoder its payload length selects.
pub fn decode_raw_frame(frame: &RawFrame) -> DecodeResult<DecodedFrame> {
    let data = frame.data.trim();
    match FrameKind::classify(data) {
        FrameKind::Sensit => decode_sensit_frame(data).map(DecodedFrame::Sensit),
        FrameKind::Wisol => decode_wisol_frame(data, frame.frame_number).map(DecodedFrame::Wisol),
    }
}
