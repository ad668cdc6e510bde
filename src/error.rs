/// Error and warning types produced while decoding frames
use serde::Serialize;
use thiserror::Error;

pub type DecodeResult<T> = Result<T, DecodeError>;

/// A frame that could not be decoded at all.
///
/// No partial reading is ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed frame: {0}")]
    MalformedFrame(#[from] FrameFault),
}

/// Reason a payload was rejected as malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameFault {
    #[error("payload is empty")]
    Empty,

    #[error("payload has an odd number of hex digits ({len})")]
    OddLength { len: usize },

    #[error("invalid hex character {character:?} at position {index}")]
    InvalidHexCharacter { character: char, index: usize },

    #[error("payload too short: need {needed} bytes, got {available}")]
    TooShort { needed: usize, available: usize },

    #[error("payload too long: at most {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("bit range [{start}, {end}) outside a {available}-bit payload")]
    BitRangeOutOfBounds {
        start: usize,
        end: usize,
        available: usize,
    },

    #[error("byte {index} ({text:?}) is not a two-digit decimal number")]
    NotDecimal { index: usize, text: String },
}

/// Decodable but unexpected content. The reading is still produced, with an
/// "unknown" label in place of the unrecognized code.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeWarning {
    #[error("unrecognized mode code {0}")]
    UnrecognizedMode(u8),

    #[error("unrecognized event type code {0}")]
    UnrecognizedEventType(u8),

    #[error("unrecognized timeframe code {0}")]
    UnrecognizedTimeframe(u8),
}
