/// Code tables for the Sensit header fields
///
/// Each table is closed: codes outside it decode to an `Unrecognized`
/// variant with its own "unknown" label.
use serde::Serialize;

use crate::error::DecodeWarning;

pub const UNKNOWN_LABEL: &str = "unknown";

/// Operating mode, bits [5,8) of a Sensit frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mode {
    Button,
    TemperatureHumidity,
    Light,
    Door,
    Move,
    ReedSwitch,
    Unrecognized(u8),
}

impl Mode {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Mode::Button,
            1 => Mode::TemperatureHumidity,
            2 => Mode::Light,
            3 => Mode::Door,
            4 => Mode::Move,
            5 => Mode::ReedSwitch,
            other => Mode::Unrecognized(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Mode::Button => 0,
            Mode::TemperatureHumidity => 1,
            Mode::Light => 2,
            Mode::Door => 3,
            Mode::Move => 4,
            Mode::ReedSwitch => 5,
            Mode::Unrecognized(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Button => "Button",
            Mode::TemperatureHumidity => "Temperature + Humidity",
            Mode::Light => "Light",
            Mode::Door => "Door",
            Mode::Move => "Move",
            Mode::ReedSwitch => "Reed switch",
            Mode::Unrecognized(_) => UNKNOWN_LABEL,
        }
    }

    /// Modes whose byte 3 carries the low temperature bits and the reed
    /// switch state.
    pub fn has_fine_temperature(&self) -> bool {
        matches!(self, Mode::Button | Mode::TemperatureHumidity)
    }

    pub fn warning(&self) -> Option<DecodeWarning> {
        match self {
            Mode::Unrecognized(code) => Some(DecodeWarning::UnrecognizedMode(*code)),
            _ => None,
        }
    }
}

/// Reporting interval, bits [3,5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Timeframe {
    TenMinutes,
    OneHour,
    SixHours,
    TwentyFourHours,
    Unrecognized(u8),
}

impl Timeframe {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Timeframe::TenMinutes,
            1 => Timeframe::OneHour,
            2 => Timeframe::SixHours,
            3 => Timeframe::TwentyFourHours,
            other => Timeframe::Unrecognized(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Timeframe::TenMinutes => 0,
            Timeframe::OneHour => 1,
            Timeframe::SixHours => 2,
            Timeframe::TwentyFourHours => 3,
            Timeframe::Unrecognized(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::TenMinutes => "10 mins",
            Timeframe::OneHour => "1 hour",
            Timeframe::SixHours => "6 hours",
            Timeframe::TwentyFourHours => "24 hours",
            Timeframe::Unrecognized(_) => UNKNOWN_LABEL,
        }
    }

    pub fn warning(&self) -> Option<DecodeWarning> {
        match self {
            Timeframe::Unrecognized(code) => Some(DecodeWarning::UnrecognizedTimeframe(*code)),
            _ => None,
        }
    }
}

/// Why the frame was sent, bits [1,3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventType {
    Regular,
    ButtonCall,
    Alert,
    NewMode,
    Unrecognized(u8),
}

impl EventType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => EventType::Regular,
            1 => EventType::ButtonCall,
            2 => EventType::Alert,
            3 => EventType::NewMode,
            other => EventType::Unrecognized(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            EventType::Regular => 0,
            EventType::ButtonCall => 1,
            EventType::Alert => 2,
            EventType::NewMode => 3,
            EventType::Unrecognized(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventType::Regular => "Regular, no alert",
            EventType::ButtonCall => "Button call",
            EventType::Alert => "Alert",
            EventType::NewMode => "New mode",
            EventType::Unrecognized(_) => UNKNOWN_LABEL,
        }
    }

    pub fn warning(&self) -> Option<DecodeWarning> {
        match self {
            EventType::Unrecognized(code) => Some(DecodeWarning::UnrecognizedEventType(*code)),
            _ => None,
        }
    }
}
