use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::decoder::tables::{EventType, Mode, Timeframe};
use crate::error::DecodeWarning;

/// One uplink message as delivered by the radio network backend.
///
/// Only `data` is needed to decode; the rest is carried through for the
/// caller and never validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFrame {
    pub id: String,
    pub sigfox_id: String,
    pub frame_number: u32,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    pub station: String,
    pub snr: f64,
    pub avg_snr: f64,
    pub rssi: f64,
    pub mes_type: u8,
    /// Hex-encoded payload
    pub data: String,
}

impl RawFrame {
    pub fn from_hex(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Reception time, if the backend supplied one.
    pub fn received_at(&self) -> Option<OffsetDateTime> {
        if self.timestamp == 0 {
            return None;
        }
        OffsetDateTime::from_unix_timestamp(self.timestamp).ok()
    }
}

/// Degrees, minutes and seconds of one coordinate as sent by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DmsAngle {
    pub degrees: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl DmsAngle {
    /// Decimal degrees. Always non-negative.
    pub fn to_decimal(&self) -> f64 {
        f64::from(self.degrees) + f64::from(self.minutes) / 60.0 + f64::from(self.seconds) / 3600.0
    }
}

impl fmt::Display for DmsAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° {}m {}s", self.degrees, self.minutes, self.seconds)
    }
}

/// Decoded device location. Latitude and longitude are unsigned magnitudes,
/// the hemisphere lives in `is_north` / `is_east`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub is_north: bool,
    pub is_east: bool,
    pub frame_number: u32,
    pub is_gps: bool,
    pub is_wifi: bool,
    pub is_spot_it: bool,
}

impl GeoPosition {
    /// Latitude with south as negative.
    pub fn signed_latitude(&self) -> f64 {
        if self.is_north {
            self.latitude
        } else {
            -self.latitude
        }
    }

    /// Longitude with west as negative.
    pub fn signed_longitude(&self) -> f64 {
        if self.is_east {
            self.longitude
        } else {
            -self.longitude
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WisolReading {
    pub position: GeoPosition,
    pub latitude_dms: DmsAngle,
    pub longitude_dms: DmsAngle,
    pub temperature_celsius: f64,
    pub status: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Mode-specific part of a Sensit frame. Each variant carries only the
/// fields its mode actually encodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SensitMeasurement {
    #[serde(rename_all = "camelCase")]
    Button {
        temperature_celsius: f32,
        reed_switch_on: bool,
        firmware_version: FirmwareVersion,
    },
    #[serde(rename_all = "camelCase")]
    TemperatureHumidity {
        temperature_celsius: f32,
        humidity_percent: f64,
        reed_switch_on: bool,
    },
    #[serde(rename_all = "camelCase")]
    Light { light_lux: f32, alert_count: i64 },
    #[serde(rename_all = "camelCase")]
    Door { alert_count: i64 },
    #[serde(rename_all = "camelCase")]
    Move { alert_count: i64 },
    #[serde(rename_all = "camelCase")]
    ReedSwitch { alert_count: i64 },
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitReading {
    /// The frame as one big-endian word
    pub raw: u32,
    pub mode: Mode,
    pub event_type: EventType,
    pub timeframe: Timeframe,
    /// 5-bit battery code
    pub battery_raw: u8,
    pub battery_volts: f32,
    pub low_battery: bool,
    pub measurement: SensitMeasurement,
    pub warnings: Vec<DecodeWarning>,
}

impl SensitReading {
    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn event_label(&self) -> &'static str {
        self.event_type.label()
    }

    pub fn timeframe_label(&self) -> &'static str {
        self.timeframe.label()
    }

    pub fn temperature_celsius(&self) -> Option<f32> {
        match self.measurement {
            SensitMeasurement::Button {
                temperature_celsius,
                ..
            }
            | SensitMeasurement::TemperatureHumidity {
                temperature_celsius,
                ..
            } => Some(temperature_celsius),
            _ => None,
        }
    }

    pub fn humidity_percent(&self) -> Option<f64> {
        match self.measurement {
            SensitMeasurement::TemperatureHumidity {
                humidity_percent, ..
            } => Some(humidity_percent),
            _ => None,
        }
    }

    pub fn light_lux(&self) -> Option<f32> {
        match self.measurement {
            SensitMeasurement::Light { light_lux, .. } => Some(light_lux),
            _ => None,
        }
    }

    pub fn reed_switch_on(&self) -> Option<bool> {
        match self.measurement {
            SensitMeasurement::Button { reed_switch_on, .. }
            | SensitMeasurement::TemperatureHumidity { reed_switch_on, .. } => Some(reed_switch_on),
            _ => None,
        }
    }

    pub fn alert_count(&self) -> Option<i64> {
        match self.measurement {
            SensitMeasurement::Light { alert_count, .. }
            | SensitMeasurement::Door { alert_count }
            | SensitMeasurement::Move { alert_count }
            | SensitMeasurement::ReedSwitch { alert_count } => Some(alert_count),
            _ => None,
        }
    }

    pub fn firmware_version(&self) -> Option<String> {
        match self.measurement {
            SensitMeasurement::Button {
                firmware_version, ..
            } => Some(firmware_version.to_string()),
            _ => None,
        }
    }
}

/// A decoded frame from either device family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "device", rename_all = "camelCase")]
pub enum DecodedFrame {
    Wisol(WisolReading),
    Sensit(SensitReading),
}
