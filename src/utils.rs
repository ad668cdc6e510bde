/// Utility functions for frame input and human-readable output
use time::{format_description, OffsetDateTime};

use crate::config::DecoderConfig;
use crate::models::{DecodedFrame, RawFrame, SensitMeasurement, SensitReading, WisolReading};

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    match format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]") {
        Ok(format) => dt.format(&format).unwrap_or_else(|_| dt.to_string()),
        Err(_) => dt.to_string(),
    }
}

/// Turn one input line into a frame
///
/// A line starting with `{` is a JSON frame as posted by the network
/// backend; anything else is a bare hex payload. Bare payloads get the
/// configured device id.
pub fn parse_frame_line(line: &str, config: &DecoderConfig) -> Result<RawFrame, serde_json::Error> {
    let line = line.trim();
    if line.starts_with('{') {
        return serde_json::from_str(line);
    }

    let mut frame = RawFrame::from_hex(line);
    if let Some(device_id) = &config.device_id {
        frame.sigfox_id = device_id.clone();
    }
    Ok(frame)
}

/// Short description of where a frame came from, for log lines.
pub fn describe_source(frame: &RawFrame) -> String {
    let mut parts = vec![format!("data={}", frame.data)];
    if !frame.sigfox_id.is_empty() {
        parts.push(format!("device={}", frame.sigfox_id));
    }
    if let Some(received) = frame.received_at() {
        parts.push(format!("received {}", format_datetime(&received)));
    }
    if !frame.station.is_empty() {
        parts.push(format!("station={} rssi={:.1}", frame.station, frame.rssi));
    }
    parts.join(", ")
}

fn hemisphere(positive: bool, yes: char, no: char) -> char {
    if positive {
        yes
    } else {
        no
    }
}

fn wisol_summary(reading: &WisolReading) -> Vec<String> {
    let position = &reading.position;
    vec![
        format!("GPS frame #{}", position.frame_number),
        format!(
            "  {}: {}  {}: {}",
            hemisphere(position.is_north, 'N', 'S'),
            reading.latitude_dms,
            hemisphere(position.is_east, 'E', 'W'),
            reading.longitude_dms
        ),
        format!(
            "  Lat: {:.6}  Lng: {:.6}",
            position.latitude, position.longitude
        ),
        format!("  Temperature: {:.2}°C", reading.temperature_celsius),
        format!(
            "  Status: {}",
            if reading.status { "active" } else { "void" }
        ),
    ]
}

fn sensit_summary(reading: &SensitReading) -> Vec<String> {
    let mut lines = vec![
        format!("Sensit frame {:08x}", reading.raw),
        format!(
            "  Mode {}: {}  Event type {}: {}  Timeframe {}: {}",
            reading.mode.code(),
            reading.mode_label(),
            reading.event_type.code(),
            reading.event_label(),
            reading.timeframe.code(),
            reading.timeframe_label()
        ),
        format!("  Battery: {:.2} V", reading.battery_volts),
    ];
    if reading.low_battery {
        lines.push("  Low battery".to_string());
    }

    match &reading.measurement {
        SensitMeasurement::Button {
            temperature_celsius,
            firmware_version,
            ..
        } => {
            lines.push(format!("  Firmware: v{}", firmware_version));
            lines.push(format!("  Temperature: {:.3}°C", temperature_celsius));
        }
        SensitMeasurement::TemperatureHumidity {
            temperature_celsius,
            humidity_percent,
            ..
        } => {
            lines.push(format!("  Humidity: {:.1}% RH", humidity_percent));
            lines.push(format!("  Temperature: {:.3}°C", temperature_celsius));
        }
        SensitMeasurement::Light {
            light_lux,
            alert_count,
        } => {
            lines.push(format!("  Light: {:.2} lux", light_lux));
            lines.push(format!("  Number of alerts: {}", alert_count));
        }
        SensitMeasurement::Door { alert_count }
        | SensitMeasurement::Move { alert_count }
        | SensitMeasurement::ReedSwitch { alert_count } => {
            lines.push(format!("  Number of alerts: {}", alert_count));
        }
        SensitMeasurement::Unrecognized => {}
    }

    if reading.reed_switch_on() == Some(true) {
        lines.push("  Reed switch on".to_string());
    }
    for warning in &reading.warnings {
        lines.push(format!("  Warning: {}", warning));
    }
    lines
}

/// Summary lines for a decoded frame, one value per line
pub fn summarize(frame: &DecodedFrame) -> Vec<String> {
    match frame {
        DecodedFrame::Wisol(reading) => wisol_summary(reading),
        DecodedFrame::Sensit(reading) => sensit_summary(reading),
    }
}
