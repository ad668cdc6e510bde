/// Sensit multi-sensor frame decoding
///
/// The 4-byte payload is one big-endian word, bits numbered from the MSB:
/// - Bit 0: Battery MSB
/// - Bits 1-2: Event type
/// - Bits 3-4: Timeframe
/// - Bits 5-7: Mode
/// - Bits 8-11: Temperature MSB
/// - Bits 12-15: Battery LSB
/// - Bit 17: Reed switch (Button, Temperature + Humidity) or light multiplier (Light)
/// - Bits 18-23: Temperature LSB (Button, Temperature + Humidity) or light level (Light)
/// - Bits 24-31: Mode-specific tail
use log::{debug, warn};

use crate::decoder::bits::{parse_hex, BitReader};
use crate::decoder::tables::{EventType, Mode, Timeframe};
use crate::error::{DecodeResult, FrameFault};
use crate::models::{FirmwareVersion, SensitMeasurement, SensitReading};

pub const SENSIT_FRAME_LEN: usize = 4;

/// Volts per battery code step
const BATTERY_SCALE: f32 = 0.05 * 2.7;
/// Codes below this have the battery MSB clear, under 2.16 V
const LOW_BATTERY_CODE: u8 = 16;
const TEMPERATURE_OFFSET: f32 = 200.0;
const TEMPERATURE_DIVISOR: f32 = 8.0;
const HUMIDITY_SCALE: f64 = 0.5;
const LIGHT_SCALE: f32 = 0.01;
const LIGHT_MULTIPLIER: f32 = 8.0;

fn temperature_from_raw(raw: u32) -> f32 {
    (raw as f32 - TEMPERATURE_OFFSET) / TEMPERATURE_DIVISOR
}

/// Decode the mode-specific fields. `temperature_msb` is the 4-bit value
/// from byte 2.
fn decode_measurement(
    mode: Mode,
    bits: &BitReader<'_>,
    temperature_msb: u32,
) -> DecodeResult<SensitMeasurement> {
    let measurement = match mode {
        Mode::Button | Mode::TemperatureHumidity => {
            let temperature_lsb = bits.read(18, 24)?;
            let temperature_celsius = temperature_from_raw((temperature_msb << 6) | temperature_lsb);
            let reed_switch_on = bits.flag(17)?;

            if mode == Mode::Button {
                SensitMeasurement::Button {
                    temperature_celsius,
                    reed_switch_on,
                    firmware_version: FirmwareVersion {
                        major: bits.read_u8(24, 28)?,
                        minor: bits.read_u8(28, 32)?,
                    },
                }
            } else {
                SensitMeasurement::TemperatureHumidity {
                    temperature_celsius,
                    humidity_percent: f64::from(bits.read(24, 32)?) * HUMIDITY_SCALE,
                    reed_switch_on,
                }
            }
        }
        Mode::Light => {
            let mut light_lux = bits.read(18, 24)? as f32 * LIGHT_SCALE;
            if bits.flag(17)? {
                light_lux *= LIGHT_MULTIPLIER;
            }
            SensitMeasurement::Light {
                light_lux,
                alert_count: i64::from(bits.read(24, 32)?),
            }
        }
        Mode::Door => SensitMeasurement::Door {
            alert_count: i64::from(bits.read(24, 32)?),
        },
        Mode::Move => SensitMeasurement::Move {
            alert_count: i64::from(bits.read(24, 32)?),
        },
        Mode::ReedSwitch => SensitMeasurement::ReedSwitch {
            alert_count: i64::from(bits.read(24, 32)?),
        },
        Mode::Unrecognized(_) => {
            debug!(
                "Coarse temperature for unrecognized mode: {:.3}°C",
                temperature_from_raw(temperature_msb)
            );
            SensitMeasurement::Unrecognized
        }
    };
    Ok(measurement)
}

/// Decode a Sensit frame
///
/// # Arguments
/// * `hex` - Hex-encoded 4-byte payload
///
/// # Returns
/// The decoded reading, or `MalformedFrame` if the payload is not exactly
/// four bytes of hex. Unrecognized codes do not fail the decode; they are
/// reported in `SensitReading::warnings`.
pub fn decode_sensit_frame(hex: &str) -> DecodeResult<SensitReading> {
    let bytes = parse_hex(hex)?;
    if bytes.len() < SENSIT_FRAME_LEN {
        return Err(FrameFault::TooShort {
            needed: SENSIT_FRAME_LEN,
            available: bytes.len(),
        }
        .into());
    }
    if bytes.len() > SENSIT_FRAME_LEN {
        return Err(FrameFault::TooLong {
            max: SENSIT_FRAME_LEN,
            actual: bytes.len(),
        }
        .into());
    }

    let bits = BitReader::new(&bytes);
    let raw = bits.read(0, 32)?;

    // Byte 1
    let mode = Mode::from_code(bits.read_u8(5, 8)?);
    let timeframe = Timeframe::from_code(bits.read_u8(3, 5)?);
    let event_type = EventType::from_code(bits.read_u8(1, 3)?);
    let battery_msb = bits.read_u8(0, 1)?;

    // Byte 2
    let temperature_msb = bits.read(8, 12)?;
    let battery_lsb = bits.read_u8(12, 16)?;
    let battery_raw = (battery_msb << 4) | battery_lsb;
    let battery_volts = f32::from(battery_raw) * BATTERY_SCALE;
    let low_battery = battery_raw < LOW_BATTERY_CODE;

    let measurement = decode_measurement(mode, &bits, temperature_msb)?;

    let warnings: Vec<_> = [mode.warning(), event_type.warning(), timeframe.warning()]
        .into_iter()
        .flatten()
        .collect();
    for warning in &warnings {
        warn!("Sensit frame {}: {}", hex, warning);
    }

    debug!(
        "Sensit frame {:08x}: mode {} ({}), event {} ({}), timeframe {} ({}), battery {:.3} V",
        raw,
        mode.code(),
        mode.label(),
        event_type.code(),
        event_type.label(),
        timeframe.code(),
        timeframe.label(),
        battery_volts
    );

    Ok(SensitReading {
        raw,
        mode,
        event_type,
        timeframe,
        battery_raw,
        battery_volts,
        low_battery,
        measurement,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::tables::UNKNOWN_LABEL;
    use crate::error::{DecodeError, DecodeWarning};

    /// Assemble a frame from `(start, end, value)` bit fields.
    fn frame(fields: &[(u32, u32, u32)]) -> String {
        let word = fields.iter().fold(0u32, |acc, &(start, end, value)| {
            acc | (value << (32 - end)) & (u32::MAX >> start)
        });
        format!("{:08x}", word)
    }

    fn close(actual: f32, expected: f32) -> bool {
        (actual - expected).abs() < 1e-5
    }

    #[test]
    fn frame_helper_places_bits() {
        assert_eq!(frame(&[(0, 1, 1)]), "80000000");
        assert_eq!(frame(&[(5, 8, 0b101)]), "05000000");
        assert_eq!(frame(&[(24, 32, 0xab)]), "000000ab");
    }

    #[test]
    fn battery_concatenates_msb_and_lsb() {
        let empty = decode_sensit_frame(&frame(&[])).unwrap();
        assert_eq!(empty.battery_raw, 0);
        assert_eq!(empty.battery_volts, 0.0);
        assert!(empty.low_battery);

        let full = decode_sensit_frame(&frame(&[(0, 1, 1), (12, 16, 0xf)])).unwrap();
        assert_eq!(full.battery_raw, 31);
        assert!(close(full.battery_volts, 4.185));
        assert!(!full.low_battery);

        let lsb_only = decode_sensit_frame(&frame(&[(12, 16, 0xf)])).unwrap();
        assert_eq!(lsb_only.battery_raw, 15);
        assert!(lsb_only.low_battery);
    }

    #[test]
    fn header_fields() {
        let hex = frame(&[(1, 3, 2), (3, 5, 3), (5, 8, 4), (24, 32, 7)]);
        let reading = decode_sensit_frame(&hex).unwrap();
        assert_eq!(reading.event_type, EventType::Alert);
        assert_eq!(reading.event_label(), "Alert");
        assert_eq!(reading.timeframe, Timeframe::TwentyFourHours);
        assert_eq!(reading.timeframe_label(), "24 hours");
        assert_eq!(reading.mode, Mode::Move);
        assert_eq!(reading.mode_label(), "Move");
        assert_eq!(reading.alert_count(), Some(7));
        assert_eq!(reading.measurement, SensitMeasurement::Move { alert_count: 7 });
        assert!(reading.warnings.is_empty());
    }

    #[test]
    fn button_mode() {
        // 360 = 0b0101_101000 -> 20 °C
        let hex = frame(&[(5, 8, 0), (8, 12, 0b0101), (18, 24, 0b101000), (24, 28, 2), (28, 32, 3)]);
        let reading = decode_sensit_frame(&hex).unwrap();
        assert_eq!(reading.mode, Mode::Button);
        assert_eq!(reading.firmware_version().as_deref(), Some("2.3"));
        assert!(close(reading.temperature_celsius().unwrap(), 20.0));
        assert_eq!(reading.reed_switch_on(), Some(false));
        assert_eq!(reading.humidity_percent(), None);
        assert_eq!(reading.alert_count(), None);
        assert_eq!(reading.light_lux(), None);
    }

    #[test]
    fn humidity_mode() {
        let hex = frame(&[(5, 8, 1), (17, 18, 1), (24, 32, 1)]);
        let reading = decode_sensit_frame(&hex).unwrap();
        assert_eq!(reading.mode_label(), "Temperature + Humidity");
        assert_eq!(reading.humidity_percent(), Some(0.5));
        assert_eq!(reading.reed_switch_on(), Some(true));
        // Raw temperature 0
        assert!(close(reading.temperature_celsius().unwrap(), -25.0));
        assert_eq!(reading.firmware_version(), None);

        let wet = decode_sensit_frame(&frame(&[(5, 8, 1), (24, 32, 0xc8)])).unwrap();
        assert_eq!(wet.humidity_percent(), Some(100.0));
    }

    #[test]
    fn light_mode() {
        let boosted = decode_sensit_frame(&frame(&[(5, 8, 2), (17, 18, 1), (18, 24, 10), (24, 32, 3)])).unwrap();
        assert!(close(boosted.light_lux().unwrap(), 0.8));
        assert_eq!(boosted.alert_count(), Some(3));
        assert_eq!(boosted.temperature_celsius(), None);
        assert_eq!(boosted.reed_switch_on(), None);

        let plain = decode_sensit_frame(&frame(&[(5, 8, 2), (18, 24, 10)])).unwrap();
        assert!(close(plain.light_lux().unwrap(), 0.1));
        assert_eq!(plain.alert_count(), Some(0));
    }

    #[test]
    fn alert_modes() {
        let door = decode_sensit_frame(&frame(&[(5, 8, 3), (24, 32, 255)])).unwrap();
        assert_eq!(door.measurement, SensitMeasurement::Door { alert_count: 255 });
        assert_eq!(door.mode_label(), "Door");

        let reed = decode_sensit_frame(&frame(&[(5, 8, 5), (24, 32, 12)])).unwrap();
        assert_eq!(reed.measurement, SensitMeasurement::ReedSwitch { alert_count: 12 });
        assert_eq!(reed.mode_label(), "Reed switch");
        assert_eq!(reed.reed_switch_on(), None);
    }

    #[test]
    fn unrecognized_mode_is_not_fatal() {
        let hex = frame(&[(0, 1, 1), (1, 3, 1), (5, 8, 6), (24, 32, 9)]);
        let reading = decode_sensit_frame(&hex).unwrap();
        assert_eq!(reading.mode, Mode::Unrecognized(6));
        assert_eq!(reading.mode_label(), UNKNOWN_LABEL);
        assert_eq!(reading.measurement, SensitMeasurement::Unrecognized);
        assert_eq!(reading.warnings, vec![DecodeWarning::UnrecognizedMode(6)]);
        assert_eq!(reading.event_label(), "Button call");
        assert_eq!(reading.timeframe_label(), "10 mins");
        assert_eq!(reading.alert_count(), None);
        assert!(close(reading.battery_volts, 16.0 * BATTERY_SCALE));
    }

    #[test]
    fn zero_top_byte_keeps_field_positions() {
        // Top seven bits clear: every field must still come from its own slot
        let reading = decode_sensit_frame("01a30a14").unwrap();
        assert_eq!(reading.raw, 0x01a3_0a14);
        assert_eq!(reading.mode, Mode::TemperatureHumidity);
        assert_eq!(reading.event_type, EventType::Regular);
        assert_eq!(reading.timeframe, Timeframe::TenMinutes);
        assert_eq!(reading.battery_raw, 3);
        assert_eq!(reading.humidity_percent(), Some(10.0));
        // 0b1010 << 6 | 0b001010 = 650
        assert!(close(reading.temperature_celsius().unwrap(), (650.0 - 200.0) / 8.0));
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        assert_eq!(
            decode_sensit_frame("ABCDEF01").unwrap(),
            decode_sensit_frame("abcdef01").unwrap()
        );
    }

    #[test]
    fn rejects_malformed_payloads() {
        for bad in ["", "abc", "zzzzzzzz", "12 45678", "0011", "0011223344"] {
            assert!(
                matches!(decode_sensit_frame(bad), Err(DecodeError::MalformedFrame(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(
            decode_sensit_frame("0011"),
            Err(DecodeError::MalformedFrame(FrameFault::TooShort {
                needed: 4,
                available: 2
            }))
        );
    }
}
