/// Wisol GPS tracker frame decoding
///
/// Byte layout of the payload:
/// - Byte 0: Latitude hemisphere marker ('N' = 0x4e, anything else is south)
/// - Bytes 1-3: Latitude degrees, minutes, seconds
/// - Byte 4: Unused
/// - Byte 5: Longitude hemisphere marker ('E' = 0x45, anything else is west)
/// - Bytes 6-8: Longitude degrees, minutes, seconds
/// - Byte 9: Status marker ('A' = 0x41 active, 'V' = 0x56 void)
/// - Byte 10: Temperature integer part, hex digits read as decimal
/// - Byte 11: Temperature hundredths, hex digits read as decimal
use log::debug;

use crate::decoder::bits::{hex_byte, hex_byte_as_decimal, parse_hex};
use crate::error::{DecodeResult, FrameFault};
use crate::models::{DmsAngle, GeoPosition, WisolReading};

/// Bytes covered by the layout above
pub const WISOL_LAYOUT_LEN: usize = 12;
/// Full frame size sent by the tracker
pub const WISOL_FRAME_LEN: usize = 20;

const NORTH_MARKER: u8 = 0x4e;
const EAST_MARKER: u8 = 0x45;
const STATUS_ACTIVE: u8 = 0x41;
const STATUS_VOID: u8 = 0x56;

const LATITUDE_OFFSET: usize = 0;
const LONGITUDE_OFFSET: usize = 5;
const STATUS_BYTE: usize = 9;
const TEMPERATURE_BYTE: usize = 10;
const TEMPERATURE_FRACTION_BYTE: usize = 11;

/// Hemisphere marker followed by degrees, minutes and seconds.
fn decode_coordinate(hex: &str, offset: usize, marker: u8) -> DecodeResult<(bool, DmsAngle)> {
    let in_marked_hemisphere = hex_byte(hex, offset)? == marker;
    let angle = DmsAngle {
        degrees: hex_byte(hex, offset + 1)?,
        minutes: hex_byte(hex, offset + 2)?,
        seconds: hex_byte(hex, offset + 3)?,
    };
    Ok((in_marked_hemisphere, angle))
}

/// Decode a Wisol GPS frame
///
/// # Arguments
/// * `hex` - Hex-encoded payload, between 12 and 20 bytes
/// * `frame_number` - Sequence number from the frame metadata
///
/// # Returns
/// The decoded reading, or `MalformedFrame` if any field cannot be parsed
pub fn decode_wisol_frame(hex: &str, frame_number: u32) -> DecodeResult<WisolReading> {
    let bytes = parse_hex(hex)?;
    if bytes.len() < WISOL_LAYOUT_LEN {
        return Err(FrameFault::TooShort {
            needed: WISOL_LAYOUT_LEN,
            available: bytes.len(),
        }
        .into());
    }
    if bytes.len() > WISOL_FRAME_LEN {
        return Err(FrameFault::TooLong {
            max: WISOL_FRAME_LEN,
            actual: bytes.len(),
        }
        .into());
    }

    let (is_north, latitude_dms) = decode_coordinate(hex, LATITUDE_OFFSET, NORTH_MARKER)?;
    let (is_east, longitude_dms) = decode_coordinate(hex, LONGITUDE_OFFSET, EAST_MARKER)?;

    let status = match hex_byte(hex, STATUS_BYTE)? {
        STATUS_ACTIVE => true,
        STATUS_VOID => false,
        other => {
            debug!("Unknown Wisol status marker 0x{:02x}, assuming void", other);
            false
        }
    };

    let whole = hex_byte_as_decimal(hex, TEMPERATURE_BYTE)?;
    let hundredths = hex_byte_as_decimal(hex, TEMPERATURE_FRACTION_BYTE)?;
    let temperature_celsius = f64::from(whole) + f64::from(hundredths) * 0.01;

    let position = GeoPosition {
        latitude: latitude_dms.to_decimal(),
        longitude: longitude_dms.to_decimal(),
        is_north,
        is_east,
        frame_number,
        is_gps: true,
        is_wifi: false,
        is_spot_it: false,
    };

    debug!(
        "GPS frame {}: {}:{} {}:{} lat={} lng={} temp={:.2}°C status={}",
        frame_number,
        if is_north { "N" } else { "S" },
        latitude_dms,
        if is_east { "E" } else { "W" },
        longitude_dms,
        position.latitude,
        position.longitude,
        temperature_celsius,
        status
    );

    Ok(WisolReading {
        position,
        latitude_dms,
        longitude_dms,
        temperature_celsius,
        status,
    })
}
