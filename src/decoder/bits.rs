/// Bit and byte extraction shared by both frame decoders
///
/// Payload bits are numbered MSB first across the whole frame, eight bits
/// per byte, so bit 0 is the top bit of byte 0 and bit 31 the bottom bit of
/// byte 3. Ranges are half-open `[start, end)` and read big-endian.
use crate::error::{DecodeResult, FrameFault};

/// Widest field a single read may return.
const MAX_FIELD_BITS: usize = 32;

/// Decode a hex payload into bytes, rejecting empty, odd-length and
/// non-hexadecimal input.
pub fn parse_hex(hex: &str) -> DecodeResult<Vec<u8>> {
    if hex.is_empty() {
        return Err(FrameFault::Empty.into());
    }
    if hex.len() % 2 != 0 {
        return Err(FrameFault::OddLength { len: hex.len() }.into());
    }

    hex::decode(hex).map_err(|e| {
        let fault = match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                FrameFault::InvalidHexCharacter {
                    character: c,
                    index,
                }
            }
            _ => FrameFault::OddLength { len: hex.len() },
        };
        fault.into()
    })
}

/// Two hex digits making up byte `index` of a hex payload.
fn byte_digits(hex: &str, index: usize) -> DecodeResult<&str> {
    let start = index * 2;
    hex.get(start..start + 2).ok_or_else(|| {
        FrameFault::TooShort {
            needed: index + 1,
            available: hex.len() / 2,
        }
        .into()
    })
}

/// Byte `index` of a hex payload, parsed base 16.
pub fn hex_byte(hex: &str, index: usize) -> DecodeResult<u8> {
    let digits = byte_digits(hex, index)?;
    if let Some((offset, c)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(FrameFault::InvalidHexCharacter {
            character: c,
            index: index * 2 + offset,
        }
        .into());
    }
    u8::from_str_radix(digits, 16).map_err(|_| {
        FrameFault::InvalidHexCharacter {
            character: digits.chars().next().unwrap_or_default(),
            index: index * 2,
        }
        .into()
    })
}

/// Byte `index` of a hex payload with its two digits read as a decimal
/// number, so `"23"` is 23. Digits `a`..`f` are rejected.
pub fn hex_byte_as_decimal(hex: &str, index: usize) -> DecodeResult<u8> {
    let digits = byte_digits(hex, index)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FrameFault::NotDecimal {
            index,
            text: digits.to_string(),
        }
        .into());
    }
    digits.parse::<u8>().map_err(|_| {
        FrameFault::NotDecimal {
            index,
            text: digits.to_string(),
        }
        .into()
    })
}

/// Reads bit ranges out of a borrowed payload.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Unsigned big-endian value of the bits in `[start, end)`.
    pub fn read(&self, start: usize, end: usize) -> DecodeResult<u32> {
        if start > end || end > self.bit_len() || end - start > MAX_FIELD_BITS {
            return Err(FrameFault::BitRangeOutOfBounds {
                start,
                end,
                available: self.bit_len(),
            }
            .into());
        }

        Ok((start..end).fold(0u32, |acc, i| {
            let bit = (self.bytes[i / 8] >> (7 - i % 8)) & 1;
            (acc << 1) | u32::from(bit)
        }))
    }

    /// Like [`BitReader::read`] for fields of at most eight bits.
    pub fn read_u8(&self, start: usize, end: usize) -> DecodeResult<u8> {
        if end.saturating_sub(start) > 8 {
            return Err(FrameFault::BitRangeOutOfBounds {
                start,
                end,
                available: self.bit_len(),
            }
            .into());
        }
        // Width checked above, the value fits
        Ok(self.read(start, end)? as u8)
    }

    /// Single bit at `index`.
    pub fn flag(&self, index: usize) -> DecodeResult<bool> {
        Ok(self.read(index, index + 1)? == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    #[test]
    fn reads_ranges_msb_first() {
        let bytes = [0b1010_0000, 0xff, 0x00, 0x0f];
        let reader = BitReader::new(&bytes);

        assert_eq!(reader.read(0, 1).unwrap(), 1);
        assert_eq!(reader.read(0, 3).unwrap(), 0b101);
        assert_eq!(reader.read(4, 12).unwrap(), 0b0000_1111);
        assert_eq!(reader.read(28, 32).unwrap(), 0xf);
        assert_eq!(reader.read(0, 32).unwrap(), 0xa0ff_000f);
        assert_eq!(reader.read(7, 7).unwrap(), 0);
    }

    #[test]
    fn leading_zero_bits_are_kept() {
        // A zero top byte must not shift the remaining fields
        let bytes = [0x00, 0x00, 0x00, 0x01];
        let reader = BitReader::new(&bytes);
        assert_eq!(reader.bit_len(), 32);
        assert!(reader.flag(31).unwrap());
        assert!(!reader.flag(0).unwrap());
    }

    #[test]
    fn out_of_range_reads_fail() {
        let bytes = [0xff; 2];
        let reader = BitReader::new(&bytes);

        assert!(matches!(
            reader.read(10, 17),
            Err(DecodeError::MalformedFrame(FrameFault::BitRangeOutOfBounds {
                start: 10,
                end: 17,
                available: 16
            }))
        ));
        assert!(reader.read(5, 4).is_err());
        assert!(reader.read_u8(0, 9).is_err());
        assert!(reader.flag(16).is_err());
    }

    #[test]
    fn hex_parsing_rejects_bad_input() {
        assert_eq!(parse_hex("00ff").unwrap(), vec![0x00, 0xff]);
        assert_eq!(parse_hex("4E").unwrap(), vec![0x4e]);

        assert_eq!(
            parse_hex(""),
            Err(DecodeError::MalformedFrame(FrameFault::Empty))
        );
        assert_eq!(
            parse_hex("abc"),
            Err(DecodeError::MalformedFrame(FrameFault::OddLength { len: 3 }))
        );
        assert_eq!(
            parse_hex("zz00"),
            Err(DecodeError::MalformedFrame(
                FrameFault::InvalidHexCharacter {
                    character: 'z',
                    index: 0
                }
            ))
        );
    }

    #[test]
    fn byte_helpers() {
        let hex = "4e1f2345";
        assert_eq!(hex_byte(hex, 0).unwrap(), 0x4e);
        assert_eq!(hex_byte(hex, 3).unwrap(), 0x45);
        assert_eq!(hex_byte_as_decimal(hex, 2).unwrap(), 23);

        assert_eq!(
            hex_byte(hex, 4),
            Err(DecodeError::MalformedFrame(FrameFault::TooShort {
                needed: 5,
                available: 4
            }))
        );
        assert!(matches!(
            hex_byte_as_decimal(hex, 1),
            Err(DecodeError::MalformedFrame(FrameFault::NotDecimal { index: 1, .. }))
        ));
        assert!(hex_byte("+f", 0).is_err());
    }
}
