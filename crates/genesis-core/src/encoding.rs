//! Integer encodings used inside transactions and scripts.
//!
//! - CompactSize: Bitcoin's variable-length unsigned integer (1, 3, 5 or 9 bytes).
//! - ScriptNum: minimal little-endian signed-magnitude numbers for script literals.

use crate::error::{GenesisError, Result};

/// Encode a variable-length integer (Bitcoin CompactSize).
pub fn encode_compact_size(value: u64) -> Vec<u8> {
    let mut output = Vec::with_capacity(9);
    write_compact_size(value, &mut output);
    output
}

/// Append a CompactSize encoding of `value` to `output`.
pub fn write_compact_size(value: u64, output: &mut Vec<u8>) {
    if value < 0xfd {
        output.push(value as u8);
    } else if value <= 0xffff {
        output.push(0xfd);
        output.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffffffff {
        output.push(0xfe);
        output.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        output.push(0xff);
        output.extend_from_slice(&value.to_le_bytes());
    }
}

/// Decode a CompactSize from the front of `input`.
///
/// Returns the value and the number of bytes consumed. Non-minimal
/// encodings are rejected.
pub fn decode_compact_size(input: &[u8]) -> Result<(u64, usize)> {
    let (&marker, rest) = input
        .split_first()
        .ok_or(GenesisError::TruncatedCompactSize)?;

    let (value, width, minimum) = match marker {
        0xfd => (read_le(rest, 2)?, 2, 0xfd),
        0xfe => (read_le(rest, 4)?, 4, 0x1_0000),
        0xff => (read_le(rest, 8)?, 8, 0x1_0000_0000),
        byte => return Ok((byte as u64, 1)),
    };

    if value < minimum {
        return Err(GenesisError::NonMinimalCompactSize(value));
    }

    Ok((value, 1 + width))
}

fn read_le(bytes: &[u8], width: usize) -> Result<u64> {
    let field = bytes
        .get(..width)
        .ok_or(GenesisError::TruncatedCompactSize)?;
    let mut buf = [0u8; 8];
    buf[..width].copy_from_slice(field);
    Ok(u64::from_le_bytes(buf))
}

/// Encode a signed integer as a minimal script number.
///
/// Zero is the empty byte string. The magnitude is written little-endian;
/// the sign lives in the top bit of the last byte, which gets an extra
/// `0x00`/`0x80` byte when the magnitude already uses that bit.
pub fn encode_script_num(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }

    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut bytes = Vec::with_capacity(9);

    while magnitude > 0 {
        bytes.push((magnitude & 0xff) as u8);
        magnitude >>= 8;
    }

    if let Some(last) = bytes.last_mut() {
        if *last & 0x80 != 0 {
            bytes.push(if negative { 0x80 } else { 0x00 });
        } else if negative {
            *last |= 0x80;
        }
    }

    bytes
}
