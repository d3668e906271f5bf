//! Match-length extension coding.
//!
//! A coded value is a unary prefix of `k - 1` zero bits closed by a one
//! bit, followed by `k` payload bits appended below an implicit leading 1.
//! The smallest coded value is 1, so an extension of zero is expressed by
//! the flag bit in front of it instead.

use wildbug_core::BitReader;
use wildbug_core::error::{Result, WildbugError};

/// Longest accepted unary prefix; anything longer overflows a match length.
const MAX_PREFIX: u32 = 31;

/// Read one coded value (always >= 1).
pub fn read_length(reader: &mut BitReader<'_>) -> Result<u32> {
    let mut bit_count = 1u32;
    while !reader.read_bit()? {
        bit_count += 1;
        if bit_count > MAX_PREFIX {
            return Err(WildbugError::corrupt(
                reader.position(),
                "length prefix too long",
            ));
        }
    }

    let mut value = 1u32;
    for _ in 0..bit_count {
        value = (value << 1) | u32::from(reader.read_bit()?);
    }

    Ok(value - 1)
}

/// Read a length extension: flag bit `1` means none, `0` means a coded value follows.
pub fn read_extension(reader: &mut BitReader<'_>) -> Result<u32> {
    if reader.read_bit()? {
        Ok(0)
    } else {
        read_length(reader)
    }
}
