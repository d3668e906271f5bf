//! Bit-level I/O for the WPX token stream.
//!
//! WPX streams interleave two kinds of reads over one byte sequence:
//! single flag bits, taken MSB-first from a one-byte bit buffer, and raw
//! bytes taken from the input position regardless of bit alignment. The
//! bit buffer is refilled from the *next input byte* only when a bit is
//! requested and the buffer is empty, so raw bytes and bit bytes appear in
//! the stream in the order the decoder consumes them.
//!
//! # Example
//!
//! ```
//! use wildbug_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bit(true);
//! writer.write_byte(0x41);
//! writer.write_bit(false);
//! let data = writer.into_vec();
//! assert_eq!(data, vec![0x80, 0x41]);
//!
//! let mut reader = BitReader::new(&data);
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.read_byte().unwrap(), 0x41);
//! assert!(!reader.read_bit().unwrap());
//! ```

use crate::error::{Result, WildbugError};

/// MSB-first bit reader with interleaved raw byte access.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Next input byte position.
    byte_pos: usize,
    /// Bit buffer; the next bit is bit 7.
    bits: u8,
    /// Number of unread bits in `bits`.
    bits_remaining: u8,
}

impl<'a> BitReader<'a> {
    /// Create a new reader over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bits: 0,
            bits_remaining: 0,
        }
    }

    /// Current input byte position (bytes consumed so far, bit bytes included).
    #[inline]
    pub fn position(&self) -> usize {
        self.byte_pos
    }

    /// Number of input bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.byte_pos
    }

    /// Read the next raw byte, independent of bit alignment.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        match self.data.get(self.byte_pos) {
            Some(&byte) => {
                self.byte_pos += 1;
                Ok(byte)
            }
            None => Err(WildbugError::truncated(self.byte_pos)),
        }
    }

    /// Read `count` raw bytes as a slice of the input.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .byte_pos
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or(WildbugError::truncated(self.data.len()))?;
        let bytes = &self.data[self.byte_pos..end];
        self.byte_pos = end;
        Ok(bytes)
    }

    /// Skip `count` raw bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Discard the bit buffer and load it with the next input byte.
    #[inline]
    pub fn reseed(&mut self) -> Result<()> {
        self.bits = self.read_byte()?;
        self.bits_remaining = 8;
        Ok(())
    }

    /// Read a single bit, refilling the bit buffer when it is empty.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits_remaining == 0 {
            self.reseed()?;
        }

        let bit = self.bits & 0x80 != 0;
        self.bits <<= 1;
        self.bits_remaining -= 1;

        Ok(bit)
    }

    /// Read up to 16 bits, first bit read in the most significant position.
    pub fn read_bits(&mut self, count: u8) -> Result<u16> {
        debug_assert!(count <= 16, "Cannot read more than 16 bits at once");

        let mut value = 0u16;
        for _ in 0..count {
            value = (value << 1) | u16::from(self.read_bit()?);
        }
        Ok(value)
    }
}

/// MSB-first bit writer producing the layout [`BitReader`] consumes.
///
/// Each time a bit is written with an exhausted (or absent) bit byte, a new
/// placeholder byte is appended at the current end of the output, which is
/// exactly where the reader will refill from.
#[derive(Debug)]
pub struct BitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Index of the byte currently receiving bits.
    bit_byte: usize,
    /// Bits already placed in the current bit byte (8 = none open).
    bits_used: u8,
}

impl BitWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            bit_byte: 0,
            bits_used: 8,
        }
    }

    /// Number of bytes written so far (open bit bytes included).
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Write a raw byte at the current end of the stream.
    pub fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }

    /// Write raw bytes at the current end of the stream.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    /// Start a fresh bit byte now, mirroring [`BitReader::reseed`].
    pub fn reseed(&mut self) {
        self.bit_byte = self.output.len();
        self.output.push(0);
        self.bits_used = 0;
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if self.bits_used == 8 {
            self.reseed();
        }

        if bit {
            self.output[self.bit_byte] |= 0x80 >> self.bits_used;
        }
        self.bits_used += 1;
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 != 0);
        }
    }

    /// Get the output data. Unused bits of the last bit byte are zero.
    pub fn into_vec(self) -> Vec<u8> {
        self.output
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}
