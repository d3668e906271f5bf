//! Literal prefix-code table.
//!
//! The table is transmitted at the head of the stream: 128 bytes of packed
//! 4-bit code lengths (low nibble first) for the 256 byte symbols, then the
//! code of every used symbol, MSB-first, in symbol order. Codes are stored
//! left-justified in a 15-bit leaf space so that a symbol is recognised as
//! soon as the number of bits walked equals the length stored at the
//! accumulated index.

use wildbug_core::BitReader;
use wildbug_core::error::{Result, WildbugError};

/// Maximum code length in bits.
pub const MAX_CODE_LENGTH: u8 = 15;

/// Number of packed length bytes at the head of the table.
pub const LENGTH_BYTES: usize = 128;

const TABLE_SIZE: usize = 1 << MAX_CODE_LENGTH;

/// A leaf of the lookup table. Length 0 marks an empty slot.
#[derive(Debug, Clone, Copy, Default)]
struct TableEntry {
    length: u8,
    symbol: u8,
}

/// Prefix-code table for literal symbols.
#[derive(Debug, Clone)]
pub struct CodeTable {
    /// Leaves indexed by left-justified code.
    table: Box<[TableEntry]>,
    /// Code length per symbol.
    lengths: [u8; 256],
}

impl CodeTable {
    /// Read the table from the stream.
    ///
    /// Consumes the packed lengths as raw bytes, reseeds the bit buffer,
    /// then reads one code per used symbol.
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let packed = reader.read_bytes(LENGTH_BYTES)?;

        let mut lengths = [0u8; 256];
        for (i, &byte) in packed.iter().enumerate() {
            lengths[2 * i] = byte & 0x0F;
            lengths[2 * i + 1] = byte >> 4;
        }

        reader.reseed()?;

        let mut table = vec![TableEntry::default(); TABLE_SIZE].into_boxed_slice();
        for (symbol, &length) in lengths.iter().enumerate() {
            if length == 0 {
                continue;
            }

            let mut index = 0usize;
            for _ in 0..length {
                index = (index << 1) | usize::from(reader.read_bit()?);
            }
            index <<= MAX_CODE_LENGTH - length;

            table[index] = TableEntry {
                length,
                symbol: symbol as u8,
            };
        }

        let used = lengths.iter().filter(|&&length| length != 0).count();
        tracing::trace!(used, position = reader.position(), "code table read");

        Ok(Self { table, lengths })
    }

    /// Decode one symbol, walking at most [`MAX_CODE_LENGTH`] bits.
    ///
    /// A walk that ends on an empty leaf fails with
    /// [`WildbugError::CorruptStream`]. The engine's own decoder emits
    /// symbol 0 there instead, so streams that rely on that fallback are
    /// rejected here.
    pub fn decode(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let mut index = 0usize;

        for pos in 1..=MAX_CODE_LENGTH {
            if reader.read_bit()? {
                index |= 1 << (MAX_CODE_LENGTH - pos);
            }

            let entry = self.table[index];
            if entry.length == pos {
                return Ok(entry.symbol);
            }
        }

        Err(WildbugError::corrupt(
            reader.position(),
            format!("no literal code matches prefix {index:#06x}"),
        ))
    }

    /// Code length of `symbol` (0 if unused).
    pub fn code_length(&self, symbol: u8) -> u8 {
        self.lengths[usize::from(symbol)]
    }
}
