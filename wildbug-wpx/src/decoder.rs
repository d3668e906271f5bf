//! WPX token-loop decoder.
//!
//! One loop serves all 16 variants; the [`DecoderConfig`] decides which
//! tables exist and how literals and match offsets are read.
//!
//! Stream layout:
//!
//! ```text
//! +----------------+---------+----------------------------+-----------+
//! | seed pixel     | padding | code table (0x2/0x4 only)  | tokens... |
//! | base_length B  | to 4    | 128 B lengths + codes      |           |
//! +----------------+---------+----------------------------+-----------+
//! ```
//!
//! Every token starts with a flag bit: `1` is a literal, `0` a match.

use crate::code_table::CodeTable;
use crate::config::{DecoderConfig, OffsetMode, PixelLayout};
use crate::length::read_extension;
use crate::offsets::OffsetTable;
use crate::rank::RankTable;
use wildbug_core::BitReader;
use wildbug_core::error::{Result, WildbugError};

/// WPX decoder for one configuration and pixel layout.
#[derive(Debug, Clone)]
pub struct WpxDecoder {
    config: DecoderConfig,
    layout: PixelLayout,
    offsets: Option<OffsetTable>,
}

impl WpxDecoder {
    /// Create a decoder.
    ///
    /// Fails with [`WildbugError::InvalidConfig`] when the layout has no
    /// seed bytes.
    pub fn new(config: DecoderConfig, layout: PixelLayout) -> Result<Self> {
        layout.validate()?;
        let offsets = config.use_context_offsets.then(|| OffsetTable::new(layout));
        Ok(Self {
            config,
            layout,
            offsets,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Get the pixel layout.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Decode `input` into exactly `uncompressed_length` bytes.
    pub fn decode(&self, input: &[u8], uncompressed_length: usize) -> Result<Vec<u8>> {
        if uncompressed_length == 0 {
            return Ok(Vec::new());
        }

        let base = self.layout.base_length;
        if base > uncompressed_length {
            return Err(WildbugError::corrupt(
                0,
                format!("seed length {base} exceeds output length {uncompressed_length}"),
            ));
        }

        tracing::debug!(
            config = ?self.config,
            base_length = base,
            stride = self.layout.stride,
            input_len = input.len(),
            uncompressed_length,
            "decoding WPX stream"
        );

        let mut reader = BitReader::new(input);
        let mut output = Vec::new();
        output.try_reserve_exact(uncompressed_length).map_err(|_| {
            WildbugError::corrupt(
                0,
                format!("cannot allocate {uncompressed_length} output bytes"),
            )
        })?;
        output.resize(uncompressed_length, 0);

        output[..base].copy_from_slice(reader.read_bytes(base)?);
        reader.skip(base.next_multiple_of(4) - base)?;

        let code_table = if self.config.use_code_table {
            Some(CodeTable::read(&mut reader)?)
        } else {
            reader.reseed()?;
            None
        };
        let mut ranks = self.config.use_rank_transform.then(RankTable::new);

        let mut dst = base;
        while dst < uncompressed_length {
            if reader.read_bit()? {
                output[dst] = match (&code_table, ranks.as_mut()) {
                    (Some(table), Some(ranks)) => {
                        let rank = table.decode(&mut reader)?;
                        ranks.lookup_and_promote(output[dst - base], rank)
                    }
                    (Some(table), None) => table.decode(&mut reader)?,
                    (None, _) => reader.read_byte()?,
                };
                dst += 1;
                continue;
            }

            let (distance, baseline) = self.read_match(&mut reader)?;
            let length = baseline.saturating_add(read_extension(&mut reader)? as usize);

            if length > uncompressed_length - dst {
                return Err(WildbugError::corrupt(
                    reader.position(),
                    format!(
                        "match length {length} exceeds remaining output {}",
                        uncompressed_length - dst
                    ),
                ));
            }
            if distance > dst {
                return Err(WildbugError::corrupt(
                    reader.position(),
                    format!("match distance {distance} reaches before output start (at {dst})"),
                ));
            }

            // Byte by byte: the source may overlap the bytes being written.
            for _ in 0..length {
                output[dst] = output[dst - distance];
                dst += 1;
            }
        }

        tracing::trace!(
            consumed = reader.position(),
            input_len = input.len(),
            "WPX stream decoded"
        );

        Ok(output)
    }

    /// Read a match offset, returning `(distance, baseline length)`.
    fn read_match(&self, reader: &mut BitReader<'_>) -> Result<(usize, usize)> {
        if let Some(offsets) = &self.offsets {
            if reader.read_bit()? {
                let index = reader.read_bits(3)?;
                let baseline = if self.layout.base_length != 1 { 1 } else { 2 };
                return Ok((offsets.get(usize::from(index)), baseline));
            }
        }

        let short = match self.config.offset_mode {
            OffsetMode::OneByte => true,
            OffsetMode::TwoByte => reader.read_bit()?,
        };

        if short {
            Ok((usize::from(reader.read_byte()?) + 1, 2))
        } else {
            let lo = reader.read_byte()?;
            let hi = reader.read_byte()?;
            Ok((usize::from(u16::from_le_bytes([lo, hi])) + 1, 3))
        }
    }
}
