//! Format flags and decoder configuration.
//!
//! A WPX entry carries a 4-bit format value. Each bit switches on one
//! capability of the decoder; [`DecoderConfig::select`] turns the bits into
//! the configuration record the token loop runs with.

use std::fmt;
use wildbug_core::error::{Result, WildbugError};

/// The 4-bit WPX format flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WpxFormat(u8);

impl WpxFormat {
    /// Contextual offset table (image entries only).
    pub const CONTEXT_OFFSETS: u8 = 0x1;
    /// Literals are coded with the transmitted prefix-code table.
    pub const CODE_TABLE: u8 = 0x2;
    /// Literals go through the adaptive byte-rank transform.
    pub const RANK_TRANSFORM: u8 = 0x4;
    /// Match offsets are always a single byte.
    pub const ONE_BYTE_OFFSETS: u8 = 0x8;

    /// Create flags from an entry's format byte; bits above `0xF` are dropped.
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// The raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether all bits of `flag` are set.
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag == flag
    }

    /// Iterate over all 16 flag combinations.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..16).map(Self)
    }
}

impl From<u8> for WpxFormat {
    fn from(bits: u8) -> Self {
        Self::new(bits)
    }
}

impl fmt::Display for WpxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)?;
        let names = [
            (Self::ONE_BYTE_OFFSETS, "one-byte-offsets"),
            (Self::RANK_TRANSFORM, "rank-transform"),
            (Self::CODE_TABLE, "code-table"),
            (Self::CONTEXT_OFFSETS, "context-offsets"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if !set.is_empty() {
            write!(f, " [{}]", set.join(", "))?;
        }
        Ok(())
    }
}

/// How explicit match offsets are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetMode {
    /// One raw byte, baseline length 2.
    OneByte,
    /// A flag bit selects one raw byte (baseline 2) or two little-endian
    /// bytes (baseline 3).
    TwoByte,
}

/// Element size and row stride of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    /// Bytes per pixel element; also the number of verbatim seed bytes.
    pub base_length: usize,
    /// Bytes per output row.
    pub stride: usize,
}

impl PixelLayout {
    /// Layout used for non-image blobs.
    pub const BLOB: Self = Self {
        base_length: 1,
        stride: 0,
    };

    /// Create a new pixel layout.
    pub const fn new(base_length: usize, stride: usize) -> Self {
        Self {
            base_length,
            stride,
        }
    }

    /// Reject layouts no stream can use.
    pub fn validate(&self) -> Result<()> {
        if self.base_length == 0 {
            return Err(WildbugError::invalid_config("base length must be at least 1"));
        }
        Ok(())
    }
}

impl Default for PixelLayout {
    fn default() -> Self {
        Self::BLOB
    }
}

/// Decoder capabilities selected by the format flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Explicit offset encoding.
    pub offset_mode: OffsetMode,
    /// Literals are decoded through the prefix-code table.
    pub use_code_table: bool,
    /// Code-table symbols are ranks into the adaptive byte-rank table.
    pub use_rank_transform: bool,
    /// Matches may use the contextual offset table.
    pub use_context_offsets: bool,
}

impl DecoderConfig {
    /// Map format flags to a configuration.
    ///
    /// The rank transform consumes code-table symbols, so it implies the
    /// code table. Contextual offsets only exist for image entries.
    pub fn select(format: WpxFormat, image: bool) -> Self {
        let use_rank_transform = format.contains(WpxFormat::RANK_TRANSFORM);
        Self {
            offset_mode: if format.contains(WpxFormat::ONE_BYTE_OFFSETS) {
                OffsetMode::OneByte
            } else {
                OffsetMode::TwoByte
            },
            use_code_table: use_rank_transform || format.contains(WpxFormat::CODE_TABLE),
            use_rank_transform,
            use_context_offsets: image && format.contains(WpxFormat::CONTEXT_OFFSETS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_blob_ignores_context_bit() {
        let config = DecoderConfig::select(WpxFormat::new(0x1), false);
        assert_eq!(config.offset_mode, OffsetMode::TwoByte);
        assert!(!config.use_code_table);
        assert!(!config.use_rank_transform);
        assert!(!config.use_context_offsets);

        let config = DecoderConfig::select(WpxFormat::new(0x1), true);
        assert!(config.use_context_offsets);
    }

    #[test]
    fn test_transform_implies_code_table() {
        let config = DecoderConfig::select(WpxFormat::new(0xC), false);
        assert_eq!(config.offset_mode, OffsetMode::OneByte);
        assert!(config.use_code_table);
        assert!(config.use_rank_transform);
    }

    #[test]
    fn test_all_formats_distinct_in_image_mode() {
        let configs: Vec<DecoderConfig> = WpxFormat::all()
            .map(|format| DecoderConfig::select(format, true))
            .collect();
        assert_eq!(configs.len(), 16);
        // 0x4 and 0x6 select the same capabilities.
        assert_eq!(configs[0x4], configs[0x6]);
        assert_ne!(configs[0x2], configs[0x6]);
    }

    #[test]
    fn test_format_masks_high_bits() {
        assert_eq!(WpxFormat::new(0x9A).bits(), 0x0A);
        assert_eq!(WpxFormat::from(0x0E).to_string(), "0xe [one-byte-offsets, rank-transform, code-table]");
        assert_eq!(WpxFormat::default().to_string(), "0x0");
    }

    #[test]
    fn test_layout_validate() {
        assert!(PixelLayout::BLOB.validate().is_ok());
        assert!(PixelLayout::new(0, 16).validate().is_err());
    }
}
