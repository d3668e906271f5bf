//! # WildBug WPX
//!
//! Pure Rust decoder for the WPX compression codec used by WildBug engine
//! resources.
//!
//! WPX is a family of 16 LZ variants selected by a 4-bit format value:
//!
//! | Bit   | Meaning                                                  |
//! |-------|----------------------------------------------------------|
//! | `0x8` | One-byte match offsets (else one- or two-byte offsets)   |
//! | `0x4` | Adaptive byte-rank transform on literals                 |
//! | `0x2` | Literals coded with a transmitted prefix-code table      |
//! | `0x1` | Contextual offset table (image entries only)             |
//!
//! Image entries additionally carry a [`PixelLayout`]: the element size,
//! which seeds the output and picks the rank-transform context, and the
//! row stride used by the contextual offsets.
//!
//! ## Example
//!
//! ```rust
//! use wildbug_wpx::{WpxFormat, decompress};
//!
//! // Seed 'A', padding, then: match (distance 1, length 2), literal 'B'
//! let data = [0x41, 0, 0, 0, 0x60, 0x00, 0x42];
//! let output = decompress(&data, WpxFormat::new(0x8), 4).unwrap();
//! assert_eq!(output, b"AAAB");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod code_table;
pub mod config;
pub mod decoder;
pub mod length;
pub mod offsets;
pub mod rank;

pub use code_table::CodeTable;
pub use config::{DecoderConfig, OffsetMode, PixelLayout, WpxFormat};
pub use decoder::WpxDecoder;
pub use offsets::OffsetTable;
pub use rank::RankTable;
pub use wildbug_core::error::{Result, WildbugError};

/// Decompress a non-image WPX stream.
///
/// Uses a one-byte seed and ignores the contextual offset bit.
pub fn decompress(data: &[u8], format: WpxFormat, uncompressed_length: usize) -> Result<Vec<u8>> {
    let config = DecoderConfig::select(format, false);
    WpxDecoder::new(config, PixelLayout::BLOB)?.decode(data, uncompressed_length)
}

/// Decompress an image WPX stream with the given pixel layout.
pub fn decompress_image(
    data: &[u8],
    format: WpxFormat,
    layout: PixelLayout,
    uncompressed_length: usize,
) -> Result<Vec<u8>> {
    let config = DecoderConfig::select(format, true);
    WpxDecoder::new(config, layout)?.decode(data, uncompressed_length)
}
