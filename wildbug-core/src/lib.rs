//! # WildBug Core
//!
//! Core components for the WildBug asset tooling.
//!
//! - [`bitstream`]: MSB-first bit reader/writer with interleaved raw bytes
//! - [`error`]: Error types shared by every crate in the workspace
//! - `mmap`: Memory-mapped container access (feature `mmap`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     wildbug list / info / extract / image / pack        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     WPX resource container, WBM bitmap layout           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     WPX LZ decoder: code table, rank transform, offsets │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, errors, mmap                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wildbug_core::BitReader;
//!
//! let data = [0b1010_0000, 0x7F];
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_byte().unwrap(), 0x7F);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
#[cfg(feature = "mmap")]
pub mod mmap;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{Result, WildbugError};
#[cfg(feature = "mmap")]
pub use mmap::MmapReader;
