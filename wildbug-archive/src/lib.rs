//! # WildBug Archive
//!
//! Resource container support for WildBug engine assets.
//!
//! - **WPX**: typed container of up to 255 id-addressed entries, each
//!   stored or compressed with the WPX codec
//! - **WBM**: bitmaps stored as a `BMP` WPX container (info, pixel and
//!   alpha entries)
//!
//! ## Example
//!
//! ```rust
//! use wildbug_archive::{WpxReader, WpxWriter};
//! use std::io::Cursor;
//!
//! let mut writer = WpxWriter::new("DAT").unwrap();
//! writer.add_entry(1, b"hello".to_vec()).unwrap();
//! let bytes = writer.to_vec().unwrap();
//!
//! let mut reader = WpxReader::new(Cursor::new(bytes), "DAT").unwrap();
//! assert_eq!(reader.read(1).unwrap(), b"hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod wbm;
pub mod wpx;

// Re-exports
pub use wbm::{BitmapInfo, WbmImage};
pub use wpx::{WpxEntry, WpxHeader, WpxReader, WpxWriter};
