//! Error types for WildBug operations.
//!
//! A single error type covers the codec (truncated or corrupt streams),
//! container parsing and I/O. Codec failures are fatal to the decode call
//! that raised them; the container layer wraps them in [`WildbugError::Entry`]
//! so the failing entry can be reported.

use std::io;
use thiserror::Error;

/// The main error type for WildBug operations.
#[derive(Debug, Error)]
pub enum WildbugError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input ended before the declared output length was produced.
    #[error("Truncated stream: input exhausted at byte {position}")]
    TruncatedStream {
        /// Input byte position where the read failed.
        position: usize,
    },

    /// Structurally invalid compressed data.
    #[error("Corrupt stream at byte {position}: {message}")]
    CorruptStream {
        /// Input byte position where corruption was detected.
        position: usize,
        /// Description of the corruption.
        message: String,
    },

    /// Decoder parameters that cannot describe any stream.
    #[error("Invalid decoder configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// Invalid magic number in a container header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Invalid header or entry table.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// The container holds a different resource type than requested.
    #[error("Type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        /// Requested type tag.
        expected: String,
        /// Type tag stored in the file.
        found: String,
    },

    /// Entry not found in container.
    #[error("Entry not found: {id}")]
    EntryNotFound {
        /// Id of the missing entry.
        id: u8,
    },

    /// Container cannot hold more entries.
    #[error("Too many entries: at most {max} allowed")]
    TooManyEntries {
        /// Maximum number of entries.
        max: usize,
    },

    /// Bitmap depth without a known pixel layout.
    #[error("Unsupported pixel format: {bpp} bits per pixel")]
    UnsupportedPixelFormat {
        /// Bits per pixel from the bitmap info block.
        bpp: u8,
    },

    /// A failure while reading a specific container entry.
    #[error("Entry {id} at offset {offset:#x}: {source}")]
    Entry {
        /// Entry id.
        id: u8,
        /// Entry data position in the container.
        offset: u64,
        /// Underlying failure.
        #[source]
        source: Box<WildbugError>,
    },
}

/// Result type alias for WildBug operations.
pub type Result<T> = std::result::Result<T, WildbugError>;

impl WildbugError {
    /// Create a truncated stream error.
    pub fn truncated(position: usize) -> Self {
        Self::TruncatedStream { position }
    }

    /// Create a corrupt stream error.
    pub fn corrupt(position: usize, message: impl Into<String>) -> Self {
        Self::CorruptStream {
            position,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an entry not found error.
    pub fn entry_not_found(id: u8) -> Self {
        Self::EntryNotFound { id }
    }

    /// Wrap an error with the entry it occurred in.
    pub fn in_entry(self, id: u8, offset: u64) -> Self {
        Self::Entry {
            id,
            offset,
            source: Box::new(self),
        }
    }

    /// Whether this error (or the error it wraps) is a codec failure.
    pub fn is_stream_error(&self) -> bool {
        match self {
            Self::TruncatedStream { .. } | Self::CorruptStream { .. } => true,
            Self::Entry { source, .. } => source.is_stream_error(),
            _ => false,
        }
    }
}
