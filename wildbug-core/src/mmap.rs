//! Memory-mapped container access.
//!
//! [`MmapReader`] maps a container file read-only and exposes it through
//! [`Read`] and [`Seek`]. The mapping sits behind an [`Arc`]; every clone
//! keeps its own position, so each decode call can own an independent
//! cursor over the same file without sharing mutable state.
//!
//! # Example
//!
//! ```no_run
//! use wildbug_core::mmap::MmapReader;
//! use std::io::{Read, Seek, SeekFrom};
//!
//! let mut reader = MmapReader::open("sys.wbm")?;
//! let mut magic = [0u8; 3];
//! reader.read_exact(&mut magic)?;
//!
//! let mut other = reader.clone_with_reset_position();
//! other.seek(SeekFrom::Start(0x40))?;
//! # Ok::<(), wildbug_core::error::WildbugError>(())
//! ```
//!
//! # Safety
//!
//! The mapping is undefined behaviour if another process truncates or
//! rewrites the file while it is mapped. Only read-only mappings are made.

use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

/// A memory-mapped file reader with an independent position per clone.
#[derive(Debug)]
pub struct MmapReader {
    /// The memory-mapped file data.
    mmap: Arc<Mmap>,
    /// Current read position.
    position: usize,
}

impl MmapReader {
    /// Open a file and create a memory-mapped reader.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_file(&file)
    }

    /// Create a memory-mapped reader from an open file.
    ///
    /// The caller must ensure that the file is not modified while the
    /// mapping is alive.
    pub fn from_file(file: &File) -> Result<Self> {
        // SAFETY: read-only mapping; the file is not modified while mapped.
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self {
            mmap: Arc::new(mmap),
            position: 0,
        })
    }

    /// Total length of the mapped file.
    #[inline]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Check if the mapped file is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes from the current position to the end of the file.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position)
    }

    /// Zero-copy view of the whole file.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.mmap
    }

    /// Clone sharing the mapping, positioned at the start of the file.
    pub fn clone_with_reset_position(&self) -> Self {
        Self {
            mmap: Arc::clone(&self.mmap),
            position: 0,
        }
    }
}

impl Clone for MmapReader {
    fn clone(&self) -> Self {
        Self {
            mmap: Arc::clone(&self.mmap),
            position: self.position,
        }
    }
}

impl Read for MmapReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.position >= self.len() {
            return Ok(0);
        }

        let to_read = buf.len().min(self.remaining());
        buf[..to_read].copy_from_slice(&self.mmap[self.position..self.position + to_read]);
        self.position += to_read;
        Ok(to_read)
    }
}

impl Seek for MmapReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let new_pos = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::End(offset) => self.len() as i64 + offset,
            SeekFrom::Current(offset) => self.position as i64 + offset,
        };

        if new_pos < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek to negative position",
            ));
        }

        // Seeking past the end is allowed, as with std::io::Cursor.
        self.position = new_pos as usize;
        Ok(new_pos as u64)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position as u64)
    }
}
