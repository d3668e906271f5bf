//! WPX resource container support.
//!
//! A WPX file holds up to 255 entries addressed by a one-byte id. Each entry
//! is either stored or compressed with the WPX codec; the entry's format
//! byte carries the codec flags.
//!
//! ## Example
//!
//! ```no_run
//! use wildbug_archive::WpxReader;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("system.wbm").unwrap();
//! let mut reader = WpxReader::new(BufReader::new(file), "BMP").unwrap();
//!
//! for entry in reader.entries() {
//!     println!("{}: {} bytes", entry.id, entry.uncompressed_length);
//! }
//! let info = reader.read(16).unwrap();
//! ```

mod header;

pub use header::{ENTRY_RECORD_LEN, MARKER, MAX_ENTRIES, SIGNATURE, WpxEntry, WpxHeader, type_tag};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::io::{Read, Seek, SeekFrom, Write};
use wildbug_core::{Result, WildbugError};
use wildbug_wpx::{PixelLayout, decompress, decompress_image};

/// WPX container reader.
pub struct WpxReader<R> {
    reader: R,
    header: WpxHeader,
    entries: Vec<WpxEntry>,
    file_len: u64,
}

impl<R: Read + Seek> WpxReader<R> {
    /// Open a container and check that it holds resources of `type_name`.
    pub fn new(reader: R, type_name: &str) -> Result<Self> {
        let expected = type_tag(type_name)?;
        let wpx = Self::open(reader)?;
        if wpx.header.type_tag != expected {
            return Err(WildbugError::type_mismatch(type_name, wpx.header.type_name()));
        }
        Ok(wpx)
    }

    /// Open a container of any type.
    pub fn open(mut reader: R) -> Result<Self> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header = WpxHeader::read(&mut reader)?;
        if header.entry_count > 0 && usize::from(header.entry_length) < ENTRY_RECORD_LEN {
            return Err(WildbugError::invalid_header(format!(
                "entry record length {} is below {ENTRY_RECORD_LEN}",
                header.entry_length
            )));
        }

        let mut entries = Vec::with_capacity(usize::from(header.entry_count));
        let mut record = [0u8; ENTRY_RECORD_LEN];
        for i in 0..u64::from(header.entry_count) {
            reader.seek(SeekFrom::Start(
                header.index_offset + i * u64::from(header.entry_length),
            ))?;
            reader.read_exact(&mut record)?;
            entries.push(WpxEntry::parse(&record, file_len)?);
        }

        tracing::debug!(
            type_name = %header.type_name(),
            entries = entries.len(),
            file_len,
            "opened WPX container"
        );

        Ok(Self {
            reader,
            header,
            entries,
            file_len,
        })
    }

    /// Get the header.
    pub fn header(&self) -> &WpxHeader {
        &self.header
    }

    /// Get the type tag as text.
    pub fn type_name(&self) -> String {
        self.header.type_name()
    }

    /// Get all entries in index order.
    pub fn entries(&self) -> &[WpxEntry] {
        &self.entries
    }

    /// Check whether an entry with `id` exists.
    pub fn contains(&self, id: u8) -> bool {
        self.entry(id).is_some()
    }

    /// Find the first entry with `id`.
    pub fn entry(&self, id: u8) -> Option<&WpxEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Total container size in bytes.
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Read and decode a non-image entry.
    pub fn read(&mut self, id: u8) -> Result<Vec<u8>> {
        self.read_entry(id, None)
    }

    /// Read and decode an image entry with the given pixel layout.
    pub fn read_image(&mut self, id: u8, layout: PixelLayout) -> Result<Vec<u8>> {
        self.read_entry(id, Some(layout))
    }

    /// Read and decode every entry as a non-image entry, in index order.
    ///
    /// With the `parallel` feature the entries are decoded on the rayon pool.
    pub fn read_all(&mut self) -> Result<Vec<(u8, Vec<u8>)>> {
        let entries = self.entries.clone();
        let mut regions = Vec::with_capacity(entries.len());
        for entry in &entries {
            let region = self
                .read_region(entry)
                .map_err(|e| e.in_entry(entry.id, entry.position))?;
            regions.push((*entry, region));
        }

        #[cfg(feature = "parallel")]
        let decoded: Vec<Result<(u8, Vec<u8>)>> = regions
            .into_par_iter()
            .map(|(entry, region)| decode_entry(&entry, region, None).map(|data| (entry.id, data)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let decoded: Vec<Result<(u8, Vec<u8>)>> = regions
            .into_iter()
            .map(|(entry, region)| decode_entry(&entry, region, None).map(|data| (entry.id, data)))
            .collect();

        decoded.into_iter().collect()
    }

    /// Consume the reader and return the underlying input.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_entry(&mut self, id: u8, layout: Option<PixelLayout>) -> Result<Vec<u8>> {
        let entry = *self
            .entry(id)
            .ok_or_else(|| WildbugError::entry_not_found(id))?;

        tracing::debug!(
            id,
            format = %entry.wpx_format(),
            position = entry.position,
            compressed = entry.is_compressed(),
            image = layout.is_some(),
            "reading WPX entry"
        );

        let region = self
            .read_region(&entry)
            .map_err(|e| e.in_entry(id, entry.position))?;
        decode_entry(&entry, region, layout)
    }

    /// Read the bytes an entry occupies in the file.
    fn read_region(&mut self, entry: &WpxEntry) -> Result<Vec<u8>> {
        let length = entry.stored_length();
        if entry.position + length as u64 > self.file_len {
            return Err(WildbugError::truncated(self.file_len as usize));
        }

        self.reader.seek(SeekFrom::Start(entry.position))?;
        let mut region = vec![0u8; length];
        self.reader.read_exact(&mut region)?;
        Ok(region)
    }
}

/// Decode an entry's region; stored entries are returned as read.
fn decode_entry(entry: &WpxEntry, region: Vec<u8>, layout: Option<PixelLayout>) -> Result<Vec<u8>> {
    if !entry.is_compressed() {
        return Ok(region);
    }

    let format = entry.wpx_format();
    let result = match layout {
        Some(layout) => decompress_image(&region, format, layout, entry.uncompressed_length),
        None => decompress(&region, format, entry.uncompressed_length),
    };
    result.map_err(|e| e.in_entry(entry.id, entry.position))
}

/// WPX container writer.
///
/// Entries are written stored (format 0), in insertion order, right after
/// the entry index.
#[derive(Debug)]
pub struct WpxWriter {
    type_tag: [u8; 4],
    entries: Vec<(u8, Vec<u8>)>,
}

impl WpxWriter {
    /// Create a writer for resources of `type_name`.
    pub fn new(type_name: &str) -> Result<Self> {
        Ok(Self {
            type_tag: type_tag(type_name)?,
            entries: Vec::new(),
        })
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry.
    ///
    /// Entries must hold at least one byte; readers reject empty records.
    pub fn add_entry(&mut self, id: u8, data: impl Into<Vec<u8>>) -> Result<()> {
        if self.entries.len() >= MAX_ENTRIES {
            return Err(WildbugError::TooManyEntries { max: MAX_ENTRIES });
        }
        let data = data.into();
        if data.is_empty() {
            return Err(WildbugError::invalid_header(format!("entry {id}: no data")));
        }
        self.entries.push((id, data));
        Ok(())
    }

    /// Write the container.
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        let count = self.entries.len() as u8;
        let header = WpxHeader::new(self.type_tag, count);
        header.write(writer)?;

        let index_pos = writer.stream_position()?;
        writer.write_all(&vec![0u8; self.entries.len() * ENTRY_RECORD_LEN])?;

        let mut records = Vec::with_capacity(self.entries.len());
        for (id, data) in &self.entries {
            let position = writer.stream_position()?;
            writer.write_all(data)?;
            records.push(WpxEntry {
                id: *id,
                format: 0,
                position,
                uncompressed_length: data.len(),
                compressed_length: 0,
            });
        }
        let end = writer.stream_position()?;

        writer.seek(SeekFrom::Start(index_pos))?;
        for record in &records {
            writer.write_all(&record.to_bytes()?)?;
        }
        writer.seek(SeekFrom::Start(end))?;
        writer.flush()?;

        tracing::debug!(entries = records.len(), bytes = end, "wrote WPX container");
        Ok(())
    }

    /// Write the container into a new buffer.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}
