//! WPX header and entry record structures.
//!
//! All integers are little-endian:
//! - `WPX` signature, filler bytes up to and including a `0x1A` marker
//! - 4-byte type tag, 8 bytes of counts and flags
//! - `entry_count` records, `entry_length` bytes apart

use std::io::{Read, Write};
use wildbug_core::{Result, WildbugError};
use wildbug_wpx::WpxFormat;

/// WPX signature.
pub const SIGNATURE: [u8; 3] = *b"WPX";

/// End of the filler that follows the signature.
pub const MARKER: u8 = 0x1A;

/// Size of one entry record as written.
pub const ENTRY_RECORD_LEN: usize = 16;

/// Maximum number of entries a container can hold.
pub const MAX_ENTRIES: usize = 255;

/// Build the zero-padded 4-byte type tag for `name`.
pub fn type_tag(name: &str) -> Result<[u8; 4]> {
    let bytes = name.as_bytes();
    if !name.is_ascii() || bytes.len() > 4 {
        return Err(WildbugError::invalid_header(format!(
            "type tag must be at most 4 ASCII bytes, got {name:?}"
        )));
    }

    let mut tag = [0u8; 4];
    tag[..bytes.len()].copy_from_slice(bytes);
    Ok(tag)
}

/// WPX file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpxHeader {
    /// Resource type tag, zero padded.
    pub type_tag: [u8; 4],
    /// Unknown; 0x10 in files we write.
    pub unknown1: i32,
    /// Unknown; 1 in files we write.
    pub unknown2: u8,
    /// Unknown; 0 in files we write.
    pub unknown3: u8,
    /// Number of entry records.
    pub entry_count: u8,
    /// Distance between entry records.
    pub entry_length: u8,
    /// File offset of the first entry record.
    pub index_offset: u64,
}

impl WpxHeader {
    /// Header for a new container.
    pub fn new(type_tag: [u8; 4], entry_count: u8) -> Self {
        Self {
            type_tag,
            unknown1: 0x10,
            unknown2: 1,
            unknown3: 0,
            entry_count,
            entry_length: ENTRY_RECORD_LEN as u8,
            index_offset: 16,
        }
    }

    /// Read a header from the start of a container.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut signature = [0u8; 3];
        reader.read_exact(&mut signature)?;
        if signature != SIGNATURE {
            return Err(WildbugError::invalid_magic(SIGNATURE, signature));
        }

        let mut consumed = 3u64;
        let mut byte = [0u8; 1];
        loop {
            reader.read_exact(&mut byte)?;
            consumed += 1;
            if byte[0] == MARKER {
                break;
            }
        }

        let mut buf = [0u8; 12];
        reader.read_exact(&mut buf)?;
        consumed += 12;

        Ok(Self {
            type_tag: [buf[0], buf[1], buf[2], buf[3]],
            unknown1: i32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            unknown2: buf[8],
            unknown3: buf[9],
            entry_count: buf[10],
            entry_length: buf[11],
            index_offset: consumed,
        })
    }

    /// Write the header without filler: signature, marker, fields.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&SIGNATURE)?;
        writer.write_all(&[MARKER])?;
        writer.write_all(&self.type_tag)?;
        writer.write_all(&self.unknown1.to_le_bytes())?;
        writer.write_all(&[
            self.unknown2,
            self.unknown3,
            self.entry_count,
            self.entry_length,
        ])?;
        Ok(())
    }

    /// Type tag as text, without the zero padding.
    pub fn type_name(&self) -> String {
        let end = self
            .type_tag
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.type_tag.len());
        String::from_utf8_lossy(&self.type_tag[..end]).into_owned()
    }
}

/// One entry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WpxEntry {
    /// Entry id.
    pub id: u8,
    /// Raw format byte; the low 4 bits are the codec flags.
    pub format: u8,
    /// File offset of the entry data.
    pub position: u64,
    /// Decoded size.
    pub uncompressed_length: usize,
    /// Size of the compressed region (0 for stored entries).
    pub compressed_length: usize,
}

impl WpxEntry {
    /// Parse and validate a record against the container size.
    pub fn parse(buf: &[u8; ENTRY_RECORD_LEN], file_len: u64) -> Result<Self> {
        let id = buf[0];
        let format = buf[1];
        let position = i32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let uncompressed = i32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
        let compressed = i32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]);

        if position <= 0 || position as u64 >= file_len {
            return Err(WildbugError::invalid_header(format!(
                "entry {id}: position {position} outside file of {file_len} bytes"
            )));
        }
        if uncompressed <= 0 {
            return Err(WildbugError::invalid_header(format!(
                "entry {id}: uncompressed length {uncompressed}"
            )));
        }
        if compressed < 0 {
            return Err(WildbugError::invalid_header(format!(
                "entry {id}: compressed length {compressed}"
            )));
        }

        Ok(Self {
            id,
            format,
            position: position as u64,
            uncompressed_length: uncompressed as usize,
            compressed_length: compressed as usize,
        })
    }

    /// Serialize the record.
    pub fn to_bytes(&self) -> Result<[u8; ENTRY_RECORD_LEN]> {
        let field = |value: u64, name: &str| {
            i32::try_from(value).map_err(|_| {
                WildbugError::invalid_header(format!("entry {}: {name} {value} exceeds i32", self.id))
            })
        };
        let position = field(self.position, "position")?;
        let uncompressed = field(self.uncompressed_length as u64, "uncompressed length")?;
        let compressed = field(self.compressed_length as u64, "compressed length")?;

        let mut buf = [0u8; ENTRY_RECORD_LEN];
        buf[0] = self.id;
        buf[1] = self.format;
        buf[4..8].copy_from_slice(&position.to_le_bytes());
        buf[8..12].copy_from_slice(&uncompressed.to_le_bytes());
        buf[12..16].copy_from_slice(&compressed.to_le_bytes());
        Ok(buf)
    }

    /// Codec flags of this entry.
    pub fn wpx_format(&self) -> WpxFormat {
        WpxFormat::new(self.format)
    }

    /// Whether the data goes through the codec.
    ///
    /// Format 0 or a zero compressed length means the data is stored.
    pub fn is_compressed(&self) -> bool {
        self.format != 0 && self.compressed_length != 0
    }

    /// Number of bytes the entry occupies in the file.
    pub fn stored_length(&self) -> usize {
        if self.is_compressed() {
            self.compressed_length
        } else {
            self.uncompressed_length
        }
    }
}
