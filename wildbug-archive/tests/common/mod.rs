//! Hand-built WPX containers for the integration tests.

#![allow(dead_code)]

use wildbug_core::BitWriter;

/// An entry record plus the bytes stored for it.
pub struct RawEntry {
    pub id: u8,
    pub format: u8,
    pub data: Vec<u8>,
    pub uncompressed_length: usize,
    pub compressed_length: usize,
}

impl RawEntry {
    pub fn stored(id: u8, data: &[u8]) -> Self {
        Self {
            id,
            format: 0,
            data: data.to_vec(),
            uncompressed_length: data.len(),
            compressed_length: 0,
        }
    }

    pub fn compressed(id: u8, format: u8, stream: Vec<u8>, uncompressed_length: usize) -> Self {
        Self {
            id,
            format,
            compressed_length: stream.len(),
            data: stream,
            uncompressed_length,
        }
    }
}

/// Container with `filler` between the signature and the marker and
/// records `entry_length` bytes apart.
pub fn build_container_with(
    type_tag: &[u8; 4],
    filler: &[u8],
    entry_length: usize,
    entries: &[RawEntry],
) -> Vec<u8> {
    let mut out = b"WPX".to_vec();
    out.extend_from_slice(filler);
    out.push(0x1A);
    out.extend_from_slice(type_tag);
    out.extend_from_slice(&0x10i32.to_le_bytes());
    out.extend_from_slice(&[1, 0, entries.len() as u8, entry_length as u8]);

    let index = out.len();
    out.resize(index + entries.len() * entry_length, 0);

    for (i, entry) in entries.iter().enumerate() {
        let position = out.len() as i32;
        out.extend_from_slice(&entry.data);

        let record = index + i * entry_length;
        out[record] = entry.id;
        out[record + 1] = entry.format;
        out[record + 4..record + 8].copy_from_slice(&position.to_le_bytes());
        out[record + 8..record + 12]
            .copy_from_slice(&(entry.uncompressed_length as i32).to_le_bytes());
        out[record + 12..record + 16]
            .copy_from_slice(&(entry.compressed_length as i32).to_le_bytes());
    }

    out
}

pub fn build_container(type_tag: &[u8; 4], entries: &[RawEntry]) -> Vec<u8> {
    build_container_with(type_tag, &[], 16, entries)
}

/// Seed bytes and padding for a stream with `base` seed bytes.
pub fn stream_prologue(data: &[u8], base: usize) -> BitWriter {
    let mut writer = BitWriter::new();
    writer.write_bytes(&data[..base]);
    writer.write_bytes(&vec![0u8; base.next_multiple_of(4) - base]);
    writer.reseed();
    writer
}

/// Literal-only stream for any variant without a code table.
pub fn literal_stream(data: &[u8], base: usize) -> Vec<u8> {
    let mut writer = stream_prologue(data, base);
    for &byte in &data[base..] {
        writer.write_bit(true);
        writer.write_byte(byte);
    }
    writer.into_vec()
}

/// Bitmap info block.
pub fn info_block(width: i16, height: i16, bpp: u8) -> Vec<u8> {
    let mut data = vec![0u8; 0x20];
    data[4..6].copy_from_slice(&width.to_le_bytes());
    data[6..8].copy_from_slice(&height.to_le_bytes());
    data[12] = bpp;
    data
}
