//! Info command implementation.

use crate::utils::open_container;
use std::path::Path;
use wildbug_archive::BitmapInfo;
use wildbug_archive::wbm::{ALPHA_ID, INFO_ID, PIXELS_ID, TYPE_NAME};

pub fn cmd_info(file: &Path, type_name: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = open_container(file, type_name)?;
    let header = reader.header().clone();
    let entries = reader.entries();
    let total_size: usize = entries.iter().map(|e| e.uncompressed_length).sum();
    let total_stored: usize = entries.iter().map(|e| e.stored_length()).sum();
    let compressed = entries.iter().filter(|e| e.is_compressed()).count();

    println!("Container Information");
    println!("=====================");
    println!("File: {}", file.display());
    println!("Type: {}", reader.type_name());
    println!("Size: {} bytes", reader.file_len());
    println!("Index offset: {:#x}", header.index_offset);
    println!("Entry record length: {:#x}", header.entry_length);
    println!(
        "Header fields: {:#x} {:#x} {:#x}",
        header.unknown1, header.unknown2, header.unknown3
    );

    println!();
    println!("Contents:");
    println!("  Entries: {} ({} compressed)", entries.len(), compressed);
    println!("  Total size: {} bytes", total_size);
    println!("  Stored size: {} bytes", total_stored);

    if reader.type_name() == TYPE_NAME && reader.contains(INFO_ID) {
        let info = BitmapInfo::parse(&reader.read(INFO_ID)?)?;
        println!();
        println!("Bitmap:");
        println!("  Dimensions: {}x{}", info.width, info.height);
        println!("  Bits per pixel: {}", info.bpp);
        match info.pixel_layout() {
            Ok(layout) => println!(
                "  Pixel layout: base {} / stride {}",
                layout.base_length, layout.stride
            ),
            Err(e) => println!("  Pixel layout: {}", e),
        }
        if reader.contains(PIXELS_ID) {
            println!("  Pixel plane: entry {}", PIXELS_ID);
        }
        if reader.contains(ALPHA_ID) {
            let alpha = info.alpha_layout();
            println!(
                "  Alpha plane: entry {} (base {} / stride {})",
                ALPHA_ID, alpha.base_length, alpha.stride
            );
        }
    }

    Ok(())
}
