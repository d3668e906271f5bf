//! List command implementation.

use crate::utils::{open_container, savings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wildbug_archive::WpxEntry;

/// JSON serializable entry record.
#[derive(Debug, Serialize, Deserialize)]
struct EntryJson {
    id: u8,
    format: u8,
    position: u64,
    uncompressed_length: usize,
    compressed_length: usize,
    compressed: bool,
}

impl EntryJson {
    fn from_entry(entry: &WpxEntry) -> Self {
        Self {
            id: entry.id,
            format: entry.format,
            position: entry.position,
            uncompressed_length: entry.uncompressed_length,
            compressed_length: entry.compressed_length,
            compressed: entry.is_compressed(),
        }
    }
}

/// JSON output for a container listing.
#[derive(Debug, Serialize, Deserialize)]
struct ContainerListJson {
    file: String,
    type_tag: String,
    entries: Vec<EntryJson>,
}

pub fn cmd_list(
    file: &Path,
    type_name: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = open_container(file, type_name)?;

    if json {
        let listing = ContainerListJson {
            file: file.display().to_string(),
            type_tag: reader.type_name(),
            entries: reader.entries().iter().map(EntryJson::from_entry).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!(
        "{:>4} {:>6} {:>10} {:>10} {:>10} {:>7}  Storage",
        "Id", "Format", "Position", "Size", "Stored", "Saved"
    );
    println!("{}", "-".repeat(62));

    let mut total_size = 0usize;
    let mut total_stored = 0usize;
    for entry in reader.entries() {
        let stored = entry.stored_length();
        let (storage, ratio) = if entry.is_compressed() {
            (
                "compressed",
                format!("{:.1}%", savings(entry.uncompressed_length, stored)),
            )
        } else {
            ("stored", "-".to_string())
        };
        println!(
            "{:>4} {:>#6x} {:>#10x} {:>10} {:>10} {:>7}  {}",
            entry.id,
            entry.format,
            entry.position,
            entry.uncompressed_length,
            stored,
            ratio,
            storage
        );
        total_size += entry.uncompressed_length;
        total_stored += stored;
    }

    println!("{}", "-".repeat(62));
    println!(
        "{:>4} {:>6} {:>10} {:>10} {:>10} {:>6.1}%  {} entries",
        "",
        "",
        "",
        total_size,
        total_stored,
        savings(total_size, total_stored),
        reader.entries().len()
    );

    Ok(())
}
