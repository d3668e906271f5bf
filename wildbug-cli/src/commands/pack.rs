//! Pack command implementation.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;
use wildbug_archive::WpxWriter;

pub fn cmd_pack(
    output: &Path,
    type_name: &str,
    entries: &[(u8, PathBuf)],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = WpxWriter::new(type_name)?;
    for (id, path) in entries {
        let data = std::fs::read(path)?;
        debug!(id, bytes = data.len(), path = %path.display(), "adding entry");
        writer.add_entry(*id, data)?;
    }

    let mut out = BufWriter::new(File::create(output)?);
    writer.write(&mut out)?;
    out.into_inner().map_err(|e| e.into_error())?;

    println!(
        "Created {} ({}, {} entries)",
        output.display(),
        type_name,
        writer.len()
    );
    Ok(())
}
