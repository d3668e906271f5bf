//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use wildbug_archive::WpxReader;
use wildbug_core::Result;

/// A container opened from disk.
pub type FileReader = WpxReader<BufReader<File>>;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Open a container, checking its type tag when one is given.
pub fn open_container(path: &Path, type_name: Option<&str>) -> Result<FileReader> {
    let reader = BufReader::new(File::open(path)?);
    match type_name {
        Some(name) => WpxReader::new(reader, name),
        None => WpxReader::open(reader),
    }
}

/// Parse an `ID=PATH` pack argument.
pub fn parse_entry_arg(arg: &str) -> std::result::Result<(u8, PathBuf), String> {
    let (id, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=PATH, got '{arg}'"))?;
    let id = id
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid entry id '{id}': {e}"))?;
    if path.is_empty() {
        return Err(format!("missing path for entry {id}"));
    }
    Ok((id, PathBuf::from(path)))
}

/// Space savings of a compressed entry in percent.
pub fn savings(uncompressed: usize, stored: usize) -> f64 {
    if uncompressed == 0 {
        return 0.0;
    }
    (1.0 - stored as f64 / uncompressed as f64) * 100.0
}
