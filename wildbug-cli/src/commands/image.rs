//! Image command implementation.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;
use wildbug_archive::WbmImage;

/// JSON description written next to the decoded planes.
#[derive(Debug, Serialize, Deserialize)]
struct ImageInfoJson {
    width: usize,
    height: usize,
    bpp: u8,
    base_length: usize,
    stride: usize,
    pixels: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alpha: Option<String>,
}

pub fn cmd_image(file: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let image = WbmImage::open(BufReader::new(File::open(file)?))?;
    let layout = image.info.pixel_layout()?;

    std::fs::create_dir_all(output)?;
    std::fs::write(output.join("pixels.bin"), &image.pixels)?;
    if let Some(alpha) = &image.alpha {
        std::fs::write(output.join("alpha.bin"), alpha)?;
    }

    let description = ImageInfoJson {
        width: image.info.width,
        height: image.info.height,
        bpp: image.info.bpp,
        base_length: layout.base_length,
        stride: layout.stride,
        pixels: "pixels.bin".to_string(),
        alpha: image.alpha.as_ref().map(|_| "alpha.bin".to_string()),
    };
    std::fs::write(
        output.join("info.json"),
        serde_json::to_string_pretty(&description)?,
    )?;

    info!(
        width = image.info.width,
        height = image.info.height,
        alpha = image.alpha.is_some(),
        "decoded bitmap planes"
    );
    println!(
        "{}: {}x{} {} bpp{} -> {}",
        file.display(),
        image.info.width,
        image.info.height,
        image.info.bpp,
        if image.alpha.is_some() { " + alpha" } else { "" },
        output.display()
    );

    Ok(())
}
