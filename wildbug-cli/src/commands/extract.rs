//! Extract command implementation.

use crate::utils::{FileReader, create_progress_bar, open_container};
use std::path::Path;
use tracing::info;
use wildbug_archive::BitmapInfo;
use wildbug_archive::wbm::{ALPHA_ID, INFO_ID, PIXELS_ID, TYPE_NAME};
use wildbug_core::WildbugError;
use wildbug_wpx::PixelLayout;

/// Image layouts for the planes of a bitmap container.
fn bitmap_layouts(
    reader: &mut FileReader,
) -> Result<Option<(PixelLayout, PixelLayout)>, Box<dyn std::error::Error>> {
    if reader.type_name() != TYPE_NAME || !reader.contains(INFO_ID) {
        return Ok(None);
    }
    let info = BitmapInfo::parse(&reader.read(INFO_ID)?)?;
    Ok(Some((info.pixel_layout()?, info.alpha_layout())))
}

pub fn cmd_extract(
    file: &Path,
    type_name: Option<&str>,
    output: &Path,
    ids: &[u8],
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = open_container(file, type_name)?;

    let ids: Vec<u8> = if ids.is_empty() {
        reader.entries().iter().map(|e| e.id).collect()
    } else {
        for &id in ids {
            if !reader.contains(id) {
                return Err(WildbugError::entry_not_found(id).into());
            }
        }
        ids.to_vec()
    };

    let layouts = bitmap_layouts(&mut reader)?;
    std::fs::create_dir_all(output)?;

    let pb = create_progress_bar(ids.len() as u64, progress);
    for id in ids {
        pb.set_message(format!("entry {id}"));
        let data = match (id, layouts) {
            (PIXELS_ID, Some((pixels, _))) => reader.read_image(id, pixels)?,
            (ALPHA_ID, Some((_, alpha))) => reader.read_image(id, alpha)?,
            _ => reader.read(id)?,
        };

        let path = output.join(format!("{id}.bin"));
        std::fs::write(&path, &data)?;
        info!(id, bytes = data.len(), path = %path.display(), "extracted entry");
        pb.inc(1);
    }
    pb.finish_with_message("done");

    Ok(())
}
