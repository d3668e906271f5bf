//! WBM bitmap support.
//!
//! A WBM file is a WPX container of type `BMP`:
//!
//! | Id | Contents                                           |
//! |----|----------------------------------------------------|
//! | 16 | info block: width, height, bits per pixel          |
//! | 17 | pixel plane, rows padded to 4 bytes                |
//! | 19 | optional 8-bit alpha plane, rows padded to 4 bytes |
//!
//! Both planes are image entries; their [`PixelLayout`] follows from the
//! info block.

use crate::wpx::{WpxReader, WpxWriter};
use std::io::{Read, Seek};
use wildbug_core::{Result, WildbugError};
use wildbug_wpx::PixelLayout;

/// WPX type tag of bitmap files.
pub const TYPE_NAME: &str = "BMP";
/// Entry id of the info block.
pub const INFO_ID: u8 = 16;
/// Entry id of the pixel plane.
pub const PIXELS_ID: u8 = 17;
/// Entry id of the alpha plane.
pub const ALPHA_ID: u8 = 19;

/// Smallest info block that holds every field we read.
const INFO_MIN_LEN: usize = 13;

fn align4(n: usize) -> usize {
    (n + 3) & !3
}

/// Bitmap metadata from the info entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapInfo {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Bits per pixel.
    pub bpp: u8,
}

impl BitmapInfo {
    /// Parse the info block.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < INFO_MIN_LEN {
            return Err(WildbugError::invalid_header(format!(
                "bitmap info is {} bytes, need {INFO_MIN_LEN}",
                data.len()
            )));
        }

        let width = i16::from_le_bytes([data[4], data[5]]);
        let height = i16::from_le_bytes([data[6], data[7]]);
        if width <= 0 || height <= 0 {
            return Err(WildbugError::invalid_header(format!(
                "bitmap size {width}x{height}"
            )));
        }

        Ok(Self {
            width: width as usize,
            height: height as usize,
            bpp: data[12],
        })
    }

    /// Layout of the pixel plane.
    pub fn pixel_layout(&self) -> Result<PixelLayout> {
        let w = self.width;
        let (base_length, stride) = match self.bpp {
            1 => (1, (w + 7) >> 3),
            4 => (1, (w + 1) >> 1),
            8 => (1, w),
            16 => (2, 2 * w),
            24 => (3, 3 * w),
            32 => (4, 4 * w),
            bpp => return Err(WildbugError::UnsupportedPixelFormat { bpp }),
        };
        Ok(PixelLayout::new(base_length, align4(stride)))
    }

    /// Layout of the alpha plane.
    pub fn alpha_layout(&self) -> PixelLayout {
        PixelLayout::new(1, align4(self.width))
    }
}

/// A decoded WBM bitmap.
#[derive(Debug, Clone)]
pub struct WbmImage {
    /// Parsed info block.
    pub info: BitmapInfo,
    /// Info block as stored.
    pub info_raw: Vec<u8>,
    /// Pixel plane, `pixel_layout().stride` bytes per row.
    pub pixels: Vec<u8>,
    /// Alpha plane, if present.
    pub alpha: Option<Vec<u8>>,
}

impl WbmImage {
    /// Open a WBM file.
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut wpx = WpxReader::new(reader, TYPE_NAME)?;
        Self::read(&mut wpx)
    }

    /// Read the bitmap from an open `BMP` container.
    pub fn read<R: Read + Seek>(wpx: &mut WpxReader<R>) -> Result<Self> {
        let info_raw = wpx.read(INFO_ID)?;
        let info = BitmapInfo::parse(&info_raw)?;
        let layout = info.pixel_layout()?;

        tracing::debug!(
            width = info.width,
            height = info.height,
            bpp = info.bpp,
            base_length = layout.base_length,
            stride = layout.stride,
            "reading WBM bitmap"
        );

        let pixels = wpx.read_image(PIXELS_ID, layout)?;
        let alpha = if wpx.contains(ALPHA_ID) {
            Some(wpx.read_image(ALPHA_ID, info.alpha_layout())?)
        } else {
            None
        };

        Ok(Self {
            info,
            info_raw,
            pixels,
            alpha,
        })
    }

    /// Pixel plane rows.
    pub fn pixel_rows(&self) -> Result<impl Iterator<Item = &[u8]>> {
        let stride = self.info.pixel_layout()?.stride;
        Ok(self.pixels.chunks(stride.max(1)).take(self.info.height))
    }

    /// Build a stored container holding the same entries.
    pub fn to_wpx(&self) -> Result<WpxWriter> {
        let mut writer = WpxWriter::new(TYPE_NAME)?;
        writer.add_entry(INFO_ID, self.info_raw.clone())?;
        writer.add_entry(PIXELS_ID, self.pixels.clone())?;
        if let Some(alpha) = &self.alpha {
            writer.add_entry(ALPHA_ID, alpha.clone())?;
        }
        Ok(writer)
    }
}
