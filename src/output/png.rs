use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::ImageFormat;
use log::debug;

use crate::atlas::Atlas;
use crate::cli::CompressionLevel;
use crate::error::SheetpackError;

/// Save atlas image as PNG, optionally recompressed with oxipng
pub fn save_atlas_image(
    atlas: &Atlas,
    path: &Path,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    let mut png_data = Cursor::new(Vec::new());
    atlas
        .image
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| SheetpackError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;
    let png_data = png_data.into_inner();

    let output_data = match compress {
        Some(level) => {
            let opts = match level {
                CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
                CompressionLevel::Max => oxipng::Options::max_compression(),
            };
            let compressed = oxipng::optimize_from_memory(&png_data, &opts).map_err(|e| {
                SheetpackError::PngCompress {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
            debug!(
                "Compressed PNG from {} to {} bytes",
                png_data.len(),
                compressed.len()
            );
            compressed
        }
        None => png_data,
    };

    fs::write(path, output_data).map_err(|e| SheetpackError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
