mod phaser;
mod png;
mod tiled;

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::atlas::Atlas;
use crate::cli::OutputFormat;
use crate::error::SheetpackError;

pub use png::save_atlas_image;

/// What goes into the metadata file besides the atlas itself
#[derive(Debug, Clone, Copy)]
pub struct MetadataOptions<'a> {
    pub format: OutputFormat,
    /// Atlas image file name as referenced from the metadata
    pub image: &'a str,
    /// Scale factor recorded in the metadata only
    pub scale: f32,
    /// Emit grid cell coordinates per frame
    pub grid_metadata: bool,
}

/// Render atlas metadata in the requested format
pub fn render_metadata(atlas: &Atlas, options: &MetadataOptions) -> Result<String> {
    match options.format {
        OutputFormat::PhaserHash => phaser::render_hash(atlas, options),
        OutputFormat::PhaserArray => phaser::render_array(atlas, options),
        OutputFormat::Tiled => tiled::render_tileset(atlas, options),
    }
}

/// Write atlas metadata file
pub fn write_metadata(atlas: &Atlas, path: &Path, options: &MetadataOptions) -> Result<()> {
    let content = render_metadata(atlas, options)?;

    fs::write(path, content).map_err(|e| SheetpackError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
