use serde::{Deserialize, Serialize};

use crate::cli::{OutputFormat, ResizeFilter, ResizeMode};

/// Configuration for resizing sprites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Side of the square target box in pixels
    pub size: u32,
    pub mode: ResizeMode,
    pub filter: ResizeFilter,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            size: 64,
            mode: ResizeMode::Contain,
            filter: ResizeFilter::Lanczos,
        }
    }
}

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Sheetpack configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetConfig {
    /// Input glob pattern, directory, or file
    pub input: Option<String>,
    /// Output atlas image path
    pub output: String,
    /// Metadata format
    pub format: OutputFormat,
    /// Maximum atlas width and height (power of two)
    pub max_size: u32,
    /// Padding between sprites in pixels
    pub padding: u32,
    /// Extra spacing added to padding
    pub spacing: u32,
    /// Enable sprite trimming (remove transparent borders)
    pub trim: bool,
    /// Scale factor recorded in metadata
    pub scale: f32,
    /// Resize configuration (optional)
    pub resize: Option<ResizeConfig>,
    /// Grid cell size; enables grid layout when set
    pub grid_size: Option<u32>,
    /// Include grid cell coordinates in the frame metadata
    pub grid_metadata: bool,
    /// Order sprites by key instead of size
    pub stable_order: bool,
    /// Reuse the manifest order from the previous build
    pub preserve_ids: bool,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: "atlas.png".to_string(),
            format: OutputFormat::PhaserHash,
            max_size: 2048,
            padding: 2,
            spacing: 0,
            trim: true,
            scale: 1.0,
            resize: None,
            grid_size: None,
            grid_metadata: false,
            stable_order: false,
            preserve_ids: false,
            compress: None,
        }
    }
}
