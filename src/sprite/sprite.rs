use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::manifest::Keyed;
use crate::packing::GridCell;

/// Trimming information to reconstruct original sprite positioning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TrimInfo {
    /// Pixels trimmed from left edge
    pub offset_x: u32,
    /// Pixels trimmed from top edge
    pub offset_y: u32,
    /// Width before trimming
    pub source_width: u32,
    /// Height before trimming
    pub source_height: u32,
    /// Width after trimming
    pub trimmed_width: u32,
    /// Height after trimming
    pub trimmed_height: u32,
}

impl TrimInfo {
    /// TrimInfo for a sprite that kept its full frame
    pub fn untrimmed(width: u32, height: u32) -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            source_width: width,
            source_height: height,
            trimmed_width: width,
            trimmed_height: height,
        }
    }

    /// Returns true if any transparent border was removed
    pub fn was_trimmed(&self) -> bool {
        self.trimmed_width != self.source_width || self.trimmed_height != self.source_height
    }
}

/// A decoded sprite ready to be packed
#[derive(Debug, Clone)]
pub struct SourceSprite {
    /// File the sprite was read from
    pub path: PathBuf,
    /// Frame key: path relative to the input base, `/`-separated, no extension
    pub key: String,
    /// Path relative to the input base with its extension
    pub file_name: String,
    /// Pixels after resizing and trimming
    pub image: RgbaImage,
    pub trim_info: TrimInfo,
}

impl SourceSprite {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl Keyed for SourceSprite {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Result of placing a sprite in the atlas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackedSprite {
    pub key: String,
    pub file_name: String,
    /// Position in atlas (x coordinate)
    pub x: u32,
    /// Position in atlas (y coordinate)
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub trim_info: TrimInfo,
    /// Cell occupancy when packed on a grid
    #[serde(skip)]
    pub grid: Option<GridCell>,
}
