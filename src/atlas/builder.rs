use anyhow::Result;
use image::imageops;
use log::{debug, info};

use super::Atlas;
use crate::error::SheetpackError;
use crate::packing::{Layout, Packer, SpriteDescriptor};
use crate::sprite::{PackedSprite, SourceSprite};

/// Packs loaded sprites and composites them into a single atlas image
pub struct AtlasBuilder {
    packer: Packer,
}

impl AtlasBuilder {
    pub fn new(max_size: u32) -> Self {
        Self {
            packer: Packer::new(max_size),
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.packer = self.packer.padding(padding);
        self
    }

    pub fn grid_size(mut self, grid_size: Option<u32>) -> Self {
        if let Some(size) = grid_size {
            self.packer = self.packer.grid_size(size);
        }
        self
    }

    pub fn stable_order(mut self, stable: bool) -> Self {
        self.packer = self.packer.stable_order(stable);
        self
    }

    /// Place sprites in the order given (e.g. reconciled against a manifest)
    pub fn preserve_input_order(mut self) -> Self {
        self.packer = self.packer.preserve_input_order();
        self
    }

    pub fn packer(&self) -> &Packer {
        &self.packer
    }

    /// Build the atlas from the given sprites
    pub fn build(&self, sprites: Vec<SourceSprite>) -> Result<Atlas> {
        let descriptors: Vec<_> = sprites
            .into_iter()
            .map(|s| SpriteDescriptor::new(s.key.clone(), s.width(), s.height(), s))
            .collect();

        if !self.packer.can_fit(&descriptors) {
            debug!(
                "Pre-flight failed: {} px needed, {} px available",
                self.packer.calculate_required_area(&descriptors),
                u64::from(self.packer.max_size).pow(2)
            );
            return Err(SheetpackError::from(self.packer.capacity_error()).into());
        }

        let packed = self.packer.pack(descriptors).map_err(SheetpackError::from)?;

        let mut atlas = Atlas::new(packed.width, packed.height);
        atlas.occupancy = packed.occupancy();
        if let Layout::Grid { grid_size } = self.packer.layout {
            atlas.grid_size = Some(grid_size);
        }

        for placement in packed.placements {
            let source = placement.payload;

            imageops::overlay(
                &mut atlas.image,
                &source.image,
                i64::from(placement.x),
                i64::from(placement.y),
            );

            atlas.sprites.push(PackedSprite {
                key: placement.key,
                file_name: source.file_name,
                x: placement.x,
                y: placement.y,
                width: placement.width,
                height: placement.height,
                trim_info: source.trim_info,
                grid: placement.grid,
            });
        }

        info!(
            "Atlas: {}x{} with {} sprites ({:.1}% efficiency)",
            atlas.width,
            atlas.height,
            atlas.sprites.len(),
            atlas.occupancy * 100.0,
        );

        Ok(atlas)
    }
}
