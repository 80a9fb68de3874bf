use image::RgbaImage;

use crate::sprite::PackedSprite;

/// A completed texture atlas
#[derive(Debug)]
pub struct Atlas {
    /// Atlas width
    pub width: u32,
    /// Atlas height
    pub height: u32,
    /// Rendered atlas image
    pub image: RgbaImage,
    /// Sprites in placement order
    pub sprites: Vec<PackedSprite>,
    /// Grid cell size when the grid layout was used
    pub grid_size: Option<u32>,
    /// Fraction of the canvas covered by sprites (0.0 to 1.0)
    pub occupancy: f64,
}

impl Atlas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            image: RgbaImage::new(width, height),
            sprites: Vec::new(),
            grid_size: None,
            occupancy: 0.0,
        }
    }

    /// Sprite keys in placement order
    pub fn sprite_order(&self) -> Vec<String> {
        self.sprites.iter().map(|s| s.key.clone()).collect()
    }
}
