use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::cli::{ResizeFilter, ResizeMode};

/// How sprites are resized before trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Side of the square target box in pixels
    pub size: u32,
    pub mode: ResizeMode,
    pub filter: ResizeFilter,
}

impl ResizeFilter {
    pub fn to_image_filter(self) -> FilterType {
        match self {
            ResizeFilter::Lanczos => FilterType::Lanczos3,
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Linear => FilterType::Triangle,
        }
    }
}

fn scaled(length: u32, scale: f64) -> u32 {
    ((f64::from(length) * scale).round() as u32).max(1)
}

/// Resize an image into a `size` x `size` box
pub fn resize_sprite(img: RgbaImage, options: &ResizeOptions) -> RgbaImage {
    let (w, h) = img.dimensions();
    let size = options.size.max(1);
    let filter = options.filter.to_image_filter();

    if w == 0 || h == 0 {
        return img;
    }

    let scale_x = f64::from(size) / f64::from(w);
    let scale_y = f64::from(size) / f64::from(h);

    match options.mode {
        ResizeMode::Stretch => imageops::resize(&img, size, size, filter),
        ResizeMode::Contain => {
            let scale = scale_x.min(scale_y);
            imageops::resize(&img, scaled(w, scale).min(size), scaled(h, scale).min(size), filter)
        }
        ResizeMode::Cover => {
            let scale = scale_x.max(scale_y);
            let (new_w, new_h) = (scaled(w, scale).max(size), scaled(h, scale).max(size));
            let resized = imageops::resize(&img, new_w, new_h, filter);
            imageops::crop_imm(&resized, (new_w - size) / 2, (new_h - size) / 2, size, size)
                .to_image()
        }
    }
}
