use image::RgbaImage;

use super::TrimInfo;

/// Bounding box of pixels with non-zero alpha as (min_x, min_y, max_x, max_y)
fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, pixel)| pixel[3] > 0)
        .fold(None, |bounds, (x, y, _)| match bounds {
            None => Some((x, y, x, y)),
            Some((min_x, min_y, max_x, max_y)) => {
                Some((min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)))
            }
        })
}

/// Trim transparent borders from an image.
///
/// A fully transparent (or empty) image collapses to a single transparent
/// pixel so it still occupies a slot in the atlas.
pub fn trim_sprite(image: &RgbaImage) -> (RgbaImage, TrimInfo) {
    let (width, height) = image.dimensions();

    let Some((min_x, min_y, max_x, max_y)) = opaque_bounds(image) else {
        return (
            RgbaImage::new(1, 1),
            TrimInfo {
                offset_x: 0,
                offset_y: 0,
                source_width: width,
                source_height: height,
                trimmed_width: 1,
                trimmed_height: 1,
            },
        );
    };

    let trimmed_width = max_x - min_x + 1;
    let trimmed_height = max_y - min_y + 1;

    if trimmed_width == width && trimmed_height == height {
        return (image.clone(), TrimInfo::untrimmed(width, height));
    }

    let trimmed = image::imageops::crop_imm(image, min_x, min_y, trimmed_width, trimmed_height)
        .to_image();

    let trim_info = TrimInfo {
        offset_x: min_x,
        offset_y: min_y,
        source_width: width,
        source_height: height,
        trimmed_width,
        trimmed_height,
    };

    (trimmed, trim_info)
}
