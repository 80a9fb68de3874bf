use log::debug;

use super::{PackResult, Placement, SpriteDescriptor, canvas_extent, exceeds};
use crate::error::PackError;

/// Shelf layout: sprites flow left to right and wrap into a new row when
/// the current one runs out of width. Sprites must already be ordered.
pub(super) fn pack_rows<P>(
    sprites: Vec<SpriteDescriptor<P>>,
    padding: u32,
    max_size: u32,
) -> Result<PackResult<P>, PackError> {
    let overflow = || PackError::CapacityExceeded { max_size };

    let mut placements = Vec::with_capacity(sprites.len());
    let mut cursor_x = padding;
    let mut cursor_y = padding;
    let mut row_height = 0u32;
    let mut max_width = 0u32;
    let mut max_height = 0u32;

    for sprite in sprites {
        let padded_w = sprite.width.checked_add(padding).ok_or_else(overflow)?;
        let padded_h = sprite.height.checked_add(padding).ok_or_else(overflow)?;

        if exceeds(cursor_x, padded_w, max_size) {
            cursor_x = padding;
            cursor_y = cursor_y.saturating_add(row_height);
            row_height = 0;
        }

        // A sprite wider than an empty row can never be placed
        if exceeds(cursor_x, padded_w, max_size) || exceeds(cursor_y, padded_h, max_size) {
            return Err(overflow());
        }

        debug!(
            "Row placement '{}' ({}x{}) at ({}, {})",
            sprite.key, sprite.width, sprite.height, cursor_x, cursor_y
        );

        let (x, y) = (cursor_x, cursor_y);
        max_width = max_width.max(x + padded_w);
        max_height = max_height.max(y + padded_h);
        row_height = row_height.max(padded_h);
        cursor_x = x + padded_w;

        placements.push(Placement::place(sprite, x, y, None));
    }

    Ok(PackResult {
        placements,
        width: canvas_extent(max_width, max_size),
        height: canvas_extent(max_height, max_size),
    })
}
