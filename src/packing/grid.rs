use log::debug;

use super::{GridCell, PackResult, Placement, SpriteDescriptor, canvas_extent, exceeds};
use crate::error::PackError;

/// Number of cells needed to hold `length + padding` pixels, and that span in pixels
fn cell_span(length: u32, padding: u32, grid_size: u32) -> Option<(u32, u32)> {
    let cells = length.checked_add(padding)?.div_ceil(grid_size);
    Some((cells, cells.checked_mul(grid_size)?))
}

/// Grid layout: each sprite is given a whole number of cells (its padded
/// size rounded up) and centered inside them. Rows wrap the same way as the
/// shelf layout but the cursor starts at the origin since cells absorb padding.
///
/// Sprites always lie inside the canvas, but centering splits the padding, so
/// a padded box can reach up to `padding / 2` pixels past the right or bottom edge.
pub(super) fn pack_grid<P>(
    sprites: Vec<SpriteDescriptor<P>>,
    padding: u32,
    max_size: u32,
    grid_size: u32,
) -> Result<PackResult<P>, PackError> {
    let overflow = || PackError::GridCapacityExceeded {
        max_size,
        grid_size,
    };

    let mut placements = Vec::with_capacity(sprites.len());
    let mut cursor_x = 0u32;
    let mut cursor_y = 0u32;
    let mut row_height = 0u32;
    let mut max_width = 0u32;
    let mut max_height = 0u32;

    for sprite in sprites {
        let (cells_wide, cell_width) =
            cell_span(sprite.width, padding, grid_size).ok_or_else(overflow)?;
        let (cells_high, cell_height) =
            cell_span(sprite.height, padding, grid_size).ok_or_else(overflow)?;

        if exceeds(cursor_x, cell_width, max_size) {
            cursor_x = 0;
            cursor_y = cursor_y.saturating_add(row_height);
            row_height = 0;
        }

        if exceeds(cursor_x, cell_width, max_size) || exceeds(cursor_y, cell_height, max_size) {
            return Err(overflow());
        }

        let cell = GridCell {
            grid_x: cursor_x / grid_size,
            grid_y: cursor_y / grid_size,
            cells_wide,
            cells_high,
        };
        let x = cursor_x + (cell_width - sprite.width) / 2;
        let y = cursor_y + (cell_height - sprite.height) / 2;

        debug!(
            "Grid placement '{}' ({}x{}) in cell ({}, {}) spanning {}x{}",
            sprite.key,
            sprite.width,
            sprite.height,
            cell.grid_x,
            cell.grid_y,
            cells_wide,
            cells_high
        );

        max_width = max_width.max(cursor_x + cell_width);
        max_height = max_height.max(cursor_y + cell_height);
        row_height = row_height.max(cell_height);
        cursor_x += cell_width;

        placements.push(Placement::place(sprite, x, y, Some(cell)));
    }

    let snap = |extent: u32| extent.div_ceil(grid_size).saturating_mul(grid_size);

    Ok(PackResult {
        placements,
        width: canvas_extent(snap(max_width), max_size),
        height: canvas_extent(snap(max_height), max_size),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_span() {
        assert_eq!(cell_span(20, 2, 32), Some((1, 32)));
        assert_eq!(cell_span(50, 2, 32), Some((2, 64)));
        assert_eq!(cell_span(30, 2, 32), Some((1, 32)));
        assert_eq!(cell_span(31, 2, 32), Some((2, 64)));
        assert_eq!(cell_span(u32::MAX, 1, 32), None);
    }

    #[test]
    fn test_sprite_centered_in_cell() {
        let sprites = vec![SpriteDescriptor::sized("a", 20, 10)];
        let result = pack_grid(sprites, 2, 256, 32).unwrap();
        let p = &result.placements[0];

        // (32 - 20) / 2 = 6, (32 - 10) / 2 = 11
        assert_eq!((p.x, p.y), (6, 11));
        assert_eq!(
            p.grid,
            Some(GridCell {
                grid_x: 0,
                grid_y: 0,
                cells_wide: 1,
                cells_high: 1
            })
        );
        assert_eq!((result.width, result.height), (32, 32));
    }

    #[test]
    fn test_padded_box_may_cross_canvas_edge() {
        let result = pack_grid(vec![SpriteDescriptor::sized("a", 30, 30)], 2, 256, 32).unwrap();
        let p = &result.placements[0];

        assert_eq!((p.x, p.y), (1, 1));
        assert_eq!((result.width, result.height), (32, 32));
        assert!(p.rect().fits_within(result.width, result.height));
        // Right edge of the padded box is 33, one past the 32px canvas
        assert_eq!(p.padded_rect(2).right(), 33);
    }

    #[test]
    fn test_cells_advance_and_wrap() {
        let sprites = vec![
            SpriteDescriptor::sized("big", 50, 50),
            SpriteDescriptor::sized("a", 20, 20),
            SpriteDescriptor::sized("b", 20, 20),
            SpriteDescriptor::sized("c", 20, 20),
        ];
        let result = pack_grid(sprites, 2, 128, 32).unwrap();
        let cells: Vec<_> = result
            .placements
            .iter()
            .filter_map(|p| p.grid.map(|g| (g.grid_x, g.grid_y)))
            .collect();

        // big takes columns 0-1, a and b fill 2 and 3, c wraps below big's row
        assert_eq!(cells, vec![(0, 0), (2, 0), (3, 0), (0, 2)]);
        assert_eq!((result.width, result.height), (128, 128));
    }

    #[test]
    fn test_overflow_reports_grid_mode() {
        let sprites = (0..20)
            .map(|i| SpriteDescriptor::sized(format!("s{}", i), 60, 60))
            .collect();
        let err = pack_grid(sprites, 2, 128, 64).unwrap_err();

        assert_eq!(
            err,
            PackError::GridCapacityExceeded {
                max_size: 128,
                grid_size: 64
            }
        );
        assert!(err.to_string().contains("Grid"));
    }
}
