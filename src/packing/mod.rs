mod grid;
mod packer;
mod rect;
mod row;
mod types;

pub use packer::{Layout, Packer, SortOrder, next_power_of_two};
pub use rect::Rect;
pub use types::{GridCell, PackResult, Placement, SpriteDescriptor};

/// True when a span of `extent` pixels starting at `start` runs past `limit`.
fn exceeds(start: u32, extent: u32, limit: u32) -> bool {
    start.checked_add(extent).is_none_or(|end| end > limit)
}

/// Final canvas side: next power of two, never above the configured maximum.
fn canvas_extent(extent: u32, max_size: u32) -> u32 {
    next_power_of_two(extent).min(max_size)
}
