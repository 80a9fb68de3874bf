use log::debug;

use super::grid::pack_grid;
use super::row::pack_rows;
use super::{PackResult, SpriteDescriptor};
use crate::error::PackError;

/// Which placement strategy the packer runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Shelf packing on raw sprite + padding boxes
    #[default]
    Rows,
    /// Every sprite occupies a whole number of `grid_size` cells
    Grid { grid_size: u32 },
}

/// Order in which sprites are fed to the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Largest first: tallest for rows, biggest area for grid
    #[default]
    BySize,
    /// Lexicographic by key, for reproducible builds
    ByKey,
    /// Keep the caller's order (already reconciled against a manifest)
    AsGiven,
}

/// Deterministic sprite packer.
///
/// Configuration is fixed once built; every [`Packer::pack`] call is
/// independent of the previous ones.
#[derive(Debug, Clone)]
pub struct Packer {
    pub max_size: u32,
    pub padding: u32,
    pub layout: Layout,
    pub order: SortOrder,
}

impl Packer {
    /// `max_size` must be a power of two; the canvas is clamped to it, so
    /// any other value yields non power-of-two canvases.
    pub fn new(max_size: u32) -> Self {
        debug_assert!(max_size.is_power_of_two(), "max size {} is not a power of two", max_size);
        Self {
            max_size,
            padding: 0,
            layout: Layout::Rows,
            order: SortOrder::BySize,
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Switch to the fixed-grid layout
    pub fn grid_size(mut self, grid_size: u32) -> Self {
        self.layout = Layout::Grid { grid_size };
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sort by key instead of by size
    pub fn stable_order(mut self, stable: bool) -> Self {
        self.order = if stable {
            SortOrder::ByKey
        } else {
            SortOrder::BySize
        };
        self
    }

    pub fn preserve_input_order(mut self) -> Self {
        self.order = SortOrder::AsGiven;
        self
    }

    /// Lay out all sprites, or fail without any partial result.
    ///
    /// Capacity is checked while placing, so the error surfaces at the first
    /// row that would cross `max_size`.
    pub fn pack<P>(&self, sprites: Vec<SpriteDescriptor<P>>) -> Result<PackResult<P>, PackError> {
        if sprites.is_empty() {
            return Ok(PackResult::empty());
        }

        if let Some(bad) = sprites.iter().find(|s| s.width == 0 || s.height == 0) {
            return Err(PackError::InvalidSize {
                key: bad.key.clone(),
                width: bad.width,
                height: bad.height,
            });
        }

        debug!(
            "Packing {} sprites ({:?}, {:?}, padding {}, max {})",
            sprites.len(),
            self.layout,
            self.order,
            self.padding,
            self.max_size
        );

        match self.layout {
            Layout::Rows => {
                let sprites = self.sorted(sprites, |s| u64::from(s.height));
                pack_rows(sprites, self.padding, self.max_size)
            }
            Layout::Grid { grid_size: 0 } => Err(PackError::ZeroGridSize),
            Layout::Grid { grid_size } => {
                let sprites = self.sorted(sprites, |s| u64::from(s.width) * u64::from(s.height));
                pack_grid(sprites, self.padding, self.max_size, grid_size)
            }
        }
    }

    /// Sum of padded sprite areas. A lower bound on the canvas area needed,
    /// ignoring row and grid waste.
    pub fn calculate_required_area<P>(&self, sprites: &[SpriteDescriptor<P>]) -> u64 {
        let padding = u64::from(self.padding);
        sprites
            .iter()
            .map(|s| (u64::from(s.width) + padding) * (u64::from(s.height) + padding))
            .sum()
    }

    /// Cheap pre-flight check.
    ///
    /// `false` means `pack` will certainly fail. `true` does not guarantee
    /// success: packing wastes space the area estimate does not see.
    pub fn can_fit<P>(&self, sprites: &[SpriteDescriptor<P>]) -> bool {
        let capacity = u64::from(self.max_size) * u64::from(self.max_size);
        if self.calculate_required_area(sprites) > capacity {
            return false;
        }
        sprites
            .iter()
            .all(|s| s.width <= self.max_size && s.height <= self.max_size)
    }

    /// The capacity error this packer raises for its layout
    pub fn capacity_error(&self) -> PackError {
        match self.layout {
            Layout::Rows => PackError::CapacityExceeded {
                max_size: self.max_size,
            },
            Layout::Grid { grid_size } => PackError::GridCapacityExceeded {
                max_size: self.max_size,
                grid_size,
            },
        }
    }

    fn sorted<P>(
        &self,
        mut sprites: Vec<SpriteDescriptor<P>>,
        size: impl Fn(&SpriteDescriptor<P>) -> u64,
    ) -> Vec<SpriteDescriptor<P>> {
        match self.order {
            // Stable sorts: equal sizes keep input order
            SortOrder::BySize => sprites.sort_by(|a, b| size(b).cmp(&size(a))),
            SortOrder::ByKey => sprites.sort_by(|a, b| a.key.cmp(&b.key)),
            SortOrder::AsGiven => {}
        }
        sprites
    }
}

/// Smallest power of two >= n. Returns 1 for 0 and saturates at `u32::MAX`.
pub fn next_power_of_two(n: u32) -> u32 {
    n.max(1).checked_next_power_of_two().unwrap_or(u32::MAX)
}
