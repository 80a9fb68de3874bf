use super::Rect;

/// A sprite as seen by the packer: identity, size, and an opaque payload
/// that is carried through to the placement untouched.
#[derive(Debug, Clone)]
pub struct SpriteDescriptor<P> {
    /// Unique key within one packing run
    pub key: String,
    /// Width in pixels (after trimming / resizing)
    pub width: u32,
    /// Height in pixels (after trimming / resizing)
    pub height: u32,
    pub payload: P,
}

impl<P> SpriteDescriptor<P> {
    pub fn new(key: impl Into<String>, width: u32, height: u32, payload: P) -> Self {
        Self {
            key: key.into(),
            width,
            height,
            payload,
        }
    }
}

impl SpriteDescriptor<()> {
    /// Descriptor without payload, handy for layout-only callers
    pub fn sized(key: impl Into<String>, width: u32, height: u32) -> Self {
        Self::new(key, width, height, ())
    }
}

/// Grid cell occupancy of a placement made in grid mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Column of the top-left cell
    pub grid_x: u32,
    /// Row of the top-left cell
    pub grid_y: u32,
    /// Number of cells spanned horizontally (>= 1)
    pub cells_wide: u32,
    /// Number of cells spanned vertically (>= 1)
    pub cells_high: u32,
}

/// Where a sprite ended up in the atlas
#[derive(Debug, Clone)]
pub struct Placement<P> {
    pub key: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Present only when the grid layout was used
    pub grid: Option<GridCell>,
    pub payload: P,
}

impl<P> Placement<P> {
    pub(super) fn place(
        sprite: SpriteDescriptor<P>,
        x: u32,
        y: u32,
        grid: Option<GridCell>,
    ) -> Self {
        Self {
            key: sprite.key,
            x,
            y,
            width: sprite.width,
            height: sprite.height,
            grid,
            payload: sprite.payload,
        }
    }

    /// The sprite's own rectangle in the atlas
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The rectangle including the right/bottom padding gap
    pub fn padded_rect(&self, padding: u32) -> Rect {
        Rect::new(self.x, self.y, self.width + padding, self.height + padding)
    }
}

/// Output of a successful pack
#[derive(Debug, Clone)]
pub struct PackResult<P> {
    /// Placements in the order they were laid out
    pub placements: Vec<Placement<P>>,
    /// Canvas width: a power of two, or 0 for empty input
    pub width: u32,
    /// Canvas height: a power of two, or 0 for empty input
    pub height: u32,
}

impl<P> PackResult<P> {
    pub fn empty() -> Self {
        Self {
            placements: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    /// Fraction of the canvas covered by sprite pixels (0.0 to 1.0)
    pub fn occupancy(&self) -> f64 {
        let total_area = u64::from(self.width) * u64::from(self.height);
        if total_area == 0 {
            return 0.0;
        }
        let used_area: u64 = self.placements.iter().map(|p| p.rect().area()).sum();
        used_area as f64 / total_area as f64
    }
}
