/// Cells per row and per column.
pub const TILE_COUNT: i32 = 20;

/// Side of the square play field, in abstract pixels.
pub const CANVAS_SIZE: i32 = 400;

/// Gap left between neighbouring cells when they are filled.
pub const TILE_MARGIN: i32 = 2;

/// Pixel stride between cell origins.
pub const fn tile_stride() -> i32 {
    CANVAS_SIZE / TILE_COUNT
}

/// Filled side of one cell, leaving a visible gap to its neighbours.
pub const fn tile_size() -> i32 {
    tile_stride() - TILE_MARGIN
}

/// A cell coordinate. Only valid on the grid once `in_bounds` holds;
/// the snake head may step outside for one tick before it is caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        (0..TILE_COUNT).contains(&self.x) && (0..TILE_COUNT).contains(&self.y)
    }

    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
