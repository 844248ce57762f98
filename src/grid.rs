//! Conversions between grid cells and pixel space, plus the horizontal
//! collision boxes that bridge the two.

use rand::Rng;

use crate::config::{COL_WIDTH, NUM_COLS, NUM_ROWS, ROW_HEIGHT, TOUCH_Y_OFFSET};

/// A lane (row) and column index on the playfield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: i32,
    pub col: i32,
}

impl GridPosition {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Pull the position back inside the playfield.  Already-valid positions
    /// are returned unchanged.
    pub fn clamped(self) -> Self {
        Self {
            row: self.row.clamp(0, NUM_ROWS - 1),
            col: self.col.clamp(0, NUM_COLS - 1),
        }
    }

    pub fn is_on_grid(self) -> bool {
        (0..NUM_ROWS).contains(&self.row) && (0..NUM_COLS).contains(&self.col)
    }

    /// Top-left pixel of a sprite standing in this cell; `y_offset` is the
    /// sprite's vertical correction.
    pub fn to_pixels(self, y_offset: f32) -> PixelPosition {
        PixelPosition {
            x: self.col as f32 * COL_WIDTH,
            y: self.row as f32 * ROW_HEIGHT + y_offset,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelPosition {
    pub x: f32,
    pub y: f32,
}

/// Horizontal extent used for hit tests.  Entities only ever collide with
/// entities in the same lane, so no vertical extent is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionBox {
    pub left: f32,
    pub right: f32,
}

impl CollisionBox {
    /// A full tile starting at `x`.
    pub fn tile_at(x: f32) -> Self {
        Self {
            left: x,
            right: x + COL_WIDTH,
        }
    }

    /// A tile starting at `x`, shrunk by `inset` on both sides.
    pub fn inset_tile_at(x: f32, inset: f32) -> Self {
        Self {
            left: x + inset,
            right: x + COL_WIDTH - inset,
        }
    }

    /// Open-interval overlap: boxes that merely touch do not collide.
    pub fn overlaps(&self, other: &CollisionBox) -> bool {
        self.left < other.right && other.left < self.right
    }
}

/// Resolve a point on the canvas (e.g. a touch) to the cell under it.
pub fn pixels_to_row_and_column(x: f32, y: f32) -> GridPosition {
    GridPosition {
        row: ((y + TOUCH_Y_OFFSET) / ROW_HEIGHT).floor() as i32,
        col: (x / COL_WIDTH).floor() as i32,
    }
}

/// Uniform random integer in `min..=max`.
pub fn random_integer<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}
