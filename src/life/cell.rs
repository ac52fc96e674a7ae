//! Cell coordinates on the unbounded board

use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight Moore-neighborhood offsets, row by row from the top-left.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// A coordinate on the board. Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`, or `None` if either axis would overflow.
    #[inline]
    pub fn checked_offset(self, dx: i64, dy: i64) -> Option<Cell> {
        Some(Cell {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Vector from `origin` to `self`, or `None` if it does not fit in a coordinate.
    #[inline]
    pub fn checked_offset_from(self, origin: Cell) -> Option<Cell> {
        Some(Cell {
            x: self.x.checked_sub(origin.x)?,
            y: self.y.checked_sub(origin.y)?,
        })
    }

    /// All eight neighbors, or `None` if any of them is unrepresentable.
    pub fn neighbors(self) -> Option<[Cell; 8]> {
        let mut out = [Cell::ORIGIN; 8];
        for (slot, &(dx, dy)) in out.iter_mut().zip(NEIGHBOR_OFFSETS.iter()) {
            *slot = self.checked_offset(dx, dy)?;
        }
        Some(out)
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Cell { x, y }
    }
}

impl From<Cell> for (i64, i64) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive axis-aligned bounds of a set of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Cell,
    pub max: Cell,
}

impl BoundingBox {
    /// Bounds of `cells`, or `None` when the iterator is empty.
    pub fn of<'a, I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let mut iter = cells.into_iter();
        let first = *iter.next()?;
        let mut bounds = BoundingBox { min: first, max: first };
        for cell in iter {
            bounds.min.x = bounds.min.x.min(cell.x);
            bounds.min.y = bounds.min.y.min(cell.y);
            bounds.max.x = bounds.max.x.max(cell.x);
            bounds.max.y = bounds.max.y.max(cell.y);
        }
        Some(bounds)
    }

    /// Columns covered, saturating at `u64::MAX` for a box spanning every x.
    pub fn width(&self) -> u64 {
        self.max.x.abs_diff(self.min.x).saturating_add(1)
    }

    /// Rows covered, saturating like [`width`](Self::width).
    pub fn height(&self) -> u64 {
        self.max.y.abs_diff(self.min.y).saturating_add(1)
    }

    /// Number of cells inside the box, saturating.
    pub fn area(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min.x..=self.max.x).contains(&cell.x) && (self.min.y..=self.max.y).contains(&cell.y)
    }

    /// Midpoint of the box, rounded toward negative infinity on each axis.
    pub fn center(&self) -> Cell {
        Cell {
            x: midpoint(self.min.x, self.max.x),
            y: midpoint(self.min.y, self.max.y),
        }
    }
}

#[inline]
fn midpoint(a: i64, b: i64) -> i64 {
    // (a + b) / 2 floored, without the intermediate sum overflowing
    (a >> 1) + (b >> 1) + (a & b & 1)
}
