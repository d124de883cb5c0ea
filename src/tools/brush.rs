use serde::{Deserialize, Serialize};

use crate::grid::Coord;

/// Largest radius offered when no explicit limit is configured
pub const DEFAULT_MAX_BRUSH_RADIUS: usize = 5;

/// Chebyshev radius around the target cell that a tool also affects.
/// `0` means the target cell only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrushRadius(usize);

impl BrushRadius {
    pub const SINGLE_CELL: BrushRadius = BrushRadius(0);

    /// Clamps `radius` into `[0, max]`
    pub fn clamped(radius: usize, max: usize) -> Self {
        Self(radius.min(max))
    }

    /// Converts a 1-based brush size (1 = single cell) into a radius
    pub fn from_brush_size(size: usize, max: usize) -> Self {
        Self::clamped(size.saturating_sub(1), max)
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn brush_size(self) -> usize {
        self.0 + 1
    }
}

/// Cells covered by a brush of `radius` centered on `center` in a
/// `size x size` grid.
///
/// The center comes first and is yielded exactly once; the remaining cells
/// follow in row-major order and never leave `[0, size)`.
pub fn footprint(center: Coord, radius: BrushRadius, size: usize) -> impl Iterator<Item = Coord> {
    let r = radius.get() as isize;
    let ring = (-r..=r)
        .flat_map(move |d_row| (-r..=r).map(move |d_col| (d_row, d_col)))
        .filter(|&offset| offset != (0, 0))
        .filter_map(move |(d_row, d_col)| center.offset(d_row, d_col, size));

    std::iter::once(center).chain(ring)
}
