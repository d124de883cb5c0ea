use log::debug;

use crate::color::Color;
use crate::error::{GridError, GridResult};

/// Upper bound used when no explicit limit is configured
pub const DEFAULT_MAX_GRID_SIZE: usize = 128;

/// Address of one cell in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offsets this coordinate, returning `None` if it would leave `[0, size)`.
    pub fn offset(self, d_row: isize, d_col: isize, size: usize) -> Option<Coord> {
        let row = self.row.checked_add_signed(d_row).filter(|r| *r < size)?;
        let col = self.col.checked_add_signed(d_col).filter(|c| *c < size)?;
        Some(Coord { row, col })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A full, independent copy of every cell color at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    size: usize,
    cells: Vec<Color>,
}

impl Snapshot {
    pub fn get(&self, coord: Coord) -> Option<Color> {
        if coord.row < self.size && coord.col < self.size {
            Some(self.cells[coord.row * self.size + coord.col])
        } else {
            None
        }
    }
}

/// Square matrix of cell colors.
///
/// The grid is the single source of truth for cell colors; everything else
/// reads it through coordinate accessors. Resizing and clearing are only
/// reachable through [`crate::EditorSession`], which drops history alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    max_size: usize,
    // Row-major, `size * size` entries
    cells: Vec<Color>,
}

impl Grid {
    /// Creates a `size x size` grid filled with `background`.
    pub fn new(size: usize, background: Color) -> GridResult<Self> {
        Self::with_limit(size, background, DEFAULT_MAX_GRID_SIZE)
    }

    /// Creates a grid, validating `size` against a custom upper bound.
    pub fn with_limit(size: usize, background: Color, max_size: usize) -> GridResult<Self> {
        validate_size(size, max_size)?;
        Ok(Self {
            size,
            max_size,
            cells: vec![background; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    pub fn get(&self, coord: Coord) -> GridResult<Color> {
        let index = self.index(coord)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, coord: Coord, color: Color) -> GridResult<()> {
        let index = self.index(coord)?;
        self.cells[index] = color;
        Ok(())
    }

    /// Iterates over every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, color)| (Coord::new(i / size, i % size), *color))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size,
            cells: self.cells.clone(),
        }
    }

    /// Replaces every cell with the snapshot's colors.
    ///
    /// Fails without touching the grid if the snapshot was taken from a grid
    /// of a different size.
    pub fn restore(&mut self, snapshot: Snapshot) -> GridResult<()> {
        if snapshot.size != self.size {
            return Err(GridError::ShapeMismatch {
                expected: self.size,
                found: snapshot.size,
            });
        }
        self.cells = snapshot.cells;
        Ok(())
    }

    /// Sets every cell to `background` without changing the size.
    pub(crate) fn fill(&mut self, background: Color) {
        self.cells.fill(background);
    }

    /// Discards all cells and allocates a fresh `new_size x new_size` grid.
    pub(crate) fn resize(&mut self, new_size: usize, background: Color) -> GridResult<()> {
        validate_size(new_size, self.max_size)?;
        debug!("Resizing grid {}x{} -> {}x{}", self.size, self.size, new_size, new_size);
        self.size = new_size;
        self.cells = vec![background; new_size * new_size];
        Ok(())
    }

    fn index(&self, coord: Coord) -> GridResult<usize> {
        if self.contains(coord) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(GridError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                size: self.size,
            })
        }
    }
}

fn validate_size(size: usize, max: usize) -> GridResult<()> {
    if size == 0 || size > max {
        return Err(GridError::InvalidSize { size, max });
    }
    Ok(())
}
