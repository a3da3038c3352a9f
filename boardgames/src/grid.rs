use std::ops::{Index, IndexMut};

use crate::InvalidDimensions;

/// A cell position on a [`Grid`], `x` being the column and `y` the row.
///
/// The ordering is only there so coordinates can be used as set keys,
/// it has no meaning for any of the games.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The coordinate shifted by `(dx, dy)`, or `None` if that would make
    /// either component negative.
    ///
    /// This does not know about any grid, so the result still needs a
    /// bounds check.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// A fixed-size 2D container.
///
/// Cells are stored in row-major order and only ever handed out through
/// bounds-checked lookups, so no reference into the grid outlives a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    cols: usize,
    rows: usize,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn new(cols: usize, rows: usize, fill: T) -> Result<Self, InvalidDimensions> {
        Self::from_fn(cols, rows, |_| fill.clone())
    }
}

impl<T> Grid<T> {
    /// Creates a grid by calling `f` once per cell, in row-major order.
    pub fn from_fn(
        cols: usize,
        rows: usize,
        mut f: impl FnMut(Coordinate) -> T,
    ) -> Result<Self, InvalidDimensions> {
        if cols == 0 || rows == 0 {
            return Err(InvalidDimensions { cols, rows });
        }
        let mut cells = Vec::with_capacity(cols * rows);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(f(Coordinate { x, y }));
            }
        }
        Ok(Self { cells, cols, rows })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }

    pub fn get(&self, coord: Coordinate) -> Option<&T> {
        let idx = self.index_of(coord)?;
        Some(&self.cells[idx])
    }

    pub fn get_mut(&mut self, coord: Coordinate) -> Option<&mut T> {
        let idx = self.index_of(coord)?;
        Some(&mut self.cells[idx])
    }

    /// Stores `value` at `coord` and returns the previous value.
    ///
    /// Returns `None` (and drops `value`) if `coord` is out of bounds.
    pub fn set(&mut self, coord: Coordinate, value: T) -> Option<T> {
        let slot = self.get_mut(coord)?;
        Some(std::mem::replace(slot, value))
    }

    /// Iterates over all coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let cols = self.cols;
        (0..self.cells.len()).map(move |idx| Coordinate {
            x: idx % cols,
            y: idx / cols,
        })
    }

    /// Iterates over all cells together with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> + '_ {
        self.coordinates().zip(self.cells.iter())
    }

    /// The up to eight in-bounds cells surrounding `coord`.
    pub fn neighbors(&self, coord: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        const OFFSETS: [(isize, isize); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| coord.offset(dx, dy))
            .filter(move |&c| self.contains(c))
    }

    /// Converts a coordinate to a position in the cell vector.
    fn index_of(&self, coord: Coordinate) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y * self.cols + coord.x)
        } else {
            None
        }
    }
}

/// Panics if `coord` is out of bounds. Use [`Grid::get()`] for untrusted input.
impl<T> Index<Coordinate> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coordinate) -> &T {
        self.get(coord).unwrap_or_else(|| {
            panic!(
                "coordinate {} out of bounds for a {}x{} grid",
                coord, self.cols, self.rows
            )
        })
    }
}

impl<T> IndexMut<Coordinate> for Grid<T> {
    fn index_mut(&mut self, coord: Coordinate) -> &mut T {
        let (cols, rows) = (self.cols, self.rows);
        self.get_mut(coord).unwrap_or_else(|| {
            panic!(
                "coordinate {} out of bounds for a {}x{} grid",
                coord, cols, rows
            )
        })
    }
}
