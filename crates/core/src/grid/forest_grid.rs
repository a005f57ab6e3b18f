//! Row-major storage for forest cell states.
//!
//! Coordinates are always `(row, col)`: the row indexes the outer (height) axis and the
//! column the inner (width) axis. [`GridCoord`] names the two components so the order
//! cannot be swapped silently.

use crate::core_types::CellState;
use crate::error::ForestFireError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    /// Row index, `0 <= row < height`
    pub row: usize,
    /// Column index, `0 <= col < width`
    pub col: usize,
}

impl GridCoord {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Tuples are read as `(row, col)`.
impl From<(usize, usize)> for GridCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal neighbour directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Propagation order used by the step rule: right, down, left, up.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// `(d_row, d_col)` offset of this direction.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

/// Rectangular `height × width` grid of [`CellState`] stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawForestGrid")]
pub struct ForestGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

/// Unchecked wire form, validated into [`ForestGrid`] on deserialisation.
#[derive(Deserialize)]
struct RawForestGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl TryFrom<RawForestGrid> for ForestGrid {
    type Error = ForestFireError;

    fn try_from(raw: RawForestGrid) -> Result<Self, Self::Error> {
        let expected = checked_area(raw.width, raw.height)?;
        if raw.cells.len() != expected {
            return Err(ForestFireError::InvalidDimension {
                width: raw.width,
                height: raw.height,
            });
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

fn checked_area(width: usize, height: usize) -> Result<usize, ForestFireError> {
    match width.checked_mul(height) {
        Some(area) if area > 0 => Ok(area),
        _ => Err(ForestFireError::InvalidDimension { width, height }),
    }
}

impl ForestGrid {
    /// Create an all-[`CellState::Tree`] grid.
    ///
    /// # Errors
    ///
    /// Returns [`ForestFireError::InvalidDimension`] if either dimension is zero or the
    /// cell count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, ForestFireError> {
        let area = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Tree; area],
        })
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width × height`)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Linear index of `coord`, or `None` when outside the grid.
    #[inline]
    pub fn index_of(&self, coord: GridCoord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| coord.row * self.width + coord.col)
    }

    /// Coordinate of a linear index.
    #[inline]
    pub fn coord_of(&self, index: usize) -> GridCoord {
        GridCoord::new(index / self.width, index % self.width)
    }

    /// State at `coord`, or `None` when outside the grid.
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<CellState> {
        self.index_of(coord).map(|idx| self.cells[idx])
    }

    /// Overwrite the state at `coord`. Returns `false` (and does nothing) when out of bounds.
    pub(crate) fn set(&mut self, coord: GridCoord, state: CellState) -> bool {
        match self.index_of(coord) {
            Some(idx) => {
                self.cells[idx] = state;
                true
            }
            None => false,
        }
    }

    /// In-bounds neighbour of `coord` in `direction`.
    pub fn neighbor(&self, coord: GridCoord, direction: Direction) -> Option<GridCoord> {
        let (d_row, d_col) = direction.offset();
        let row = coord.row.checked_add_signed(d_row)?;
        let col = coord.col.checked_add_signed(d_col)?;
        let next = GridCoord::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// In-bounds 4-connected neighbours in propagation order (right, down, left, up).
    ///
    /// Corners yield 2 neighbours, edges 3 and interior cells 4.
    pub fn neighbors(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        Direction::ORTHOGONAL
            .into_iter()
            .filter_map(move |direction| self.neighbor(coord, direction))
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks_exact(self.width)
    }

    /// Coordinates of every cell currently in `state`, row-major.
    pub fn coords_in(&self, state: CellState) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &cell)| cell == state)
            .map(|(idx, _)| self.coord_of(idx))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    pub fn contains(&self, state: CellState) -> bool {
        self.cells.contains(&state)
    }

    /// One line per row using `T`, `F` and `A`.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for row in self.rows() {
            out.extend(row.iter().copied().map(CellState::symbol));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ForestGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_ascii())
    }
}
