//! Occupancy grid and grid coordinates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, ParsePositionError};

use super::CellType;

/// A grid coordinate, also used as graph node identity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position
    pub fn manhattan(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when the two positions are orthogonal neighbors
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses `x,y`, tolerating surrounding whitespace and parentheses
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (x, y) = trimmed
            .split_once(',')
            .ok_or_else(|| ParsePositionError::Format(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| ParsePositionError::Coordinate(part.trim().to_string()))
        };
        Ok(Position::new(parse(x)?, parse(y)?))
    }
}

/// Fixed-size 2-D cell grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellType>,
}

impl Grid {
    /// Create a grid with every cell empty
    ///
    /// A size whose cell count cannot be allocated yields the empty grid;
    /// use [`Grid::try_new`] to see the error.
    pub fn new(width: usize, height: usize) -> Self {
        Self::try_new(width, height).unwrap_or_default()
    }

    /// Create a grid with every cell empty, rejecting sizes that overflow
    pub fn try_new(width: usize, height: usize) -> Result<Self, DungeonError> {
        let too_big = || DungeonError::InvalidDimensions { width, height };
        let len = cell_count(width, height).ok_or_else(too_big)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_big())?;
        cells.resize(len, CellType::Empty);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (width * height)
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-sized grid, the failed-generation result
    pub fn is_empty(&self) -> bool {
        self.capacity() == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.y * self.width + pos.x)
    }

    /// Cell at `pos`, or `None` when out of bounds
    pub fn get(&self, pos: Position) -> Option<CellType> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Set the cell at `pos`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Position, cell: CellType) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// In-bounds orthogonal neighbors, in N, E, S, W order
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let Position { x, y } = pos;
        [
            y.checked_sub(1).map(|ny| Position::new(x, ny)),
            Some(Position::new(x + 1, y)),
            Some(Position::new(x, y + 1)),
            x.checked_sub(1).map(|nx| Position::new(nx, y)),
        ]
        .into_iter()
        .flatten()
        .filter(|p| self.contains(*p))
    }

    /// All positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Room positions, row-major
    pub fn rooms(&self) -> Vec<Position> {
        self.positions()
            .filter(|p| self.get(*p).is_some_and(|c| c.is_room()))
            .collect()
    }

    /// Count cells of the given type
    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// One string per row, using each cell's symbol
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }
}

/// `width * height`, or `None` when it overflows `usize`
pub(crate) fn cell_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
