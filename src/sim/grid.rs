//! Cell occupancy for one level
//!
//! A dense row-major table mapping each cell to the id of the idle arrow
//! sitting in it. Moving and exited arrows are never in the table.

use serde::Serialize;
use thiserror::Error;

use super::direction::Cell;
use crate::consts::MAX_GRID_SIZE;

/// Grid construction and placement errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid size must be between 1 and {}, got {}", MAX_GRID_SIZE, .0)]
    InvalidSize(i32),

    #[error("cell ({}, {}) already holds arrow {}", .cell.row, .cell.col, .occupant)]
    CellOccupied { cell: Cell, occupant: u32 },

    #[error("cell ({}, {}) is outside the grid", .cell.row, .cell.col)]
    OutOfBounds { cell: Cell },
}

/// What a cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// An idle arrow with this id
    Occupied(u32),
    Empty,
    /// Past the edge of the board; a piece may fly out here
    OutOfBounds,
}

/// N×N occupancy grid
///
/// Serialize only: a grid is always built through `build` so its cell table
/// matches its size.
#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<u32>>,
}

impl Grid {
    /// Allocate an empty `size`×`size` grid
    pub fn build(size: i32) -> Result<Self, GridError> {
        if !(1..=MAX_GRID_SIZE).contains(&size) {
            return Err(GridError::InvalidSize(size));
        }
        let n = size as usize;
        Ok(Self {
            size: n,
            cells: vec![None; n * n],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let n = self.size as i32;
        if cell.row < 0 || cell.col < 0 || cell.row >= n || cell.col >= n {
            return None;
        }
        Some(cell.row as usize * self.size + cell.col as usize)
    }

    /// Bind an arrow into an empty cell
    pub fn place(&mut self, cell: Cell, id: u32) -> Result<(), GridError> {
        let idx = self.index(cell).ok_or(GridError::OutOfBounds { cell })?;
        if let Some(occupant) = self.cells[idx] {
            return Err(GridError::CellOccupied { cell, occupant });
        }
        self.cells[idx] = Some(id);
        Ok(())
    }

    pub fn occupancy_at(&self, cell: Cell) -> Occupancy {
        match self.index(cell) {
            None => Occupancy::OutOfBounds,
            Some(idx) => match self.cells[idx] {
                Some(id) => Occupancy::Occupied(id),
                None => Occupancy::Empty,
            },
        }
    }

    /// Clear a cell, returning its previous occupant (no-op if empty)
    pub fn remove(&mut self, cell: Cell) -> Option<u32> {
        let idx = self.index(cell)?;
        self.cells[idx].take()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Occupied cells in row-major order
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        let n = self.size;
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            c.map(|id| (Cell::new((i / n) as i32, (i % n) as i32), id))
        })
    }
}
