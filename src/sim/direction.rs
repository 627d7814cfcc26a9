//! Arrow directions and grid coordinates
//!
//! Grid space: rows grow downward, columns grow to the right. Offsets use the
//! same axes, so `x` follows columns and `y` follows rows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Direction an arrow points (and slides) in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) delta of one step
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Unit vector in grid space
    #[inline]
    pub fn unit_vector(self) -> Vec2 {
        let (dr, dc) = self.delta();
        Vec2::new(dc as f32, dr as f32)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Sprite rotation in degrees (counter-clockwise, Right = 0)
    pub fn rotation_degrees(self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => 90.0,
            Direction::Left => 180.0,
            Direction::Down => -90.0,
        }
    }
}

/// A cell coordinate
///
/// Signed so that a step off the edge is still representable; the grid
/// reports such cells as out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Neighbouring cell one step in `dir`
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_vectors_are_unit_and_opposed() {
        for dir in Direction::ALL {
            let v = dir.unit_vector();
            assert!((v.length() - 1.0).abs() < 0.0001);
            assert_eq!(v, -dir.opposite().unit_vector());
        }
    }

    #[test]
    fn test_up_decreases_row() {
        let cell = Cell::new(2, 2);
        assert_eq!(cell.step(Direction::Up), Cell::new(1, 2));
        assert_eq!(cell.step(Direction::Down), Cell::new(3, 2));
        assert_eq!(cell.step(Direction::Left), Cell::new(2, 1));
        assert_eq!(cell.step(Direction::Right), Cell::new(2, 3));
        assert_eq!(Direction::Up.unit_vector(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_step_off_edge_goes_negative() {
        assert_eq!(Cell::new(0, 0).step(Direction::Left), Cell::new(0, -1));
    }

    #[test]
    fn test_rotation() {
        assert_eq!(Direction::Right.rotation_degrees(), 0.0);
        assert_eq!(Direction::Up.rotation_degrees(), 90.0);
        assert_eq!(Direction::Left.rotation_degrees(), 180.0);
        assert_eq!(Direction::Down.rotation_degrees(), -90.0);
    }
}
