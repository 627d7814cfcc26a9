//! Arrow pieces and their lifecycle
//!
//! An arrow starts Idle in a grid cell. Activation checks the cell one step
//! ahead: an occupied in-bounds cell blocks the launch, anything else lets the
//! arrow leave its cell and slide. Blocking is only evaluated at launch; a
//! moving arrow is never stopped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::direction::{Cell, Direction};
use super::grid::{Grid, Occupancy};

/// Arrow lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArrowState {
    /// Sitting in its cell, waiting for activation
    Idle,
    /// Sliding; `offset` is the distance traveled from the release cell
    Moving { offset: Vec2 },
    /// Left the board (terminal, removed right after)
    Exited,
}

/// Outcome of an activation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Left its cell and started sliding
    Launched,
    /// The next cell holds the arrow with this id
    Blocked { by: u32 },
    /// Not idle or not present; nothing happened
    Ignored,
}

/// A puzzle piece
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub id: u32,
    pub direction: Direction,
    /// Cell it occupies while idle; release point once moving
    pub cell: Cell,
    pub state: ArrowState,
}

impl Arrow {
    pub fn new(id: u32, cell: Cell, direction: Direction) -> Self {
        Self {
            id,
            direction,
            cell,
            state: ArrowState::Idle,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ArrowState::Idle)
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self.state, ArrowState::Moving { .. })
    }

    /// Offset from the release cell (zero unless moving)
    pub fn offset(&self) -> Vec2 {
        match self.state {
            ArrowState::Moving { offset } => offset,
            _ => Vec2::ZERO,
        }
    }

    /// Evaluate the blocking rule without changing anything
    pub fn check_launch(&self, grid: &Grid) -> Activation {
        if !self.is_idle() {
            return Activation::Ignored;
        }
        match grid.occupancy_at(self.cell.step(self.direction)) {
            Occupancy::Occupied(by) => Activation::Blocked { by },
            Occupancy::Empty | Occupancy::OutOfBounds => Activation::Launched,
        }
    }

    /// Try to launch the arrow
    ///
    /// On success the arrow is removed from its cell and starts moving from
    /// a zero offset. Blocked or non-idle arrows are left untouched.
    pub fn activate(&mut self, grid: &mut Grid) -> Activation {
        let outcome = self.check_launch(grid);
        if outcome == Activation::Launched {
            let removed = grid.remove(self.cell);
            assert_eq!(
                removed,
                Some(self.id),
                "idle arrow {} was not in its cell {:?}",
                self.id,
                self.cell
            );
            self.state = ArrowState::Moving { offset: Vec2::ZERO };
        }
        outcome
    }

    /// Slide a moving arrow; returns true once it has exited
    pub fn advance(&mut self, dt: f32, speed: f32, exit_distance: f32) -> bool {
        let ArrowState::Moving { offset } = &mut self.state else {
            return false;
        };
        *offset += self.direction.unit_vector() * speed * dt;
        if offset.length() > exit_distance {
            self.state = ArrowState::Exited;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: i32, arrows: &[&Arrow]) -> Grid {
        let mut grid = Grid::build(size).unwrap();
        for arrow in arrows {
            grid.place(arrow.cell, arrow.id).unwrap();
        }
        grid
    }

    #[test]
    fn test_launch_into_empty_cell() {
        let mut arrow = Arrow::new(1, Cell::new(0, 0), Direction::Right);
        let mut grid = grid_with(2, &[&arrow]);

        assert_eq!(arrow.activate(&mut grid), Activation::Launched);
        assert!(arrow.is_moving());
        assert_eq!(arrow.offset(), Vec2::ZERO);
        assert_eq!(grid.occupancy_at(Cell::new(0, 0)), Occupancy::Empty);
    }

    #[test]
    fn test_launch_off_edge_ignores_neighbours() {
        // Pointing off the board: the other arrows never matter
        let mut arrow = Arrow::new(1, Cell::new(0, 1), Direction::Up);
        let left = Arrow::new(2, Cell::new(0, 0), Direction::Right);
        let below = Arrow::new(3, Cell::new(1, 1), Direction::Up);
        let mut grid = grid_with(2, &[&arrow, &left, &below]);

        assert_eq!(arrow.activate(&mut grid), Activation::Launched);
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_blocked_leaves_everything_unchanged() {
        let mut a = Arrow::new(1, Cell::new(0, 0), Direction::Right);
        let mut b = Arrow::new(2, Cell::new(0, 1), Direction::Left);
        let mut grid = grid_with(2, &[&a, &b]);

        assert_eq!(a.activate(&mut grid), Activation::Blocked { by: 2 });
        assert_eq!(b.activate(&mut grid), Activation::Blocked { by: 1 });
        assert!(a.is_idle());
        assert!(b.is_idle());
        assert_eq!(grid.occupancy_at(Cell::new(0, 0)), Occupancy::Occupied(1));
        assert_eq!(grid.occupancy_at(Cell::new(0, 1)), Occupancy::Occupied(2));
    }

    #[test]
    fn test_reactivation_is_ignored() {
        let mut arrow = Arrow::new(1, Cell::new(1, 1), Direction::Down);
        let mut grid = grid_with(2, &[&arrow]);
        arrow.activate(&mut grid);
        arrow.advance(0.1, 100.0, 1000.0);
        let before = arrow.offset();

        assert_eq!(arrow.activate(&mut grid), Activation::Ignored);
        assert_eq!(arrow.offset(), before);
    }

    #[test]
    fn test_advance_until_exit() {
        let mut arrow = Arrow::new(1, Cell::new(0, 0), Direction::Left);
        let mut grid = grid_with(1, &[&arrow]);
        arrow.activate(&mut grid);

        assert!(!arrow.advance(1.0, 10.0, 25.0));
        assert_eq!(arrow.offset(), Vec2::new(-10.0, 0.0));
        assert!(!arrow.advance(1.0, 10.0, 25.0));
        assert!(arrow.advance(1.0, 10.0, 25.0));
        assert_eq!(arrow.state, ArrowState::Exited);
        // Exited arrows no longer move or exit again
        assert!(!arrow.advance(1.0, 10.0, 25.0));
    }

    #[test]
    fn test_idle_arrow_does_not_advance() {
        let mut arrow = Arrow::new(1, Cell::new(0, 0), Direction::Left);
        assert!(!arrow.advance(100.0, 100.0, 1.0));
        assert!(arrow.is_idle());
    }
}
