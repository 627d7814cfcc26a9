//! Level definitions, validation, solving and generation
//!
//! Level data uses `x` for the column and `y` for the row, matching the
//! level files: `{ "gridSize": 3, "arrowLayout": [{ "x": 0, "y": 2, "direction": "Up" }] }`.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::arrow::{Activation, Arrow};
use super::direction::{Cell, Direction};
use super::grid::{Grid, GridError};
use crate::consts::{GENERATOR_ATTEMPTS, MAX_GRID_SIZE};

/// Reasons a level load is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level grid size must be between 1 and {}, got {}", MAX_GRID_SIZE, .0)]
    InvalidLevelSize(i32),

    #[error("placement {index} at ({x}, {y}) is outside a {size}x{size} grid")]
    InvalidPlacement { index: usize, x: i32, y: i32, size: i32 },

    #[error("placement {index} at ({x}, {y}) overlaps an earlier arrow")]
    CellConflict { index: usize, x: i32, y: i32 },

    #[error("level {index} not found ({count} levels available)")]
    LevelNotFound { index: usize, count: usize },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// One arrow in a level layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
    pub direction: Direction,
}

impl Placement {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        Cell::new(self.y, self.x)
    }
}

/// A level as authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    pub grid_size: i32,
    #[serde(rename = "arrowLayout", alias = "placements", default)]
    pub placements: Vec<Placement>,
}

impl LevelDefinition {
    pub fn new(grid_size: i32, placements: Vec<Placement>) -> Self {
        Self {
            grid_size,
            placements,
        }
    }

    /// Check size, bounds and overlaps (first problem wins)
    pub fn validate(&self) -> Result<(), LevelError> {
        let size = self.grid_size;
        if !(1..=MAX_GRID_SIZE).contains(&size) {
            return Err(LevelError::InvalidLevelSize(size));
        }
        let mut used = HashSet::with_capacity(self.placements.len());
        for (index, p) in self.placements.iter().enumerate() {
            if p.x < 0 || p.y < 0 || p.x >= size || p.y >= size {
                return Err(LevelError::InvalidPlacement {
                    index,
                    x: p.x,
                    y: p.y,
                    size,
                });
            }
            if !used.insert((p.x, p.y)) {
                return Err(LevelError::CellConflict {
                    index,
                    x: p.x,
                    y: p.y,
                });
            }
        }
        Ok(())
    }
}

/// Ordered list of levels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSet {
    pub levels: Vec<LevelDefinition>,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    /// Parse a JSON array of level definitions
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&LevelDefinition, LevelError> {
        self.levels.get(index).ok_or(LevelError::LevelNotFound {
            index,
            count: self.levels.len(),
        })
    }
}

/// An order of placement indices that clears the level, if one exists
///
/// Launching an arrow only ever frees a cell, so launching any unblocked arrow
/// never hurts: if greedy play gets stuck, every order does.
pub fn solution_order(def: &LevelDefinition) -> Option<Vec<usize>> {
    def.validate().ok()?;
    let mut grid = Grid::build(def.grid_size).ok()?;
    let mut arrows: Vec<Arrow> = def
        .placements
        .iter()
        .enumerate()
        .map(|(i, p)| Arrow::new(i as u32, p.cell(), p.direction))
        .collect();
    for arrow in &arrows {
        grid.place(arrow.cell, arrow.id).ok()?;
    }

    let mut order = Vec::with_capacity(arrows.len());
    while order.len() < arrows.len() {
        let next = arrows
            .iter_mut()
            .find(|a| a.check_launch(&grid) == Activation::Launched)?;
        next.activate(&mut grid);
        order.push(next.id as usize);
    }
    Some(order)
}

pub fn is_solvable(def: &LevelDefinition) -> bool {
    solution_order(def).is_some()
}

/// Generate a solvable level from a seed
///
/// Cells are picked at random, then each arrow is given a direction whose
/// first step is off the board or onto an arrow that will be cleared before
/// it. Returns `None` for impossible requests (grid size outside
/// `1..=MAX_GRID_SIZE`, more arrows than cells) or when no solvable layout
/// turns up.
pub fn generate_level(seed: u64, grid_size: i32, arrow_count: usize) -> Option<LevelDefinition> {
    if !(1..=MAX_GRID_SIZE).contains(&grid_size) {
        return None;
    }
    let n = grid_size as usize;
    if arrow_count > n * n {
        return None;
    }
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut all_cells: Vec<Cell> = (0..grid_size)
        .flat_map(|row| (0..grid_size).map(move |col| Cell::new(row, col)))
        .collect();

    for attempt in 0..GENERATOR_ATTEMPTS {
        all_cells.shuffle(&mut rng);
        // Clear order is the pick order: arrow k may only point at earlier ones
        let picked = &all_cells[..arrow_count];
        let mut placements = Vec::with_capacity(arrow_count);
        for (k, &cell) in picked.iter().enumerate() {
            let later = &picked[k + 1..];
            let options: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&dir| !later.contains(&cell.step(dir)))
                .collect();
            let direction = if options.is_empty() {
                Direction::ALL[rng.random_range(0..Direction::ALL.len())]
            } else {
                options[rng.random_range(0..options.len())]
            };
            placements.push(Placement::new(cell.col, cell.row, direction));
        }
        // Store in reading order so the layout does not leak the solution
        placements.sort_by_key(|p| (p.y, p.x));

        let def = LevelDefinition::new(grid_size, placements);
        if is_solvable(&def) {
            log::debug!(
                "Generated {}x{} level with {} arrows (attempt {})",
                n,
                n,
                arrow_count,
                attempt + 1
            );
            return Some(def);
        }
    }
    log::warn!(
        "No solvable {}x{} layout with {} arrows for seed {}",
        n,
        n,
        arrow_count,
        seed
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn test_validate_size() {
        let def = LevelDefinition::new(0, vec![]);
        assert_eq!(def.validate(), Err(LevelError::InvalidLevelSize(0)));
        let def = LevelDefinition::new(-2, vec![]);
        assert_eq!(def.validate(), Err(LevelError::InvalidLevelSize(-2)));
        let def = LevelDefinition::new(i32::MAX, vec![Placement::new(0, 0, Up)]);
        assert_eq!(def.validate(), Err(LevelError::InvalidLevelSize(i32::MAX)));
        let def = LevelDefinition::new(MAX_GRID_SIZE + 1, vec![]);
        assert_eq!(
            def.validate(),
            Err(LevelError::InvalidLevelSize(MAX_GRID_SIZE + 1))
        );
        assert!(LevelDefinition::new(MAX_GRID_SIZE, vec![]).validate().is_ok());
        assert!(!is_solvable(&LevelDefinition::new(i32::MAX, vec![])));
    }

    #[test]
    fn test_validate_bounds() {
        let def = LevelDefinition::new(2, vec![Placement::new(0, 0, Up), Placement::new(2, 1, Up)]);
        assert_eq!(
            def.validate(),
            Err(LevelError::InvalidPlacement { index: 1, x: 2, y: 1, size: 2 })
        );
        let def = LevelDefinition::new(2, vec![Placement::new(0, -1, Up)]);
        assert!(matches!(def.validate(), Err(LevelError::InvalidPlacement { .. })));
    }

    #[test]
    fn test_validate_conflict() {
        let def = LevelDefinition::new(1, vec![Placement::new(0, 0, Up), Placement::new(0, 0, Down)]);
        assert_eq!(
            def.validate(),
            Err(LevelError::CellConflict { index: 1, x: 0, y: 0 })
        );
    }

    #[test]
    fn test_parse_level_file_format() {
        let json = r#"[
            { "gridSize": 2, "arrowLayout": [ { "x": 1, "y": 0, "direction": "Right" } ] },
            { "gridSize": 3, "placements": [] }
        ]"#;
        let set = LevelSet::from_json(json).unwrap();
        assert_eq!(set.len(), 2);
        let first = set.get(0).unwrap();
        assert_eq!(first.grid_size, 2);
        assert_eq!(first.placements[0].cell(), Cell::new(0, 1));
        assert!(set.get(1).unwrap().placements.is_empty());
        assert_eq!(
            set.get(2),
            Err(LevelError::LevelNotFound { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_round_trips_through_level_format() {
        let def = LevelDefinition::new(2, vec![Placement::new(1, 1, Left)]);
        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains("\"gridSize\":2"));
        assert!(json.contains("\"arrowLayout\""));
    }

    #[test]
    fn test_solution_order_chain() {
        // Row: [→][→][ ] ; the right arrow must go first
        let def = LevelDefinition::new(3, vec![Placement::new(0, 0, Right), Placement::new(1, 0, Right)]);
        assert_eq!(solution_order(&def), Some(vec![1, 0]));
    }

    #[test]
    fn test_deadlock_is_unsolvable() {
        let def = LevelDefinition::new(2, vec![Placement::new(0, 0, Right), Placement::new(1, 0, Left)]);
        assert!(!is_solvable(&def));
        // Invalid levels are never solvable
        assert!(!is_solvable(&LevelDefinition::new(0, vec![])));
    }

    #[test]
    fn test_generate_level_is_deterministic_and_solvable() {
        let a = generate_level(42, 4, 10).unwrap();
        let b = generate_level(42, 4, 10).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.placements.len(), 10);
        assert!(a.validate().is_ok());
        assert!(is_solvable(&a));
    }

    #[test]
    fn test_generate_full_board() {
        let def = generate_level(7, 3, 9).unwrap();
        assert_eq!(def.placements.len(), 9);
        assert!(is_solvable(&def));
    }

    #[test]
    fn test_generate_rejects_impossible() {
        assert!(generate_level(1, 0, 0).is_none());
        assert!(generate_level(1, 2, 5).is_none());
        assert!(generate_level(1, i32::MAX, 1).is_none());
        assert!(generate_level(1, MAX_GRID_SIZE + 1, 0).is_none());
    }
}
