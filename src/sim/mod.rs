//! Deterministic puzzle simulation
//!
//! All rules live here. This module must stay pure and deterministic:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only (generator, idle player)
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod arrow;
pub mod direction;
pub mod grid;
pub mod idle;
pub mod level;
pub mod session;
pub mod state;
pub mod tick;

pub use arrow::{Activation, Arrow, ArrowState};
pub use direction::{Cell, Direction};
pub use grid::{Grid, GridError, Occupancy};
pub use idle::IdlePlayer;
pub use level::{
    LevelDefinition, LevelError, LevelSet, Placement, generate_level, is_solvable, solution_order,
};
pub use session::{GamePhase, Session, SessionStatus};
pub use state::{Board, GameEvent, GameState};
pub use tick::tick;
