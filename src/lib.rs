//! Arrow Grid - sliding-arrow puzzle rules
//!
//! Core modules:
//! - `sim`: Deterministic puzzle simulation (grid, arrows, session, levels)
//! - `settings`: Runtime tuning loaded from JSON
//!
//! Rendering, audio and input live outside this crate and talk to it through
//! [`sim::GameState`] and the [`sim::GameEvent`] queue.

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arrow slide speed once launched (units/s)
    pub const ARROW_SPEED: f32 = 1500.0;
    /// Distance from the release point past which an arrow has left the board
    pub const EXIT_DISTANCE: f32 = 3000.0;

    /// Attempts the level generator makes before giving up on a layout
    pub const GENERATOR_ATTEMPTS: u32 = 64;

    /// Largest accepted grid side length
    pub const MAX_GRID_SIZE: i32 = 256;
}
