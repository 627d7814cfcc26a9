//! Simulation settings
//!
//! Tunables that are not part of the puzzle rules. Loaded from JSON by the
//! host; anything missing falls back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::{ARROW_SPEED, EXIT_DISTANCE};

/// Runtime settings for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Slide speed of a launched arrow (units/s)
    pub arrow_speed: f32,
    /// Travel distance after which a moving arrow counts as exited
    pub exit_distance: f32,
    /// Emit `EntityMoved` every tick for each moving arrow
    pub emit_move_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arrow_speed: ARROW_SPEED,
            exit_distance: EXIT_DISTANCE,
            emit_move_events: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and sanitize them
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Replace unusable values with defaults
    ///
    /// A non-positive speed would leave arrows stuck forever, and a
    /// non-positive exit distance would make them exit on launch.
    pub fn sanitized(mut self) -> Self {
        if !(self.arrow_speed.is_finite() && self.arrow_speed > 0.0) {
            log::warn!(
                "Invalid arrow_speed {}, using default {}",
                self.arrow_speed,
                ARROW_SPEED
            );
            self.arrow_speed = ARROW_SPEED;
        }
        if !(self.exit_distance.is_finite() && self.exit_distance > 0.0) {
            log::warn!(
                "Invalid exit_distance {}, using default {}",
                self.exit_distance,
                EXIT_DISTANCE
            );
            self.exit_distance = EXIT_DISTANCE;
        }
        self
    }

    /// Seconds a launched arrow needs to leave the board
    pub fn time_to_exit(&self) -> f32 {
        self.exit_distance / self.arrow_speed
    }
}
