//! Idle/demo mode - an automatic player for attract screens
//!
//! Clicks an idle arrow every `think_time` seconds. With probability
//! `accuracy` it picks an arrow that can launch, otherwise any idle arrow
//! (which may bounce off a blocker, like a human misclick).

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::session::GamePhase;
use super::state::GameState;

/// Seeded automatic player
#[derive(Debug, Clone)]
pub struct IdlePlayer {
    rng: Pcg32,
    /// Seconds between clicks
    pub think_time: f32,
    /// Chance (0-1) of choosing a launchable arrow
    pub accuracy: f64,
    cooldown: f32,
}

impl IdlePlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            think_time: 0.25,
            accuracy: 0.75,
            cooldown: 0.0,
        }
    }

    /// Advance the player's clock; returns the arrow to click, if any
    pub fn update(&mut self, state: &GameState, dt: f32) -> Option<u32> {
        if state.phase() != GamePhase::Active {
            return None;
        }
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = self.think_time;

        let idle: Vec<u32> = state
            .arrows()
            .iter()
            .filter(|a| a.is_idle())
            .map(|a| a.id)
            .collect();

        if self.rng.random_bool(self.accuracy.clamp(0.0, 1.0)) {
            let ready: Vec<u32> = idle
                .iter()
                .copied()
                .filter(|&id| state.would_launch(id))
                .collect();
            if let Some(&id) = ready.choose(&mut self.rng) {
                return Some(id);
            }
        }
        idle.choose(&mut self.rng).copied()
    }
}
