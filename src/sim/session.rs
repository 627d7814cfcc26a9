//! Session bookkeeping: timer, remaining arrows, win detection

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No level loaded yet
    Loading,
    /// Level in play, timer running
    Active,
    /// Every arrow has exited, timer frozen
    Won,
}

/// Snapshot handed to the UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub phase: GamePhase,
    /// Seconds spent on the current level
    pub elapsed: f32,
}

/// Per-level session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    phase: GamePhase,
    elapsed: f32,
    /// Ids of arrows that have not exited yet
    active: BTreeSet<u32>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: GamePhase::Loading,
            elapsed: 0.0,
            active: BTreeSet::new(),
        }
    }
}

impl Session {
    /// Fresh session for a newly loaded level (arrows added with `add_arrow`)
    pub fn start() -> Self {
        Self {
            phase: GamePhase::Active,
            ..Self::default()
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn active_count(&self) -> u32 {
        self.active.len() as u32
    }

    #[inline]
    pub fn is_active(&self, id: u32) -> bool {
        self.active.contains(&id)
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            phase: self.phase,
            elapsed: self.elapsed,
        }
    }

    /// Count an arrow onto the board
    ///
    /// # Panics
    ///
    /// If `id` is already counted; ids are unique per level.
    pub fn add_arrow(&mut self, id: u32) {
        assert!(self.active.insert(id), "arrow {id} added to the session twice");
    }

    /// Advance the timer (only while active)
    pub fn tick(&mut self, dt: f32) {
        if self.phase == GamePhase::Active {
            self.elapsed += dt;
        }
    }

    /// Record that an arrow left the board
    ///
    /// Returns true if this exit won the level. A repeated or unknown id is
    /// ignored, so it can never count toward the win.
    pub fn on_arrow_exited(&mut self, id: u32) -> bool {
        if !self.active.remove(&id) {
            log::warn!("Ignoring exit of arrow {} that is not active", id);
            return false;
        }
        if self.active.is_empty() && self.phase == GamePhase::Active {
            self.phase = GamePhase::Won;
            log::info!("Level won in {:.2}s", self.elapsed);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        let session = Session::default();
        assert_eq!(session.phase(), GamePhase::Loading);
        assert_eq!(session.active_count(), 0);
    }

    #[test]
    fn test_timer_only_runs_while_active() {
        let mut session = Session::default();
        session.tick(1.0);
        assert_eq!(session.elapsed(), 0.0);

        let mut session = Session::start();
        session.add_arrow(1);
        session.tick(0.5);
        session.tick(0.25);
        assert!((session.elapsed() - 0.75).abs() < 0.0001);

        assert!(session.on_arrow_exited(1));
        session.tick(10.0);
        assert!((session.elapsed() - 0.75).abs() < 0.0001);
    }

    #[test]
    fn test_win_on_last_exit() {
        let mut session = Session::start();
        session.add_arrow(1);
        session.add_arrow(2);
        assert_eq!(session.active_count(), 2);
        assert!(!session.on_arrow_exited(1));
        assert_eq!(session.phase(), GamePhase::Active);
        assert!(session.on_arrow_exited(2));
        assert!(session.is_won());
        assert_eq!(session.status().phase, GamePhase::Won);
    }

    #[test]
    fn test_repeated_exit_is_not_counted_again() {
        let mut session = Session::start();
        session.add_arrow(1);
        session.add_arrow(2);

        assert!(!session.on_arrow_exited(1));
        assert!(!session.on_arrow_exited(1));
        assert_eq!(session.phase(), GamePhase::Active);
        assert_eq!(session.active_count(), 1);
        assert!(session.is_active(2));

        assert!(session.on_arrow_exited(2));
        assert!(session.is_won());
        assert!(!session.on_arrow_exited(2));
        assert_eq!(session.active_count(), 0);
    }

    #[test]
    fn test_unknown_exit_is_ignored() {
        let mut session = Session::start();
        session.add_arrow(4);
        assert!(!session.on_arrow_exited(9));
        assert_eq!(session.active_count(), 1);
        assert_eq!(session.phase(), GamePhase::Active);
    }

    #[test]
    #[should_panic(expected = "added to the session twice")]
    fn test_duplicate_add_panics() {
        let mut session = Session::start();
        session.add_arrow(3);
        session.add_arrow(3);
    }
}
