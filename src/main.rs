//! Arrow Grid headless demo
//!
//! Loads a level set (the built-in one, or a JSON file given as the first
//! argument), lets the idle player clear every level on a fixed-timestep
//! loop, then plays one generated level. Set `RUST_LOG=debug` to watch every
//! click.

use arrow_grid::Settings;
use arrow_grid::consts::*;
use arrow_grid::sim::{GameEvent, GamePhase, GameState, IdlePlayer, LevelSet, generate_level};

const BUILTIN_LEVELS: &str = include_str!("../levels/default.json");

/// Simulated display frame time (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up on a level after this many simulated seconds
const LEVEL_TIMEOUT_SECS: f32 = 300.0;

/// Drives a `GameState` from variable frame times in fixed substeps
struct Runner {
    state: GameState,
    player: IdlePlayer,
    accumulator: f32,
}

impl Runner {
    fn new(state: GameState, seed: u64) -> Self {
        Self {
            state,
            player: IdlePlayer::new(seed),
            accumulator: 0.0,
        }
    }

    /// One display frame
    fn frame(&mut self, frame_dt: f32) {
        self.accumulator += frame_dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Some(id) = self.player.update(&self.state, SIM_DT) {
                self.state.activate(id);
            }
            self.state.tick(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop backlog rather than spiral
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }

        for event in self.state.drain_events() {
            match event {
                GameEvent::LevelWon { elapsed } => {
                    log::info!("Finished in {} seconds!", elapsed.floor());
                }
                GameEvent::EntityMoved { .. } => {}
                other => log::debug!("{:?}", other),
            }
        }
    }

    /// Run frames until the level is won or the timeout passes
    fn play_current(&mut self) -> bool {
        self.accumulator = 0.0;
        let mut simulated = 0.0;
        while self.state.phase() == GamePhase::Active && simulated < LEVEL_TIMEOUT_SECS {
            self.frame(FRAME_DT);
            simulated += FRAME_DT;
        }
        self.state.phase() == GamePhase::Won
    }
}

fn load_levels() -> Option<LevelSet> {
    let (source, json) = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => (path, json),
            Err(e) => {
                log::error!("Failed to read {}: {}", path, e);
                return None;
            }
        },
        None => ("built-in levels".to_string(), BUILTIN_LEVELS.to_string()),
    };
    match LevelSet::from_json(&json) {
        Ok(levels) => {
            log::info!("Loaded {} levels from {}", levels.len(), source);
            Some(levels)
        }
        Err(e) => {
            log::error!("Invalid level data in {}: {}", source, e);
            None
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Arrow Grid (headless) starting...");

    let Some(levels) = load_levels() else {
        std::process::exit(1);
    };
    let count = levels.len();
    let seed = 0x5EED;
    let mut runner = Runner::new(GameState::new(levels, Settings::default()), seed);

    for index in 0..count {
        if let Err(e) = runner.state.load_level(index) {
            log::warn!("Skipping level {}: {}", index + 1, e);
            continue;
        }
        let won = runner.play_current();
        let status = runner.state.session_status();
        println!(
            "Level {}/{}: {} ({:.2}s)",
            index + 1,
            count,
            if won { "cleared" } else { "stuck" },
            status.elapsed
        );
    }

    match generate_level(seed, 5, 14) {
        Some(def) => {
            if runner.state.load_definition(&def).is_ok() {
                let won = runner.play_current();
                println!(
                    "Generated 5x5 level: {} ({:.2}s)",
                    if won { "cleared" } else { "stuck" },
                    runner.state.session_status().elapsed
                );
            }
        }
        None => log::warn!("Level generator found no layout"),
    }
}
