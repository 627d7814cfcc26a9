//! Game state and the core API used by the view/input layer
//!
//! `GameState` owns everything for one running puzzle: the level set, the
//! current grid and arrows, the session, and the outgoing event queue.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arrow::{Activation, Arrow};
use super::direction::{Cell, Direction};
use super::grid::Grid;
use super::level::{LevelDefinition, LevelError, LevelSet};
use super::session::{GamePhase, Session, SessionStatus};
use crate::settings::Settings;

/// Events for renderer/audio/UI collaborators, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new board is ready (`index` is `None` for ad-hoc definitions)
    LevelLoaded { index: Option<usize>, grid_size: usize },
    EntityCreated { id: u32, cell: Cell, direction: Direction },
    /// Activation succeeded (click sound)
    ArrowLaunched { id: u32 },
    /// Activation refused because `by` sits in the way
    ActivationBlocked { id: u32, by: u32 },
    EntityMoved { id: u32, offset: Vec2 },
    EntityExited { id: u32 },
    LevelWon { elapsed: f32 },
}

/// The loaded board
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    /// Index into the level set, if loaded from it
    pub index: Option<usize>,
    /// Layout the board was built from (for restarts)
    pub definition: LevelDefinition,
    pub grid: Grid,
    /// Live arrows, sorted by id (creation order)
    pub arrows: Vec<Arrow>,
}

/// Complete puzzle state
///
/// Serializes as a snapshot for tooling. There is no deserializing path:
/// boards are only built by the level loader.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub levels: LevelSet,
    pub settings: Settings,
    pub session: Session,
    pub board: Option<Board>,
    /// Pending events for collaborators
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state with no level loaded
    pub fn new(levels: LevelSet, settings: Settings) -> Self {
        Self {
            levels,
            settings: settings.sanitized(),
            session: Session::default(),
            board: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Load a level from the level set
    ///
    /// On error the current level stays loaded and playable.
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let def = self.levels.get(index)?.clone();
        self.install(&def, Some(index))
    }

    /// Load an ad-hoc level definition
    pub fn load_definition(&mut self, def: &LevelDefinition) -> Result<(), LevelError> {
        self.install(def, None)
    }

    /// Rebuild the current board from its layout
    pub fn restart_level(&mut self) -> Result<(), LevelError> {
        match self.board.as_ref() {
            Some(board) => {
                let (def, index) = (board.definition.clone(), board.index);
                self.install(&def, index)
            }
            None => self.load_level(0),
        }
    }

    /// Load the level after the current one
    pub fn load_next_level(&mut self) -> Result<(), LevelError> {
        let index = self.current_level().map_or(0, |i| i + 1);
        self.load_level(index)
    }

    fn install(&mut self, def: &LevelDefinition, index: Option<usize>) -> Result<(), LevelError> {
        def.validate()?;

        // Build into locals so a failure cannot leave a half-loaded board
        let mut grid = Grid::build(def.grid_size)?;
        let mut arrows = Vec::with_capacity(def.placements.len());
        let mut session = Session::start();
        let first_id = self.next_id;
        for (offset, p) in def.placements.iter().enumerate() {
            let id = first_id + offset as u32;
            grid.place(p.cell(), id)?;
            arrows.push(Arrow::new(id, p.cell(), p.direction));
            session.add_arrow(id);
        }
        self.next_id = first_id + arrows.len() as u32;

        if arrows.is_empty() {
            log::warn!("Level {:?} has no arrows and can never be won", index);
        }
        log::info!(
            "Loaded level {:?}: {}x{} grid, {} arrows",
            index,
            grid.size(),
            grid.size(),
            arrows.len()
        );

        self.events.push(GameEvent::LevelLoaded {
            index,
            grid_size: grid.size(),
        });
        for arrow in &arrows {
            self.events.push(GameEvent::EntityCreated {
                id: arrow.id,
                cell: arrow.cell,
                direction: arrow.direction,
            });
        }
        self.session = session;
        self.board = Some(Board {
            index,
            definition: def.clone(),
            grid,
            arrows,
        });
        Ok(())
    }

    /// Handle a click on an arrow
    ///
    /// Never fails: blocked, moving, exited or unknown arrows are no-ops.
    pub fn activate(&mut self, id: u32) -> Activation {
        let Some(board) = self.board.as_mut() else {
            log::debug!("Activation of {} with no level loaded", id);
            return Activation::Ignored;
        };
        let Some(arrow) = board.arrows.iter_mut().find(|a| a.id == id) else {
            log::debug!("Activation of unknown arrow {}", id);
            return Activation::Ignored;
        };

        let outcome = arrow.activate(&mut board.grid);
        match outcome {
            Activation::Launched => {
                log::debug!("Arrow {} launched {:?}", id, arrow.direction);
                self.events.push(GameEvent::ArrowLaunched { id });
            }
            Activation::Blocked { by } => {
                log::debug!("Arrow {} blocked by {}", id, by);
                self.events.push(GameEvent::ActivationBlocked { id, by });
            }
            Activation::Ignored => {
                log::debug!("Arrow {} is not idle, ignoring activation", id);
            }
        }
        outcome
    }

    /// Whether activating `id` right now would launch it
    pub fn would_launch(&self, id: u32) -> bool {
        self.board
            .as_ref()
            .and_then(|b| b.arrows.iter().find(|a| a.id == id).map(|a| (b, a)))
            .is_some_and(|(b, a)| a.check_launch(&b.grid) == Activation::Launched)
    }

    /// First idle arrow (by id) that can launch
    pub fn hint(&self) -> Option<u32> {
        let board = self.board.as_ref()?;
        board
            .arrows
            .iter()
            .find(|a| a.check_launch(&board.grid) == Activation::Launched)
            .map(|a| a.id)
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        super::tick::tick(self, dt);
    }

    pub fn session_status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn current_level(&self) -> Option<usize> {
        self.board.as_ref().and_then(|b| b.index)
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.board.as_ref().map(|b| &b.grid)
    }

    /// Live arrows in creation order
    pub fn arrows(&self) -> &[Arrow] {
        match &self.board {
            Some(board) => &board.arrows,
            None => &[],
        }
    }

    pub fn arrow(&self, id: u32) -> Option<&Arrow> {
        self.arrows().iter().find(|a| a.id == id)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
