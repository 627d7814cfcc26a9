//! Simulation tick
//!
//! Advances the session clock and every moving arrow by one step. Arrows are
//! processed in creation order; an arrow that passes the exit distance is
//! reported to the session and dropped before the tick returns.

use super::arrow::ArrowState;
use super::state::{GameEvent, GameState};

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return;
    }

    // Nothing to do until a level is loaded
    let Some(board) = state.board.as_mut() else {
        return;
    };

    state.session.tick(dt);

    let speed = state.settings.arrow_speed;
    let exit_distance = state.settings.exit_distance;
    let emit_moves = state.settings.emit_move_events;

    let mut any_exited = false;
    for arrow in board.arrows.iter_mut().filter(|a| a.is_moving()) {
        if arrow.advance(dt, speed, exit_distance) {
            any_exited = true;
            state.events.push(GameEvent::EntityExited { id: arrow.id });
            if state.session.on_arrow_exited(arrow.id) {
                state.events.push(GameEvent::LevelWon {
                    elapsed: state.session.elapsed(),
                });
            }
        } else if emit_moves {
            state.events.push(GameEvent::EntityMoved {
                id: arrow.id,
                offset: arrow.offset(),
            });
        }
    }

    if any_exited {
        board.arrows.retain(|a| a.state != ArrowState::Exited);
    }

    debug_assert_eq!(
        board.grid.occupied_count(),
        board.arrows.iter().filter(|a| a.is_idle()).count(),
        "grid occupancy out of sync with idle arrows"
    );
    debug_assert_eq!(state.session.active_count() as usize, board.arrows.len());
}
