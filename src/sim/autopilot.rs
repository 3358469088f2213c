//! Demo driver
//!
//! Plays the game through the same input entry points a human uses: crouch
//! when a beam is about to reach the player, jump off the last moment before
//! a gap. Not perfect, good enough for attract mode and headless runs.

use super::state::{GameState, RunPhase};
use super::tick::{press_primary, set_crouch};

/// Ticks of warning before a beam reaches the player
const BEAM_WARNING_TICKS: f32 = 3.0;
/// Ticks before the roof edge at which to take off
const TAKEOFF_TICKS: f32 = 2.0;

/// Issue this frame's input
pub fn steer(state: &mut GameState) {
    if state.phase != RunPhase::Running {
        return;
    }

    let player = &state.player;
    let reach = player.right() + state.speed * BEAM_WARNING_TICKS;
    let beam_near = state
        .beams
        .iter()
        .any(|b| b.x < reach && b.right() > player.pos.x);

    if beam_near {
        if !player.crouching {
            set_crouch(state, true);
        }
        return;
    }
    if player.crouching {
        set_crouch(state, false);
    }

    if state.player.grounded && gap_ahead(state) {
        press_primary(state);
    }
}

/// Whether the roof underfoot ends within takeoff range and a gap follows
fn gap_ahead(state: &GameState) -> bool {
    let Some(support) = state.player.support else {
        return false;
    };
    let Ok(index) = state.segments.binary_search_by_key(&support, |s| s.id) else {
        return false;
    };
    let roof = &state.segments[index];
    let edge_distance = roof.right() - state.player.pos.x;
    let next_is_gap = state
        .segments
        .get(index + 1)
        .is_some_and(|next| next.is_gap());

    next_is_gap && edge_distance <= state.speed * TAKEOFF_TICKS
}
