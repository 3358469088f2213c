//! Chaser movement
//!
//! The chaser sweeps left to right at (roughly) game speed. After leaving the
//! right edge it re-enters from the left in the next lane of a fixed cycle.
//! A sine bob rides on top of the lane every tick.

use super::state::{Chaser, GameEvent, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Chaser speed for the current game speed and run time
///
/// With no catch-up window the chaser mirrors game speed. Otherwise it eases
/// linearly from its initial speed up to game speed over the window.
pub fn pace(tuning: &Tuning, game_speed: f32, time_ticks: u64) -> f32 {
    if tuning.chaser_catch_up_ticks == 0 {
        return game_speed;
    }
    let t = (time_ticks as f32 / tuning.chaser_catch_up_ticks as f32).min(1.0);
    tuning.chaser_initial_speed + (game_speed - tuning.chaser_initial_speed) * t
}

/// Lane y for a cycle count
pub fn lane_for_cycle(tuning: &Tuning, cycle: u32) -> f32 {
    let lanes = &tuning.chaser_lanes;
    CANVAS_HEIGHT * lanes[cycle as usize % lanes.len()]
}

/// Move one tick; returns the new cycle count if the chaser wrapped
pub fn step(chaser: &mut Chaser, tuning: &Tuning, speed: f32) -> Option<u32> {
    chaser.speed = speed;
    chaser.pos.x += speed;

    let mut wrapped = None;
    if chaser.pos.x > CANVAS_WIDTH + chaser.size {
        chaser.pos.x = -chaser.size - tuning.chaser_reentry_offset;
        chaser.cycle_count += 1;
        chaser.lane_y = lane_for_cycle(tuning, chaser.cycle_count);
        wrapped = Some(chaser.cycle_count);
    }

    chaser.phase += tuning.chaser_phase_step;
    chaser.pos.y =
        chaser.lane_y + (chaser.phase * tuning.chaser_bob_frequency).sin() * tuning.chaser_bob_amplitude;

    wrapped
}

/// Advance the chaser inside the game state
pub fn advance(state: &mut GameState) {
    let speed = pace(&state.tuning, state.speed, state.time_ticks);
    if let Some(cycle) = step(&mut state.chaser, &state.tuning, speed) {
        log::debug!("Chaser re-entered, cycle {}", cycle);
        state.events.push(GameEvent::ChaserWrapped {
            cycle,
            lane_y: state.chaser.lane_y,
        });
    }
}
