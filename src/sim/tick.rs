//! Per-frame simulation tick and run transitions
//!
//! The host calls [`tick`] once per display refresh and forwards input through
//! [`press_primary`], [`set_crouch`] and [`restart`] as it arrives.

use super::collision::{self, Collision};
use super::physics::{self, PlayerStep};
use super::state::{EndCause, GameEvent, GameState, RunPhase};
use super::{chaser, terrain};

/// Begin a fresh run: every entity is rebuilt, the best score is kept
pub fn start_game(state: &mut GameState) {
    state.reset_run();
    state.phase = RunPhase::Running;
    state.events.push(GameEvent::RunStarted);
    log::info!(
        "Run started (seed {}, {} segments, {} beams)",
        state.seed,
        state.segments.len(),
        state.beams.len()
    );
}

/// Jump trigger: starts the run when idle, jumps while running
pub fn press_primary(state: &mut GameState) {
    match state.phase {
        RunPhase::Idle => start_game(state),
        RunPhase::Running => {
            physics::jump(state);
        }
        RunPhase::Over => {}
    }
}

/// Crouch hold/release; ignored unless running
pub fn set_crouch(state: &mut GameState, crouching: bool) {
    if state.phase == RunPhase::Running {
        physics::crouch(state, crouching);
    }
}

/// Explicit restart; there is no way back to idle and no restart mid-run
///
/// Returns whether a new run began.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase == RunPhase::Running {
        return false;
    }
    start_game(state);
    true
}

/// Terminal transition; records a new best score
fn end_run(state: &mut GameState, cause: EndCause) {
    state.phase = RunPhase::Over;
    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
    }
    log::info!(
        "Run over ({:?}) score {} after {} ticks{}",
        cause,
        state.score,
        state.time_ticks,
        if new_high_score { ", new high score" } else { "" }
    );
    state.events.push(GameEvent::RunEnded {
        cause,
        score: state.score,
        new_high_score,
    });
}

/// Advance the game state by one frame
///
/// Order: player physics, terrain and beams, chaser, collisions.
pub fn tick(state: &mut GameState) {
    if state.phase != RunPhase::Running {
        return;
    }

    state.time_ticks += 1;

    if physics::step_player(state) == PlayerStep::Fell {
        end_run(state, EndCause::Fell);
        return;
    }

    terrain::advance(state);
    chaser::advance(state);

    match collision::detect(state) {
        Collision::None => {}
        Collision::EdgeClip => {
            let speed_before = state.speed;
            state.speed = state.tuning.clip_reset_speed;
            log::debug!("Edge clip at speed {:.2}", speed_before);
            state.events.push(GameEvent::EdgeClip { speed_before });
        }
        Collision::Fatal(cause) => end_run(state, cause),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::physics::max_jumpable_gap;
    use crate::sim::state::{Beam, Segment, SegmentId};
    use crate::tuning::Tuning;

    /// Running game on one long rooftop with the chaser parked off-screen
    fn running_on_rooftop(width: f32) -> GameState {
        let mut state = GameState::new(Tuning::default(), 12345, 0);
        start_game(&mut state);
        state.segments = vec![Segment::rooftop(SegmentId(10_000), 0.0, width, 100.0)];
        state.beams.clear();
        state.player.pos.y = CANVAS_HEIGHT - 100.0 - state.player.height;
        state.player.grounded = true;
        state.player.support = Some(SegmentId(10_000));
        state.chaser.pos.x = -5_000.0;
        state.events.clear();
        state
    }

    #[test]
    fn test_idle_to_running() {
        let mut state = GameState::new(Tuning::default(), 12345, 0);
        assert_eq!(state.phase, RunPhase::Idle);

        // Ticking while idle does nothing
        tick(&mut state);
        assert_eq!(state.time_ticks, 0);

        press_primary(&mut state);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_first_ticks_land_on_spawn_roof() {
        let mut state = GameState::new(Tuning::default(), 777, 0);
        start_game(&mut state);
        state.beams.clear();
        let mut landed = false;
        for _ in 0..60 {
            tick(&mut state);
            landed |= state.player.grounded;
        }
        assert_eq!(state.phase, RunPhase::Running);
        assert!(landed);
    }

    #[test]
    fn test_idle_run_on_solid_ground() {
        let mut state = running_on_rooftop(50_000.0);
        let n = 200;
        for _ in 0..n {
            tick(&mut state);
            assert!(state.player.grounded);
            assert!(state.player.bottom() <= CANVAS_HEIGHT);
        }
        assert_eq!(state.phase, RunPhase::Running);
        let expected = 4.0 + 0.003 * n as f32;
        assert!((state.speed - expected).abs() < 1e-3);
        // Nothing scrolled off, so nothing scored
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_jump_clears_widest_gap() {
        // One speed per gap tier: capped at 30, capped at 50, uncapped
        for speed in [4.0, 6.0, 8.0] {
            let mut state = running_on_rooftop(380.0);
            state.speed = speed;
            let gap = max_jumpable_gap(&state.tuning, speed);
            state.segments.push(Segment::gap(SegmentId(10_001), 380.0, gap));
            state
                .segments
                .push(Segment::rooftop(SegmentId(10_002), 380.0 + gap, 3_000.0, 100.0));

            press_primary(&mut state);
            assert!(!state.player.grounded);

            for _ in 0..80 {
                tick(&mut state);
                assert_eq!(state.phase, RunPhase::Running, "speed {}", speed);
            }
            assert!(state.player.grounded, "speed {}", speed);
            assert_eq!(state.player.support, Some(SegmentId(10_002)), "speed {}", speed);
        }
    }

    /// Grounded on a 160 px roof that ends just past the player, 80 px roof after
    fn stepping_down() -> GameState {
        let mut state = running_on_rooftop(360.0);
        state.segments = vec![
            Segment::rooftop(SegmentId(10_000), 0.0, 360.0, 160.0),
            Segment::rooftop(SegmentId(10_001), 360.0, 5_000.0, 80.0),
        ];
        state.player.pos.y = CANVAS_HEIGHT - 160.0 - state.player.height;
        state
    }

    /// Tick until the lower roof is the player's support
    fn tick_onto_lower_roof(state: &mut GameState) {
        for _ in 0..20 {
            tick(state);
            if state.player.support == Some(SegmentId(10_001)) {
                return;
            }
        }
        panic!("never reached the lower roof");
    }

    #[test]
    fn test_can_jump_while_dropping_to_lower_roof() {
        let mut state = stepping_down();
        tick_onto_lower_roof(&mut state);
        assert!(state.player.grounded);
        assert!(state.player.bottom() < CANVAS_HEIGHT - 80.0);

        press_primary(&mut state);
        assert_eq!(state.player.vy, -16.0);
    }

    #[test]
    fn test_stepping_down_never_clips() {
        let mut state = stepping_down();
        tick_onto_lower_roof(&mut state);
        for _ in 0..40 {
            tick(&mut state);
        }
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.player.bottom(), CANVAS_HEIGHT - 80.0);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::EdgeClip { .. }))
        );
        assert!(state.speed > state.tuning.speed_floor);
    }

    #[test]
    fn test_walking_into_gap_ends_run() {
        let mut state = running_on_rooftop(380.0);
        state
            .segments
            .push(Segment::gap(SegmentId(10_001), 380.0, 5_000.0));
        for _ in 0..200 {
            tick(&mut state);
            if state.phase == RunPhase::Over {
                break;
            }
        }
        assert_eq!(state.phase, RunPhase::Over);
        let ended = state.drain_events().into_iter().find_map(|e| match e {
            GameEvent::RunEnded { cause, .. } => Some(cause),
            _ => None,
        });
        assert_eq!(ended, Some(EndCause::Fell));
    }

    fn beam_on_player(state: &GameState) -> Beam {
        let top = CANVAS_HEIGHT - 100.0;
        Beam {
            id: 99,
            x: state.player.pos.x - 10.0 + state.speed,
            y: top - CANVAS_HEIGHT,
            width: 50.0,
            height: CANVAS_HEIGHT,
            opacity: 0.9,
            phase: 0.0,
        }
    }

    #[test]
    fn test_crouch_under_beam_survives() {
        let mut state = running_on_rooftop(50_000.0);
        set_crouch(&mut state, true);
        state.beams.push(beam_on_player(&state));
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_standing_in_beam_ends_same_tick() {
        let mut state = running_on_rooftop(50_000.0);
        state.beams.push(beam_on_player(&state));
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Over);
    }

    #[test]
    fn test_edge_clip_resets_speed() {
        let mut state = running_on_rooftop(50_000.0);
        state.speed = 9.0;
        // Airborne and sinking into a taller building
        state.player.grounded = false;
        state.segments = vec![Segment::rooftop(SegmentId(10_005), 340.0, 500.0, 200.0)];
        state.player.pos.y = CANVAS_HEIGHT - 190.0;
        state.player.vy = -10.0;
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.speed, state.tuning.clip_reset_speed);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EdgeClip { .. }))
        );
    }

    #[test]
    fn test_chaser_contact_ends_run() {
        let mut state = running_on_rooftop(50_000.0);
        let size = state.chaser.size;
        state.chaser.lane_y = state.player.center().y - size / 2.0;
        state.chaser.pos.x = state.player.pos.x - size / 2.0 - state.speed;
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Over);
    }

    #[test]
    fn test_restart_resets_run_but_keeps_high_score() {
        let mut state = running_on_rooftop(380.0);
        state.score = 340;
        state.high_score = 200;
        end_run(&mut state, EndCause::Chaser);
        assert_eq!(state.high_score, 340);

        // Restart is ignored mid-run but honored when over
        assert!(restart(&mut state));
        assert_eq!(state.phase, RunPhase::Running);
        assert!(!restart(&mut state));
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, state.tuning.speed_floor);
        assert_eq!(state.high_score, 340);
        assert_eq!(state.chaser.cycle_count, 0);
        assert!(!state.segments.is_empty());
        assert!(terrain::frontier(&state) >= CANVAS_WIDTH);

        // A worse run leaves the best score alone
        state.score = 100;
        end_run(&mut state, EndCause::Fell);
        assert_eq!(state.high_score, 340);
    }

    #[test]
    fn test_over_ignores_input() {
        let mut state = running_on_rooftop(50_000.0);
        end_run(&mut state, EndCause::Beam);
        let y = state.player.pos.y;
        press_primary(&mut state);
        set_crouch(&mut state, true);
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Over);
        assert_eq!(state.player.pos.y, y);
        assert!(!state.player.crouching);
    }

    #[test]
    fn test_long_run_invariants() {
        let mut state = GameState::new(Tuning::default(), 2024, 0);
        start_game(&mut state);
        let mut last_score = 0;
        let mut last_speed = state.speed;
        for _ in 0..5_000 {
            tick(&mut state);
            let p = &state.player;
            assert!(!(p.grounded && p.bottom() > CANVAS_HEIGHT));
            assert!(state.score >= last_score);
            let clipped = state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::EdgeClip { .. }));
            if !clipped && state.phase == RunPhase::Running {
                assert!(state.speed >= last_speed);
            }
            last_score = state.score;
            last_speed = state.speed;
            if state.phase == RunPhase::Over {
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Tuning::default(), 99999, 0);
        let mut b = GameState::new(Tuning::default(), 99999, 0);
        start_game(&mut a);
        start_game(&mut b);
        for i in 0..300 {
            if i % 40 == 0 {
                press_primary(&mut a);
                press_primary(&mut b);
            }
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.segments.len(), b.segments.len());
        assert!((a.player.pos.y - b.player.pos.y).abs() < 1e-4);
    }
}
