//! Player physics
//!
//! Vertical integration, rooftop support, landing, crouching and jumping.
//! Horizontal motion is the world scrolling past; the player's x never changes.

use super::state::{GameState, Player, Segment};
use crate::consts::*;
use crate::tuning::Tuning;

/// Result of one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    /// Resting on (or just landed on) a rooftop
    Landed,
    /// In the air, over a rooftop or a gap
    Airborne,
    /// Top edge dropped below the canvas through a gap
    Fell,
}

/// Widest gap that can be cleared at `speed`
///
/// Full time of flight is `2 * impulse / gravity` ticks; the horizontal
/// distance covered in that time is scaled down per speed tier.
pub fn max_jumpable_gap(tuning: &Tuning, speed: f32) -> f32 {
    let flight_ticks = 2.0 * tuning.jump_impulse / tuning.gravity;
    let distance = speed * flight_ticks;
    let tier = tuning.gap_tier(speed);
    let scaled = distance * tier.factor;
    match tier.cap {
        Some(cap) => scaled.min(cap),
        None => scaled,
    }
}

/// First rooftop under the player's horizontal extent
pub fn find_support<'a>(player: &Player, segments: &'a [Segment]) -> Option<&'a Segment> {
    segments
        .iter()
        .find(|s| !s.is_gap() && player.spans(s.x, s.width))
}

/// Apply gravity, find support, resolve landing
///
/// `grounded` is cleared only when nothing is underneath.
pub fn step_player(state: &mut GameState) -> PlayerStep {
    let gravity = state.tuning.gravity;
    let player = &mut state.player;

    player.vy += gravity;
    player.pos.y += player.vy;

    let support = find_support(player, &state.segments).map(|s| (s.id, s.y));
    player.support = support.map(|(id, _)| id);

    match support {
        Some((_, top)) if player.bottom() >= top && player.vy >= 0.0 => {
            player.pos.y = top - player.height;
            player.vy = 0.0;
            player.grounded = true;
            PlayerStep::Landed
        }
        // Dropping toward a lower roof keeps the grounded flag as it was
        Some(_) => PlayerStep::Airborne,
        None => {
            player.grounded = false;
            if player.pos.y > CANVAS_HEIGHT {
                PlayerStep::Fell
            } else {
                PlayerStep::Airborne
            }
        }
    }
}

/// Jump if standing upright on a rooftop
///
/// Returns whether the jump happened.
pub fn jump(state: &mut GameState) -> bool {
    let player = &mut state.player;
    if !player.grounded || player.crouching {
        return false;
    }
    player.vy = -state.tuning.jump_impulse;
    player.grounded = false;
    true
}

/// Crouch or stand up; only honored while grounded
///
/// The bottom edge stays on the supporting rooftop. Returns whether the
/// request was honored.
pub fn crouch(state: &mut GameState, crouching: bool) -> bool {
    if !state.player.grounded {
        return false;
    }
    let height = if crouching {
        state.tuning.player_crouch_height
    } else {
        state.tuning.player_height
    };

    let player = &mut state.player;
    let bottom = player.bottom();
    player.crouching = crouching;
    player.height = height;
    player.pos.y = bottom - height;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SegmentId;

    /// Player standing on a single long rooftop
    fn grounded_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 1, 0);
        state.segments = vec![Segment::rooftop(SegmentId(1_000), 0.0, 2000.0, 100.0)];
        state.beams.clear();
        state.player.pos.y = CANVAS_HEIGHT - 100.0 - state.player.height;
        state.player.grounded = true;
        state.player.support = Some(SegmentId(1_000));
        state
    }

    #[test]
    fn test_max_gap_tiers() {
        let t = Tuning::default();
        // Flight time is 2 * 16 / 0.6 = 53.33 ticks
        assert_eq!(max_jumpable_gap(&t, 4.0), 30.0);
        assert_eq!(max_jumpable_gap(&t, 6.0), 50.0);
        let expected = 8.0 * (32.0 / 0.6) * 0.8;
        assert!((max_jumpable_gap(&t, 8.0) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_standing_stays_grounded() {
        let mut state = grounded_state();
        for _ in 0..10 {
            assert_eq!(step_player(&mut state), PlayerStep::Landed);
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.bottom(), CANVAS_HEIGHT - 100.0);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_support_ignores_gaps() {
        let mut state = grounded_state();
        state.segments = vec![
            Segment::gap(SegmentId(1), 300.0, 100.0),
            Segment::rooftop(SegmentId(2), 370.0, 100.0, 100.0),
        ];
        let support = find_support(&state.player, &state.segments).map(|s| s.id);
        assert_eq!(support, Some(SegmentId(2)));

        // Touching edges don't count
        state.segments = vec![Segment::rooftop(SegmentId(3), 380.0, 100.0, 100.0)];
        assert!(find_support(&state.player, &state.segments).is_none());
    }

    #[test]
    fn test_falls_through_gap() {
        let mut state = grounded_state();
        state.segments = vec![Segment::gap(SegmentId(5), 0.0, 2000.0)];
        let mut fell = false;
        for _ in 0..100 {
            match step_player(&mut state) {
                PlayerStep::Fell => {
                    fell = true;
                    break;
                }
                step => assert_eq!(step, PlayerStep::Airborne),
            }
            assert!(!state.player.grounded);
        }
        assert!(fell);
        assert!(state.player.pos.y > CANVAS_HEIGHT);
    }

    #[test]
    fn test_jump_requires_grounded_and_upright() {
        let mut state = grounded_state();
        assert!(crouch(&mut state, true));
        assert!(!jump(&mut state));
        assert!(crouch(&mut state, false));
        assert!(jump(&mut state));
        assert_eq!(state.player.vy, -16.0);
        assert!(!state.player.grounded);
        // No double jump
        assert!(!jump(&mut state));
    }

    #[test]
    fn test_crouch_keeps_feet_on_roof() {
        let mut state = grounded_state();
        let feet = state.player.bottom();
        crouch(&mut state, true);
        assert_eq!(state.player.height, 15.0);
        assert_eq!(state.player.bottom(), feet);
        crouch(&mut state, false);
        assert_eq!(state.player.height, 30.0);
        assert_eq!(state.player.bottom(), feet);
    }

    #[test]
    fn test_crouch_ignored_in_air() {
        let mut state = grounded_state();
        jump(&mut state);
        assert!(!crouch(&mut state, true));
        assert!(!state.player.crouching);
        assert_eq!(state.player.height, 30.0);
    }

    #[test]
    fn test_release_in_air_is_ignored() {
        let mut state = grounded_state();
        crouch(&mut state, true);
        // Over a gap, so the step clears grounded
        state.segments = vec![Segment::gap(SegmentId(6), 0.0, 2000.0)];
        assert_eq!(step_player(&mut state), PlayerStep::Airborne);
        assert!(!state.player.grounded);
        assert!(!crouch(&mut state, false));
        assert!(state.player.crouching);
        assert_eq!(state.player.height, 15.0);
    }

    #[test]
    fn test_drop_to_lower_roof_stays_grounded() {
        let mut state = grounded_state();
        // Lower roof under the player, tall one already gone
        state.segments = vec![Segment::rooftop(SegmentId(7), 0.0, 2000.0, 20.0)];
        assert_eq!(step_player(&mut state), PlayerStep::Airborne);
        assert!(state.player.grounded);
        assert_eq!(state.player.support, Some(SegmentId(7)));
    }

    #[test]
    fn test_jump_arc_returns_to_roof() {
        let mut state = grounded_state();
        jump(&mut state);
        let mut ticks = 0;
        while step_player(&mut state) != PlayerStep::Landed {
            ticks += 1;
            assert!(ticks < 100);
        }
        // Discrete arc lands on the 53rd step
        assert_eq!(ticks + 1, 53);
    }
}
