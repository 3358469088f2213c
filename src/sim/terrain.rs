//! Terrain and hazard generation
//!
//! The strip of rooftops and gaps is generated just ahead of the viewport and
//! scrolled left every tick. Segments that leave on the left are scored.
//! Beams are rolled while generating rooftops and then live on their own.

use rand::Rng;

use super::physics::max_jumpable_gap;
use super::state::{Beam, GameEvent, GameState, Segment, SegmentId, SegmentKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Uniform draw in `[min, max]`
#[inline]
fn draw<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    (min + rng.random::<f32>() * (max - min)).min(max)
}

/// Beam dimensions rolled alongside a rooftop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamRoll {
    pub width: f32,
    pub opacity: f32,
    pub phase: f32,
}

/// Outcome of rolling the next segment, before ids are assigned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentRoll {
    Gap {
        width: f32,
    },
    Rooftop {
        width: f32,
        height: f32,
        beam: Option<BeamRoll>,
    },
}

/// Roll the segment that starts at `start_x` while scrolling at `speed`
pub fn roll_segment<R: Rng + ?Sized>(
    tuning: &Tuning,
    speed: f32,
    start_x: f32,
    rng: &mut R,
) -> SegmentRoll {
    // Always consume the roll so the sequence doesn't depend on start_x
    let gap_roll = rng.random::<f64>();
    if gap_roll < tuning.gap_chance && start_x > tuning.gap_min_start_x {
        let max_gap = max_jumpable_gap(tuning, speed);
        let min_gap = tuning.gap_min_width.min(max_gap * tuning.gap_min_fraction);
        return SegmentRoll::Gap {
            width: draw(rng, min_gap, max_gap),
        };
    }

    let height = draw(rng, tuning.rooftop_min_height, tuning.rooftop_max_height);
    let width = draw(rng, tuning.rooftop_min_width, tuning.rooftop_max_width);

    let beam_roll = rng.random::<f64>();
    let beam = (beam_roll < tuning.beam_chance(speed) && start_x > tuning.beam_min_start_x)
        .then(|| roll_beam(tuning, rng));

    SegmentRoll::Rooftop {
        width,
        height,
        beam,
    }
}

fn roll_beam<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> BeamRoll {
    BeamRoll {
        width: draw(rng, tuning.beam_min_width, tuning.beam_max_width),
        opacity: draw(rng, tuning.beam_min_opacity, tuning.beam_max_opacity),
        phase: draw(rng, 0.0, std::f32::consts::TAU),
    }
}

/// Beam centered over `roof`, reaching one canvas height above its top
pub fn beam_over(id: u32, roof: &Segment, roll: BeamRoll) -> Beam {
    Beam {
        id,
        x: roof.x + (roof.width - roll.width) / 2.0,
        y: roof.y - CANVAS_HEIGHT,
        width: roll.width,
        height: CANVAS_HEIGHT,
        opacity: roll.opacity,
        phase: roll.phase,
    }
}

/// Generate and append the segment starting at `start_x`
pub fn push_segment(state: &mut GameState, start_x: f32) {
    let roll = roll_segment(&state.tuning, state.speed, start_x, &mut state.rng);
    let id = SegmentId(state.next_entity_id());
    match roll {
        SegmentRoll::Gap { width } => {
            state.segments.push(Segment::gap(id, start_x, width));
        }
        SegmentRoll::Rooftop {
            width,
            height,
            beam,
        } => {
            let roof = Segment::rooftop(id, start_x, width, height);
            if let Some(beam) = beam {
                let beam_id = state.next_entity_id();
                state.beams.push(beam_over(beam_id, &roof, beam));
            }
            state.segments.push(roof);
        }
    }
}

/// Right edge of the strip (0 when empty)
pub fn frontier(state: &GameState) -> f32 {
    state.segments.last().map(|s| s.right()).unwrap_or(0.0)
}

/// Generate until the strip covers the viewport plus the lookahead
pub fn fill(state: &mut GameState) {
    let target = CANVAS_WIDTH + state.tuning.fill_lookahead;
    let mut current_x = frontier(state);
    while current_x < target {
        push_segment(state, current_x);
        current_x = frontier(state);
    }
}

/// Move every segment and beam left by the current speed; pulse beams
pub fn scroll(state: &mut GameState) {
    let speed = state.speed;
    for segment in &mut state.segments {
        segment.x -= speed;
    }
    let pulse = state.tuning.beam_pulse_rate;
    for beam in &mut state.beams {
        beam.x -= speed;
        beam.phase += pulse;
    }
}

/// Drop everything fully left of the viewport, scoring evicted segments
///
/// Returns the points awarded.
pub fn evict(state: &mut GameState) -> u64 {
    let GameState {
        tuning,
        segments,
        beams,
        events,
        ..
    } = state;

    let mut points = 0;
    segments.retain(|segment| {
        if segment.right() >= 0.0 {
            return true;
        }
        let award = match segment.kind {
            SegmentKind::Rooftop => tuning.rooftop_points,
            SegmentKind::Gap => tuning.gap_points,
        };
        points += award;
        events.push(GameEvent::SegmentCleared {
            kind: segment.kind,
            points: award,
        });
        false
    });
    beams.retain(|beam| beam.right() >= 0.0);

    state.score += points;
    points
}

/// Keep exactly one pending segment ahead of the trailing margin
pub fn extend(state: &mut GameState) {
    if state.segments.is_empty() {
        fill(state);
        return;
    }
    let edge = frontier(state);
    if edge < CANVAS_WIDTH + state.tuning.extend_margin {
        push_segment(state, edge);
    }
}

/// One tick of terrain: scroll, evict and score, extend, then ramp speed
pub fn advance(state: &mut GameState) {
    scroll(state);
    evict(state);
    extend(state);
    state.speed += state.tuning.speed_ramp;
}
