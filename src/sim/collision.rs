//! Collision detection
//!
//! Axis-aligned rectangles for rooftops, beams and the player; a circle test
//! for the chaser. Detection is pure, the tick applies the response.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EndCause, GameState};

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap; shared edges don't count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x + self.w > other.x
            && self.x < other.x + other.w
            && self.y + self.h > other.y
            && self.y < other.y + other.h
    }
}

/// Whether two circles intersect (touching doesn't count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Outcome of the collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    None,
    /// Airborne player clipped a building; punished with a speed reset
    EdgeClip,
    /// Run-ending contact
    Fatal(EndCause),
}

/// Check the player against rooftops, beams and the chaser, in that order
pub fn detect(state: &GameState) -> Collision {
    let player = &state.player;
    let body = player.rect();

    if !player.grounded
        && state
            .segments
            .iter()
            .any(|s| !s.is_gap() && body.overlaps(&s.rect()))
    {
        return Collision::EdgeClip;
    }

    if !player.crouching && state.beams.iter().any(|b| body.overlaps(&b.rect())) {
        return Collision::Fatal(EndCause::Beam);
    }

    let chaser = &state.chaser;
    if chaser.on_screen() {
        let player_radius = player.width.max(player.height) / 2.0;
        if circles_overlap(chaser.center(), chaser.radius(), player.center(), player_radius) {
            return Collision::Fatal(EndCause::Chaser);
        }
    }

    Collision::None
}
