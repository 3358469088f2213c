//! Draw-command generation
//!
//! Turns a [`GameState`] into an ordered list of 2D primitives. Nothing here
//! touches the simulation or the browser; the canvas painter replays the list.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::physics::max_jumpable_gap;
use crate::sim::state::{Beam, Chaser, GameState, Player, RunPhase, Segment};

/// RGBA color, channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from byte channels
    pub const fn rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with alpha scaled by `factor`
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba()` string
    pub fn css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }
}

pub const BLACK: Color = Color::rgb_u8(0, 0, 0);
pub const WHITE: Color = Color::rgb_u8(255, 255, 255);
pub const PLAYER_WHITE: Color = Color::rgb_u8(255, 252, 252);
pub const BUILDING_GRAY: Color = Color::rgb_u8(0x33, 0x33, 0x33);
pub const GOLD: Color = Color::rgb_u8(255, 215, 0);
pub const BEAM_YELLOW: Color = Color::rgb_u8(255, 255, 0);

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One 2D primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
    },
    /// Rectangle filled with a left-to-right gradient
    GradientRect {
        rect: Rect,
        stops: Vec<(f32, Color)>,
    },
    /// Filled circle with a slice removed (a full circle when the slice is empty)
    Wedge {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
        /// Shadow blur radius (0 = none)
        glow: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        bold: bool,
        align: TextAlign,
        color: Color,
    },
}

/// A background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
}

/// Static scenery generated once per session
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub stars: Vec<Star>,
}

impl Backdrop {
    /// Scatter stars over the top 70% of the sky
    pub fn generate(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * CANVAS_WIDTH,
                    rng.random::<f32>() * CANVAS_HEIGHT * 0.7,
                ),
                size: 1.0 + rng.random::<f32>() * 2.0,
            })
            .collect();
        Self { stars }
    }
}

/// Window grid spacing and size
const WINDOW_STEP_X: f32 = 20.0;
const WINDOW_STEP_Y: f32 = 25.0;
const WINDOW_W: f32 = 8.0;
const WINDOW_H: f32 = 12.0;
/// Ticks between window flicker changes
const FLICKER_TICKS: u64 = 8;

/// Whether a building window is lit this frame (~70% are)
pub fn window_lit(segment_id: u32, row: u32, col: u32, time_ticks: u64) -> bool {
    let epoch = time_ticks / FLICKER_TICKS;
    let mut h = (segment_id as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(((row as u64) << 32) | col as u64)
        .wrapping_add(epoch.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    h ^= h >> 31;
    h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^= h >> 29;
    (h % 1000) >= 300
}

/// Half-angle of the chaser's mouth
pub fn mouth_openness(phase: f32) -> f32 {
    0.4 + 0.4 * phase.sin().abs()
}

/// Effective alpha of a pulsing beam
pub fn beam_alpha(beam: &Beam) -> f32 {
    beam.opacity * (0.5 + 0.3 * beam.phase.sin())
}

fn background(out: &mut Vec<DrawCommand>, backdrop: &Backdrop) {
    out.push(DrawCommand::Rect {
        rect: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        color: BLACK,
    });
    out.extend(backdrop.stars.iter().map(|star| DrawCommand::Rect {
        rect: Rect::new(star.pos.x, star.pos.y, star.size, star.size),
        color: WHITE,
    }));
}

fn beam(out: &mut Vec<DrawCommand>, beam: &Beam) {
    let alpha = beam_alpha(beam);
    out.push(DrawCommand::GradientRect {
        rect: beam.rect(),
        stops: vec![
            (0.0, BEAM_YELLOW.fade(0.2 * alpha)),
            (0.5, BEAM_YELLOW.fade(0.8 * alpha)),
            (1.0, BEAM_YELLOW.fade(0.2 * alpha)),
        ],
    });
    let edge = BEAM_YELLOW.fade(0.9 * alpha);
    out.push(DrawCommand::Rect {
        rect: Rect::new(beam.x, beam.y, 2.0, beam.height),
        color: edge,
    });
    out.push(DrawCommand::Rect {
        rect: Rect::new(beam.right() - 2.0, beam.y, 2.0, beam.height),
        color: edge,
    });
}

fn building(out: &mut Vec<DrawCommand>, roof: &Segment, time_ticks: u64) {
    out.push(DrawCommand::Rect {
        rect: roof.rect(),
        color: BUILDING_GRAY,
    });

    let rows = (roof.height / WINDOW_STEP_Y).floor() as u32;
    let cols = (roof.width / WINDOW_STEP_X).floor() as u32;
    for row in 0..rows {
        for col in 0..cols {
            if window_lit(roof.id.0, row, col, time_ticks) {
                out.push(DrawCommand::Rect {
                    rect: Rect::new(
                        roof.x + col as f32 * WINDOW_STEP_X + 5.0,
                        roof.y + row as f32 * WINDOW_STEP_Y + 5.0,
                        WINDOW_W,
                        WINDOW_H,
                    ),
                    color: GOLD,
                });
            }
        }
    }
}

fn chaser(out: &mut Vec<DrawCommand>, chaser: &Chaser) {
    let center = chaser.center();
    let radius = chaser.radius();
    let mouth = mouth_openness(chaser.phase);

    out.push(DrawCommand::Wedge {
        center,
        radius,
        start_angle: mouth,
        end_angle: TAU - mouth,
        color: GOLD,
        glow: 0.0,
    });
    out.push(DrawCommand::Circle {
        center: center + Vec2::new(-radius * 0.2, -radius * 0.3),
        radius: radius * 0.1,
        color: BLACK,
    });
    // Glowing inner layer
    out.push(DrawCommand::Wedge {
        center,
        radius: radius * 0.9,
        start_angle: mouth,
        end_angle: TAU - mouth,
        color: GOLD,
        glow: 10.0,
    });
}

fn player(out: &mut Vec<DrawCommand>, player: &Player) {
    out.push(DrawCommand::Rect {
        rect: player.rect(),
        color: PLAYER_WHITE,
    });
    out.push(DrawCommand::Rect {
        rect: Rect::new(player.pos.x + 5.0, player.pos.y + 5.0, 3.0, 3.0),
        color: BLACK,
    });
}

fn text(out: &mut Vec<DrawCommand>, text: String, x: f32, y: f32, size_px: f32, bold: bool, align: TextAlign) {
    out.push(DrawCommand::Text {
        text,
        pos: Vec2::new(x, y),
        size_px,
        bold,
        align,
        color: WHITE,
    });
}

fn hud(out: &mut Vec<DrawCommand>, state: &GameState) {
    match state.phase {
        RunPhase::Idle => {
            let cx = CANVAS_WIDTH / 2.0;
            text(out, "Rooftop Runner".into(), cx, 60.0, 24.0, true, TextAlign::Center);
            text(
                out,
                "Jump gaps, duck beams, outrun the chaser!".into(),
                cx,
                85.0,
                16.0,
                false,
                TextAlign::Center,
            );
            text(out, "Press SPACE to start".into(), cx, 105.0, 16.0, false, TextAlign::Center);
        }
        RunPhase::Running => {
            let max_gap = max_jumpable_gap(&state.tuning, state.speed);
            let lines = [
                format!("Speed: {:.1}", state.speed),
                format!("Max Gap: {:.0}px", max_gap),
                format!("Chaser Cycle: {}", state.chaser.cycle_count),
            ];
            for (i, line) in lines.into_iter().enumerate() {
                text(out, line, 10.0, 20.0 + i as f32 * 15.0, 12.0, false, TextAlign::Left);
            }
        }
        RunPhase::Over => {}
    }
}

/// Build the full frame, back to front
pub fn build_scene(state: &GameState, backdrop: &Backdrop) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(256);

    background(&mut out, backdrop);
    for b in &state.beams {
        beam(&mut out, b);
    }
    for roof in state.segments.iter().filter(|s| !s.is_gap()) {
        building(&mut out, roof, state.time_ticks);
    }
    chaser(&mut out, &state.chaser);
    player(&mut out, &state.player);
    hud(&mut out, state);

    out
}
