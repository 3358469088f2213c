//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Before the first start input, showing the title prompt
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, score frozen until restart
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Dropped through a gap below the canvas
    Fell,
    /// Touched a beam while standing
    Beam,
    /// Caught by the chaser
    Chaser,
}

/// Terrain segment kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Rooftop,
    Gap,
}

/// Stable identifier of a terrain segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u32);

/// A rooftop or a gap in the terrain strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub kind: SegmentKind,
    pub x: f32,
    /// Top edge (canvas height for gaps)
    pub y: f32,
    pub width: f32,
    /// Zero for gaps
    pub height: f32,
}

impl Segment {
    pub fn rooftop(id: SegmentId, x: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            kind: SegmentKind::Rooftop,
            x,
            y: CANVAS_HEIGHT - height,
            width,
            height,
        }
    }

    pub fn gap(id: SegmentId, x: f32, width: f32) -> Self {
        Self {
            id,
            kind: SegmentKind::Gap,
            x,
            y: CANVAS_HEIGHT,
            width,
            height: 0.0,
        }
    }

    #[inline]
    pub fn is_gap(&self) -> bool {
        self.kind == SegmentKind::Gap
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A vertical energy beam standing on a rooftop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Base opacity (0-1)
    pub opacity: f32,
    /// Pulse animation phase (radians)
    pub phase: f32,
}

impl Beam {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity (positive = down)
    pub vy: f32,
    pub grounded: bool,
    pub crouching: bool,
    /// Rooftop currently underneath, if any
    pub support: Option<SegmentId>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x, tuning.player_start_y),
            width: tuning.player_width,
            height: tuning.player_height,
            vy: 0.0,
            grounded: false,
            crouching: false,
            support: None,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Whether the horizontal extent strictly overlaps `[x, x + width)`
    pub fn spans(&self, x: f32, width: f32) -> bool {
        self.right() > x && self.pos.x < x + width
    }
}

/// The pursuer that sweeps across the screen left to right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chaser {
    /// Top-left corner (y includes the bob offset)
    pub pos: Vec2,
    /// Lane the bob oscillates around
    pub lane_y: f32,
    pub size: f32,
    pub speed: f32,
    /// Mouth/bob animation phase
    pub phase: f32,
    /// Completed traversals this run
    pub cycle_count: u32,
}

impl Chaser {
    pub fn new(tuning: &Tuning) -> Self {
        let lane_y = CANVAS_HEIGHT / 2.0;
        Self {
            pos: Vec2::new(tuning.chaser_start_x, lane_y),
            lane_y,
            size: tuning.chaser_size,
            speed: tuning.chaser_initial_speed,
            phase: 0.0,
            cycle_count: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Whether any part of the chaser is horizontally inside the viewport
    pub fn on_screen(&self) -> bool {
        self.pos.x > -self.size && self.pos.x < CANVAS_WIDTH
    }
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    /// A segment scrolled off the left edge and was scored
    SegmentCleared { kind: SegmentKind, points: u64 },
    /// Player clipped a building edge; speed was reset
    EdgeClip { speed_before: f32 },
    /// Chaser re-entered from the left
    ChaserWrapped { cycle: u32, lane_y: f32 },
    RunEnded {
        cause: EndCause,
        score: u64,
        new_high_score: bool,
    },
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Balance constants for this session
    pub tuning: Tuning,
    pub phase: RunPhase,
    /// Score of the current (or last) run
    pub score: u64,
    /// Best score ever, persisted by the host
    pub high_score: u64,
    /// Scroll speed (px/tick)
    pub speed: f32,
    /// Running ticks this run
    pub time_ticks: u64,
    pub player: Player,
    pub chaser: Chaser,
    /// Terrain strip, ordered left to right
    pub segments: Vec<Segment>,
    /// Beams, ordered by spawn
    pub beams: Vec<Beam>,
    /// Pending events for the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game with a seeded RNG and a previously stored best score
    pub fn new(tuning: Tuning, seed: u64, high_score: u64) -> Self {
        Self::with_rng(tuning, seed, Pcg32::seed_from_u64(seed), high_score)
    }

    /// Create an idle game with an explicit RNG
    pub fn with_rng(tuning: Tuning, seed: u64, rng: Pcg32, high_score: u64) -> Self {
        let mut state = Self {
            seed,
            player: Player::new(&tuning),
            chaser: Chaser::new(&tuning),
            speed: tuning.speed_floor,
            tuning,
            phase: RunPhase::Idle,
            score: 0,
            high_score,
            time_ticks: 0,
            segments: Vec::new(),
            beams: Vec::new(),
            events: Vec::new(),
            rng,
            next_id: 1,
        };

        // Terrain is visible behind the title prompt
        super::terrain::fill(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset every per-run entity; the best score survives
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.speed = self.tuning.speed_floor;
        self.time_ticks = 0;
        self.player = Player::new(&self.tuning);
        self.chaser = Chaser::new(&self.tuning);
        self.segments.clear();
        self.beams.clear();
        super::terrain::fill(self);
    }

    /// Look up a segment by id
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|i| &self.segments[i])
    }

    /// Rooftop the player is standing over
    pub fn support(&self) -> Option<&Segment> {
        self.player.support.and_then(|id| self.segment(id))
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
