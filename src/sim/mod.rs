//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed per-tick constants
//! - Seeded RNG only
//! - Stable iteration order (segments left to right)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod chaser;
pub mod collision;
pub mod physics;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{Collision, Rect};
pub use physics::max_jumpable_gap;
pub use state::{
    Beam, Chaser, EndCause, GameEvent, GameState, Player, RunPhase, Segment, SegmentId,
    SegmentKind,
};
pub use tick::{press_primary, restart, set_crouch, start_game, tick};
