//! Rooftop Runner - An endless runner across procedurally generated rooftops
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, collisions, game state)
//! - `renderer`: Draw-command generation and the Canvas2D painter
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `highscores`: Persisted best score

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::{Tuning, TuningPreset};

/// Game configuration constants
pub mod consts {
    /// Logical canvas dimensions (all coordinates are in this pixel space)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Number of background stars
    pub const STAR_COUNT: usize = 60;
}
