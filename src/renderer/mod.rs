//! Rendering module
//!
//! `scene` builds draw commands from the game state; `canvas` replays them on
//! a browser `CanvasRenderingContext2d`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use scene::{Backdrop, Color, DrawCommand, TextAlign, build_scene};
