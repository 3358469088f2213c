//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input bindings (keyboard codes to game actions)
//! - Storage (LocalStorage on web, nothing natively)

pub mod input;
pub mod storage;
