//! Input bindings
//!
//! Maps DOM `KeyboardEvent.code` values to game actions. Pointer clicks are
//! always the primary action.

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start when idle, jump when running
    Primary,
    /// Crouch pressed (true) or released (false)
    Crouch(bool),
    /// Restart after game over
    Restart,
}

/// Key codes bound to the primary action
pub const PRIMARY_KEYS: [&str; 2] = ["Space", "ArrowUp"];
pub const CROUCH_KEY: &str = "ArrowDown";
pub const RESTART_KEY: &str = "KeyR";

/// Action for a key press, if the key is bound
pub fn key_down(code: &str) -> Option<Action> {
    if PRIMARY_KEYS.contains(&code) {
        Some(Action::Primary)
    } else if code == CROUCH_KEY {
        Some(Action::Crouch(true))
    } else if code == RESTART_KEY {
        Some(Action::Restart)
    } else {
        None
    }
}

/// Action for a key release, if the key is bound
pub fn key_up(code: &str) -> Option<Action> {
    (code == CROUCH_KEY).then_some(Action::Crouch(false))
}
