//! Best score persistence
//!
//! A single integer in LocalStorage. Anything unreadable counts as zero.
//! During a session the best score lives in `GameState::high_score`.

use crate::platform::storage;

/// Best score across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "rooftop_runner_high_score";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Interpret a stored value; missing or non-numeric reads as zero
    pub fn parse(stored: Option<&str>) -> Self {
        let Some(raw) = stored else {
            return Self::default();
        };
        match raw.trim().parse::<u64>() {
            Ok(best) => Self { best },
            Err(_) => {
                log::warn!("Stored high score {:?} is not a number, using 0", raw);
                Self::default()
            }
        }
    }

    /// Load from storage (zero when absent)
    pub fn load() -> Self {
        let stored = storage::load_item(Self::STORAGE_KEY);
        let high = Self::parse(stored.as_deref());
        log::info!("High score: {}", high.best);
        high
    }

    pub fn save(&self) {
        storage::save_item(Self::STORAGE_KEY, &self.best.to_string());
        log::info!("High score saved ({})", self.best);
    }
}
