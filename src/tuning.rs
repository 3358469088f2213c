//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Two presets exist because the
//! game shipped with two divergent balance passes; `Arcade` is canonical.

use serde::{Deserialize, Serialize};

/// Named balance presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Chaser mirrors game speed from the first tick, clipping resets to the floor
    #[default]
    Arcade,
    /// Chaser starts slow and ramps up, clipping resets below the floor
    Classic,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Arcade => "Arcade",
            TuningPreset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "arcade" => Some(TuningPreset::Arcade),
            "classic" => Some(TuningPreset::Classic),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            TuningPreset::Arcade => Tuning::arcade(),
            TuningPreset::Classic => Tuning::classic(),
        }
    }
}

/// Max-jumpable-gap scaling for one speed band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapTier {
    /// Inclusive upper speed bound (None = open-ended)
    pub up_to_speed: Option<f32>,
    /// Fraction of the full time-of-flight distance considered safe
    pub factor: f32,
    /// Absolute cap in pixels
    pub cap: Option<f32>,
}

/// Beam spawn chance for one speed band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamTier {
    /// Inclusive upper speed bound (None = open-ended)
    pub up_to_speed: Option<f32>,
    pub chance: f64,
}

/// Finds the first tier whose bound admits `speed`, falling back to the last.
fn tier_for<T: Copy>(tiers: &[T], speed: f32, bound: impl Fn(&T) -> Option<f32>) -> Option<T> {
    tiers
        .iter()
        .find(|t| bound(t).is_none_or(|max| speed <= max))
        .or_else(|| tiers.last())
        .copied()
}

/// Complete balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration per tick (px/tick²)
    pub gravity: f32,
    /// Upward velocity applied on jump (px/tick, positive number)
    pub jump_impulse: f32,

    // === Speed ===
    /// Scroll speed at run start (px/tick)
    pub speed_floor: f32,
    /// Added to the scroll speed every tick
    pub speed_ramp: f32,
    /// Speed after clipping a building edge
    pub clip_reset_speed: f32,

    // === Player ===
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_crouch_height: f32,

    // === Terrain ===
    pub rooftop_min_height: f32,
    pub rooftop_max_height: f32,
    pub rooftop_min_width: f32,
    pub rooftop_max_width: f32,
    /// Probability that a candidate segment becomes a gap
    pub gap_chance: f64,
    /// Gaps only start beyond this world x
    pub gap_min_start_x: f32,
    /// Minimum gap width is min(this, max_gap * gap_min_fraction)
    pub gap_min_width: f32,
    pub gap_min_fraction: f32,
    pub gap_tiers: Vec<GapTier>,
    /// Initial fill covers the viewport plus this many pixels
    pub fill_lookahead: f32,
    /// Extend once the rightmost edge is within viewport + this margin
    pub extend_margin: f32,

    // === Beams ===
    /// Beams only spawn over rooftops starting beyond this world x
    pub beam_min_start_x: f32,
    pub beam_tiers: Vec<BeamTier>,
    pub beam_min_width: f32,
    pub beam_max_width: f32,
    pub beam_min_opacity: f32,
    pub beam_max_opacity: f32,
    /// Pulse phase advance per tick
    pub beam_pulse_rate: f32,

    // === Chaser ===
    pub chaser_size: f32,
    pub chaser_start_x: f32,
    /// Extra distance left of the viewport on re-entry
    pub chaser_reentry_offset: f32,
    /// Lanes as fractions of canvas height, picked by cycle count
    pub chaser_lanes: [f32; 3],
    pub chaser_bob_amplitude: f32,
    pub chaser_phase_step: f32,
    /// Bob uses sin(phase * this)
    pub chaser_bob_frequency: f32,
    pub chaser_initial_speed: f32,
    /// Ticks for the chaser to catch up with game speed (0 = mirror immediately)
    pub chaser_catch_up_ticks: u32,

    // === Scoring ===
    pub rooftop_points: u64,
    pub gap_points: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::arcade()
    }
}

impl Tuning {
    /// LocalStorage key for a JSON override
    pub const STORAGE_KEY: &'static str = "rooftop_runner_tuning";

    /// Canonical balance
    pub fn arcade() -> Self {
        Self {
            gravity: 0.6,
            jump_impulse: 16.0,

            speed_floor: 4.0,
            speed_ramp: 0.003,
            clip_reset_speed: 4.0,

            player_start_x: 350.0,
            player_start_y: 120.0,
            player_width: 30.0,
            player_height: 30.0,
            player_crouch_height: 15.0,

            rooftop_min_height: 80.0,
            rooftop_max_height: 160.0,
            rooftop_min_width: 60.0,
            rooftop_max_width: 150.0,
            gap_chance: 0.3,
            gap_min_start_x: 200.0,
            gap_min_width: 20.0,
            gap_min_fraction: 0.4,
            gap_tiers: vec![
                GapTier { up_to_speed: Some(5.0), factor: 0.5, cap: Some(30.0) },
                GapTier { up_to_speed: Some(7.0), factor: 0.6, cap: Some(50.0) },
                GapTier { up_to_speed: None, factor: 0.8, cap: None },
            ],
            fill_lookahead: 200.0,
            extend_margin: 100.0,

            beam_min_start_x: 300.0,
            beam_tiers: vec![
                BeamTier { up_to_speed: Some(5.0), chance: 0.02 },
                BeamTier { up_to_speed: Some(7.0), chance: 0.08 },
                BeamTier { up_to_speed: None, chance: 0.15 },
            ],
            beam_min_width: 20.0,
            beam_max_width: 50.0,
            beam_min_opacity: 0.7,
            beam_max_opacity: 1.0,
            beam_pulse_rate: 0.1,

            chaser_size: 80.0,
            chaser_start_x: -120.0,
            chaser_reentry_offset: 50.0,
            chaser_lanes: [0.3, 0.5, 0.7],
            chaser_bob_amplitude: 10.0,
            chaser_phase_step: 0.2,
            chaser_bob_frequency: 0.5,
            chaser_initial_speed: 4.0,
            chaser_catch_up_ticks: 0,

            rooftop_points: 20,
            gap_points: 50,
        }
    }

    /// Alternate balance: slow-starting chaser and a harsher edge clip
    ///
    /// The gap and beam tiers here are illustrative alternates, gentler than
    /// the arcade ones, not values from any shipped build.
    pub fn classic() -> Self {
        Self {
            clip_reset_speed: 2.0,
            gap_tiers: vec![
                GapTier { up_to_speed: Some(5.0), factor: 0.5, cap: Some(40.0) },
                GapTier { up_to_speed: None, factor: 0.6, cap: None },
            ],
            beam_tiers: vec![
                BeamTier { up_to_speed: Some(5.0), chance: 0.0 },
                BeamTier { up_to_speed: Some(7.0), chance: 0.05 },
                BeamTier { up_to_speed: None, chance: 0.1 },
            ],
            chaser_initial_speed: 1.0,
            chaser_catch_up_ticks: 900,
            ..Self::arcade()
        }
    }

    /// Scaling tier for the max jumpable gap at `speed`
    pub fn gap_tier(&self, speed: f32) -> GapTier {
        tier_for(&self.gap_tiers, speed, |t| t.up_to_speed).unwrap_or(GapTier {
            up_to_speed: None,
            factor: 1.0,
            cap: None,
        })
    }

    /// Beam spawn chance at `speed`
    pub fn beam_chance(&self, speed: f32) -> f64 {
        tier_for(&self.beam_tiers, speed, |t| t.up_to_speed)
            .map(|t| t.chance)
            .unwrap_or(0.0)
    }

    /// Parse a JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning: a stored JSON override wins, otherwise the preset
    pub fn load(preset: TuningPreset) -> Self {
        match crate::platform::storage::load_item(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override from storage");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning override: {}", e);
                    preset.tuning()
                }
            },
            None => {
                log::info!("Using {} tuning", preset.as_str());
                preset.tuning()
            }
        }
    }
}
