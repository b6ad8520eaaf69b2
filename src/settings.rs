//! Game balance settings and difficulty presets
//!
//! Every tunable the simulation reads lives here. Speeds and rates are per
//! second so they stay correct for any fixed timestep.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::perception::VisionCone;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier on how fast the detection meter fills
    pub fn detection_gain_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Multiplier on enemy sight range
    pub fn range_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.85,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.2,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the numbers below were derived from
    pub difficulty: Difficulty,

    // === Player ===
    /// Walking speed (units/second)
    pub player_speed: f32,
    /// Speed while the run modifier is held
    pub run_speed: f32,
    /// Cooldown after a successful elimination (seconds)
    pub elimination_cooldown_secs: f32,
    /// Maximum centre distance for a backstab
    pub elimination_distance: f32,
    /// Half-angle of the rear arc that allows a backstab (radians)
    pub blind_spot_half_angle: f32,

    // === Enemies ===
    /// Patrol speed (units/second)
    pub enemy_speed: f32,
    /// Chase speed (units/second)
    pub alert_speed: f32,
    /// Sight range
    pub detection_range: f32,
    /// Half of the vision cone opening (radians)
    pub detection_half_angle: f32,
    /// Speed (units/second) below which a moving enemy counts as not progressing
    pub stuck_speed: f32,
    /// How long an enemy may fail to progress before it skips a waypoint
    pub stuck_seconds: f32,
    /// Push overlapping enemies apart
    pub separation: bool,
    /// An enemy that spots the player starts chasing on its own, before the meter fills
    pub chase_on_sight: bool,

    // === Detection meter ===
    /// Meter gain per second while any enemy sees the player
    pub detection_gain_per_sec: f32,
    /// Meter decay per second while unseen
    pub detection_decay_per_sec: f32,

    // === High alert ===
    /// Fraction of a level's enemies that must be eliminated to put the rest on high alert
    pub high_alert_ratio: f32,
    /// Sight range multiplier for enemies on high alert
    pub high_alert_range_multiplier: f32,

    // === HUD ===
    /// How long transient banners stay up (seconds)
    pub banner_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            player_speed: 120.0,
            run_speed: 240.0,
            elimination_cooldown_secs: 0.5,
            elimination_distance: 35.0,
            blind_spot_half_angle: std::f32::consts::FRAC_PI_3,

            enemy_speed: 60.0,
            alert_speed: 105.0,
            detection_range: 150.0,
            detection_half_angle: std::f32::consts::FRAC_PI_6,
            stuck_speed: 6.0,
            stuck_seconds: 1.0,
            separation: true,
            chase_on_sight: false,

            detection_gain_per_sec: 120.0,
            detection_decay_per_sec: 60.0,

            high_alert_ratio: 0.5,
            high_alert_range_multiplier: 1.5,

            banner_secs: 2.0,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset scaling)
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_difficulty(difficulty);
        settings
    }

    /// Apply a difficulty preset on top of the Normal baseline
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        let base = Self::default();
        self.difficulty = difficulty;
        self.detection_gain_per_sec = base.detection_gain_per_sec * difficulty.detection_gain_scale();
        self.detection_range = base.detection_range * difficulty.range_scale();
    }

    /// Vision cone every enemy starts a level with
    pub fn vision_cone(&self) -> VisionCone {
        VisionCone::new(self.detection_range, self.detection_half_angle)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }
}
