//! Covert Ops - A top-down stealth game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, movement, perception, enemy AI, session rules)
//! - `game`: Fixed-step frame loop driving the simulation and the frontend
//! - `view`: Snapshots handed to rendering/HUD collaborators
//! - `settings`: Data-driven game balance and difficulty presets

pub mod game;
pub mod settings;
pub mod sim;
pub mod view;

pub use game::Game;
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Actor bounding boxes
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const ENEMY_SIZE: f32 = 20.0;

    /// Document (item) bounding box
    pub const DOCUMENT_WIDTH: f32 = 20.0;
    pub const DOCUMENT_HEIGHT: f32 = 25.0;

    /// Exit zone is a square centred on the level's exit point
    pub const EXIT_SIZE: f32 = 30.0;

    /// Distance at which a patrolling enemy counts as arrived at a waypoint
    pub const WAYPOINT_ARRIVAL: f32 = 5.0;

    /// Detection meter bounds
    pub const DETECTION_MAX: f32 = 100.0;
}

/// Normalize an angle to (-π, π]
///
/// Goes through `atan2(sin, cos)` so wraparound at ±π is handled for any input.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.sin().atan2(angle.cos());
    // f32 π is a hair short of the real π, so sin(π) is slightly negative
    // and atan2 lands just above -π. Anything that close to the seam is π.
    if wrapped <= -std::f32::consts::PI + 1e-6 {
        std::f32::consts::PI
    } else {
        wrapped
    }
}

/// Bearing (radians) from one point to another
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Signed smallest difference `to - from`, normalized to (-π, π]
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}
