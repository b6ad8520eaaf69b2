//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (by enemy ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod banner;
pub mod collision;
pub mod enemy;
pub mod geometry;
pub mod level;
pub mod perception;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use banner::{Banner, BannerKind, BannerQueue};
pub use collision::{Arena, MoveOutcome, resolve_move, separate};
pub use enemy::{Enemy, EnemyMode, EnemyStep};
pub use geometry::{Rect, point_in_rect, rects_overlap, segment_intersects_rect, segments_intersect};
pub use level::{EnemySpawn, Level, LevelError, LevelSet};
pub use perception::{VisionCone, can_see, has_line_of_sight};
pub use state::{DetectionMeter, Document, Facing, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
