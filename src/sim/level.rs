//! Level descriptors
//!
//! A `Level` is immutable once built. The session holds it through an `Rc`
//! and every actor reads its walls; nothing writes to them.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::{Arena, overlaps_any};
use super::geometry::{Rect, point_in_rect};
use crate::consts::{DOCUMENT_HEIGHT, DOCUMENT_WIDTH, ENEMY_SIZE, EXIT_SIZE, PLAYER_SIZE};

/// Reasons a level description is rejected
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {level}: wall {index} has non-positive or non-finite size")]
    InvalidWall { level: u32, index: usize },
    #[error("level {level}: wall {index} extends past the field")]
    WallOutOfBounds { level: u32, index: usize },
    #[error("level {level}: player start ({x}, {y}) is inside a wall or off the field")]
    BlockedStart { level: u32, x: f32, y: f32 },
    #[error("level {level}: enemy {index} spawns inside a wall or off the field")]
    BlockedSpawn { level: u32, index: usize },
    #[error("level {level}: enemy {index} has a waypoint off the field")]
    WaypointOutOfBounds { level: u32, index: usize },
    #[error("level {level}: exit ({x}, {y}) is off the field")]
    ExitOutOfBounds { level: u32, x: f32, y: f32 },
    #[error("level {level}: document {index} is inside a wall or off the field")]
    BlockedDocument { level: u32, index: usize },
    #[error("level set is empty")]
    Empty,
    #[error("malformed level data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where an enemy starts and the waypoints it cycles through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Vec2,
    #[serde(default)]
    pub patrol: Vec<Vec2>,
}

/// Static description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based number shown on the HUD
    pub number: u32,
    pub walls: Vec<Rect>,
    pub enemies: Vec<EnemySpawn>,
    /// Centre of the exit zone
    pub exit: Vec2,
    /// Player top-left corner at level start
    pub start: Vec2,
    /// Document top-left corners
    #[serde(default)]
    pub documents: Vec<Vec2>,
}

impl Level {
    /// Exit zone rectangle
    pub fn exit_rect(&self) -> Rect {
        Rect::from_center(self.exit, EXIT_SIZE, EXIT_SIZE)
    }

    /// Check the invariants the simulation relies on
    ///
    /// Actors must start clear of walls for the resolver's no-overlap
    /// guarantee to hold.
    pub fn validate(&self, arena: &Arena) -> Result<(), LevelError> {
        let level = self.number;
        let field = arena.bounds();
        let on_field =
            |r: &Rect| r.x >= 0.0 && r.y >= 0.0 && r.right() <= arena.width && r.bottom() <= arena.height;

        if let Some(index) = self.walls.iter().position(|w| !w.is_valid()) {
            return Err(LevelError::InvalidWall { level, index });
        }
        if let Some(index) = self.walls.iter().position(|w| !on_field(w)) {
            return Err(LevelError::WallOutOfBounds { level, index });
        }

        let player = Rect::at(self.start, PLAYER_SIZE, PLAYER_SIZE);
        if !on_field(&player) || overlaps_any(&player, &self.walls) {
            return Err(LevelError::BlockedStart {
                level,
                x: self.start.x,
                y: self.start.y,
            });
        }

        for (index, spawn) in self.enemies.iter().enumerate() {
            let body = Rect::at(spawn.pos, ENEMY_SIZE, ENEMY_SIZE);
            if !on_field(&body) || overlaps_any(&body, &self.walls) {
                return Err(LevelError::BlockedSpawn { level, index });
            }
            if spawn.patrol.iter().any(|&p| !point_in_rect(p, &field)) {
                return Err(LevelError::WaypointOutOfBounds { level, index });
            }
        }

        // An unreachable document makes the exit impossible to open
        for (index, &pos) in self.documents.iter().enumerate() {
            let doc = Self::document_rect(pos);
            if !on_field(&doc) || overlaps_any(&doc, &self.walls) {
                return Err(LevelError::BlockedDocument { level, index });
            }
        }

        if !point_in_rect(self.exit, &field) {
            return Err(LevelError::ExitOutOfBounds {
                level,
                x: self.exit.x,
                y: self.exit.y,
            });
        }

        Ok(())
    }

    /// Document bounding box at `pos`
    pub fn document_rect(pos: Vec2) -> Rect {
        Rect::at(pos, DOCUMENT_WIDTH, DOCUMENT_HEIGHT)
    }
}

/// Ordered list of levels making up a mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<Level>,
}

impl LevelSet {
    /// Parse and validate a level set from JSON
    pub fn from_json(json: &str, arena: &Arena) -> Result<Self, LevelError> {
        let set: LevelSet = serde_json::from_str(json)?;
        set.validate(arena)?;
        Ok(set)
    }

    pub fn validate(&self, arena: &Arena) -> Result<(), LevelError> {
        if self.levels.is_empty() {
            return Err(LevelError::Empty);
        }
        self.levels.iter().try_for_each(|l| l.validate(arena))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// The three stock missions
    pub fn builtin() -> Self {
        let v = Vec2::new;
        let r = Rect::new;
        let spawn = |x: f32, y: f32, patrol: &[(f32, f32)]| EnemySpawn {
            pos: v(x, y),
            patrol: patrol.iter().map(|&(px, py)| v(px, py)).collect(),
        };

        let levels = vec![
            // 1 - Simple
            Level {
                number: 1,
                walls: vec![
                    r(100.0, 100.0, 200.0, 20.0),
                    r(400.0, 150.0, 20.0, 200.0),
                    r(200.0, 300.0, 300.0, 20.0),
                    r(50.0, 400.0, 150.0, 20.0),
                ],
                enemies: vec![
                    spawn(300.0, 200.0, &[(300.0, 200.0), (500.0, 200.0)]),
                    spawn(150.0, 350.0, &[(150.0, 350.0), (150.0, 450.0)]),
                ],
                exit: v(700.0, 450.0),
                start: v(50.0, 50.0),
                documents: vec![v(600.0, 80.0), v(250.0, 450.0)],
            },
            // 2 - Medium
            Level {
                number: 2,
                walls: vec![
                    r(100.0, 50.0, 600.0, 20.0),
                    r(100.0, 50.0, 20.0, 300.0),
                    r(100.0, 350.0, 600.0, 20.0),
                    r(680.0, 50.0, 20.0, 300.0),
                    r(250.0, 150.0, 20.0, 150.0),
                    r(450.0, 150.0, 20.0, 150.0),
                ],
                enemies: vec![
                    spawn(200.0, 100.0, &[(200.0, 100.0), (200.0, 300.0)]),
                    spawn(300.0, 100.0, &[(300.0, 100.0), (500.0, 100.0)]),
                    spawn(500.0, 300.0, &[(500.0, 300.0), (300.0, 300.0)]),
                ],
                exit: v(650.0, 200.0),
                start: v(150.0, 100.0),
                documents: vec![v(180.0, 300.0), v(560.0, 200.0)],
            },
            // 3 - Hard
            Level {
                number: 3,
                walls: vec![
                    r(50.0, 50.0, 700.0, 20.0),
                    r(50.0, 50.0, 20.0, 400.0),
                    r(50.0, 450.0, 700.0, 20.0),
                    r(730.0, 50.0, 20.0, 400.0),
                    r(150.0, 150.0, 500.0, 20.0),
                    r(150.0, 150.0, 20.0, 150.0),
                    r(150.0, 300.0, 500.0, 20.0),
                    r(630.0, 150.0, 20.0, 150.0),
                    r(250.0, 250.0, 300.0, 20.0),
                ],
                enemies: vec![
                    spawn(200.0, 200.0, &[(200.0, 200.0), (400.0, 200.0)]),
                    spawn(400.0, 200.0, &[(400.0, 200.0), (400.0, 400.0)]),
                    spawn(500.0, 400.0, &[(500.0, 400.0), (200.0, 400.0)]),
                    spawn(300.0, 330.0, &[(300.0, 330.0), (500.0, 330.0)]),
                ],
                exit: v(700.0, 400.0),
                start: v(100.0, 100.0),
                documents: vec![v(700.0, 100.0), v(100.0, 420.0), v(400.0, 350.0)],
            },
        ];

        Self { levels }
    }
}
