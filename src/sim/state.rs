//! Session state and the entities it owns
//!
//! Everything here is rebuilt from the `Level` on every (re)start.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::banner::BannerQueue;
use super::enemy::Enemy;
use super::geometry::Rect;
use super::level::{Level, LevelSet};
use crate::consts::{DETECTION_MAX, PLAYER_SIZE};
use crate::settings::Settings;

/// Current phase of a level playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// An enemy touched the player; only a restart recovers
    Caught,
    /// Exit reached with every document; more levels remain
    LevelComplete,
    /// Final level completed
    MissionComplete,
}

/// Discrete player facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Facing {
    /// Facing as an angle, matching enemy headings (y grows downward)
    pub fn angle(&self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Facing::Right => 0.0,
            Facing::Left => PI,
            Facing::Up => -FRAC_PI_2,
            Facing::Down => FRAC_PI_2,
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    /// Seconds until another elimination may be attempted
    pub elimination_cooldown: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            facing: Facing::Right,
            elimination_cooldown: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

/// A collectible document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub pos: Vec2,
    collected: bool,
}

impl Document {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Level::document_rect(self.pos)
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark as collected. Returns true only on the first call.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

/// Saturating 0..=100 detection meter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionMeter {
    value: f32,
}

impl DetectionMeter {
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whole percent for the HUD
    pub fn percent(&self) -> u8 {
        self.value.round() as u8
    }

    pub fn raise(&mut self, amount: f32) {
        self.value = (self.value + amount).min(DETECTION_MAX);
    }

    pub fn decay(&mut self, amount: f32) {
        self.value = (self.value - amount).max(0.0);
    }

    pub fn fill(&mut self) {
        self.value = DETECTION_MAX;
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.value >= DETECTION_MAX
    }
}

/// Game events emitted during a tick (for frontends and logging)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted { number: u32 },
    DocumentCollected { index: usize },
    EnemyEliminated { id: u32 },
    /// Meter hit 100; every live enemy now chases the player
    AlertRaised,
    /// Remaining enemies became vigilant after mass elimination
    HighAlert,
    /// Player reached the exit with documents still missing
    ExitLocked { missing: usize },
    Caught { by: u32 },
    LevelComplete { number: u32 },
    MissionComplete,
}

/// Complete session state for the current level
#[derive(Debug, Clone)]
pub struct GameState {
    /// All levels of the mission
    pub levels: Rc<LevelSet>,
    /// Index into `levels`
    pub level_index: usize,
    /// The level being played (shared, read-only)
    pub level: Rc<Level>,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub documents: Vec<Document>,
    pub detection: DetectionMeter,
    /// Meter filled; all enemies pursue the player
    pub alert_mode: bool,
    /// Mass elimination put the remaining enemies on high alert
    pub high_alert_mode: bool,
    /// Player box overlapped the exit zone last tick (edge-triggers the locked-exit banner)
    pub player_at_exit: bool,
    /// Simulation tick counter within this level
    pub time_ticks: u64,
    /// Bumped on every phase change and level (re)start; stale banner hides compare against it
    pub epoch: u64,
    pub banners: BannerQueue,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start the first level of `levels`. Returns None for an empty set.
    pub fn new(levels: LevelSet, settings: &Settings) -> Option<Self> {
        let levels = Rc::new(levels);
        let level = Rc::new(levels.get(0)?.clone());
        let mut state = Self {
            player: Player::new(level.start),
            levels,
            level_index: 0,
            level,
            phase: GamePhase::Playing,
            enemies: Vec::new(),
            documents: Vec::new(),
            detection: DetectionMeter::default(),
            alert_mode: false,
            high_alert_mode: false,
            player_at_exit: false,
            time_ticks: 0,
            epoch: 0,
            banners: BannerQueue::default(),
            events: Vec::new(),
        };
        state.start_level(0, settings);
        Some(state)
    }

    /// Reset everything for level `index` (clamped to the last level)
    pub fn start_level(&mut self, index: usize, settings: &Settings) {
        let index = index.min(self.levels.len().saturating_sub(1));
        let Some(level) = self.levels.get(index) else {
            return;
        };
        self.level_index = index;
        self.level = Rc::new(level.clone());

        self.player = Player::new(self.level.start);
        self.enemies = self
            .level
            .enemies
            .iter()
            .enumerate()
            .map(|(i, spawn)| Enemy::new(i as u32 + 1, spawn.pos, spawn.patrol.clone(), settings))
            .collect();
        self.documents = self.level.documents.iter().map(|&p| Document::new(p)).collect();
        self.detection = DetectionMeter::default();
        self.alert_mode = false;
        self.high_alert_mode = false;
        self.player_at_exit = false;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.epoch += 1;
        self.banners.clear();
        self.events.clear();
        self.events.push(GameEvent::LevelStarted {
            number: self.level.number,
        });

        log::info!(
            "Level {} started: {} enemies, {} documents",
            self.level.number,
            self.enemies.len(),
            self.documents.len()
        );
    }

    pub fn restart_level(&mut self, settings: &Settings) {
        self.start_level(self.level_index, settings);
    }

    /// Advance to the next level if there is one
    pub fn next_level(&mut self, settings: &Settings) -> bool {
        if self.has_next_level() {
            self.start_level(self.level_index + 1, settings);
            true
        } else {
            false
        }
    }

    pub fn has_next_level(&self) -> bool {
        self.level_index + 1 < self.levels.len()
    }

    /// Change phase and invalidate anything scheduled for the old one
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.epoch += 1;
        }
    }

    pub fn documents_collected(&self) -> usize {
        self.documents.iter().filter(|d| d.is_collected()).count()
    }

    pub fn all_documents_collected(&self) -> bool {
        self.documents.iter().all(Document::is_collected)
    }

    pub fn enemies_eliminated(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_eliminated()).count()
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_live())
    }
}
