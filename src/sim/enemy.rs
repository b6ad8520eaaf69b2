//! Enemy agent: patrol, chase, stuck recovery and backstab eligibility
//!
//! Modes only ever move forward: `Patrolling -> Chasing -> Eliminated`, or
//! straight from `Patrolling` to `Eliminated`. `high_alert` is an orthogonal
//! flag that only goes from false to true within a level.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Arena, resolve_move};
use super::geometry::Rect;
use super::perception::VisionCone;
use crate::consts::{ENEMY_SIZE, WAYPOINT_ARRIVAL};
use crate::settings::Settings;
use crate::{angle_diff, bearing};

/// Behaviour mode of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyMode {
    /// Walking the patrol cycle at base speed
    Patrolling,
    /// Pursuing a target point (player centre) at alert speed
    Chasing { target: Vec2 },
    /// Terminal: removed from update, perception, contact and rendering
    Eliminated,
}

/// What happened during one enemy update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStep {
    /// Moved (possibly partially blocked)
    Moved,
    /// Reached the current waypoint and switched to the next one
    ArrivedAtWaypoint,
    /// Stood still long enough to trigger recovery; waypoint advanced
    Unstuck,
    /// Did nothing this tick (stationary guard, already at target, eliminated)
    Idle,
}

/// An enemy guard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Facing direction (radians, 0 = +x, y grows downward)
    pub facing: f32,
    /// Cyclic patrol waypoints (top-left positions). Empty means a stationary guard.
    pub patrol: Vec<Vec2>,
    /// Index of the waypoint currently walked toward
    pub waypoint: usize,
    /// Patrol speed (units/second)
    pub speed: f32,
    /// Chase speed (units/second)
    pub alert_speed: f32,
    pub vision: VisionCone,
    pub mode: EnemyMode,
    /// Vigilance boost: instant detection, no backstabs, extended range
    pub high_alert: bool,
    /// Position at the end of the previous movement attempt
    last_pos: Vec2,
    /// Seconds spent trying to move without making progress
    stuck_time: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, patrol: Vec<Vec2>, settings: &Settings) -> Self {
        Self {
            id,
            pos,
            width: ENEMY_SIZE,
            height: ENEMY_SIZE,
            facing: 0.0,
            patrol,
            waypoint: 0,
            speed: settings.enemy_speed,
            alert_speed: settings.alert_speed,
            vision: settings.vision_cone(),
            mode: EnemyMode::Patrolling,
            high_alert: false,
            last_pos: pos,
            stuck_time: 0.0,
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

    #[inline]
    pub fn is_eliminated(&self) -> bool {
        matches!(self.mode, EnemyMode::Eliminated)
    }

    /// Not eliminated
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.is_eliminated()
    }

    #[inline]
    pub fn is_chasing(&self) -> bool {
        matches!(self.mode, EnemyMode::Chasing { .. })
    }

    /// Waypoint currently walked toward, if the guard patrols at all
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.patrol.get(self.waypoint).copied()
    }

    /// Seconds accumulated toward stuck recovery
    pub fn stuck_time(&self) -> f32 {
        self.stuck_time
    }

    /// Switch to the next waypoint in the cycle
    pub fn advance_waypoint(&mut self) {
        if !self.patrol.is_empty() {
            self.waypoint = (self.waypoint + 1) % self.patrol.len();
        }
    }

    /// Start (or keep) chasing `target`. No effect once eliminated.
    pub fn alert(&mut self, target: Vec2) {
        if self.is_live() {
            self.mode = EnemyMode::Chasing { target };
        }
    }

    /// Move the chase target; ignored unless already chasing
    pub fn update_chase_target(&mut self, target: Vec2) {
        if let EnemyMode::Chasing { target: t } = &mut self.mode {
            *t = target;
        }
    }

    /// Enter high alert. The range boost applies once.
    pub fn raise_vigilance(&mut self, range_multiplier: f32) {
        if self.is_live() && !self.high_alert {
            self.high_alert = true;
            self.vision = self.vision.boosted(range_multiplier);
        }
    }

    /// Whether this enemy sees `target` (usually the player's centre)
    pub fn sees(&self, target: Vec2, walls: &[Rect]) -> bool {
        self.is_live() && self.vision.sees(self.center(), self.facing, target, walls)
    }

    /// Backstab eligibility for an eliminator standing at `eliminator`
    ///
    /// Requires a calm guard (patrolling, not on high alert), centre distance
    /// within `reach`, and an approach from the rear arc: the bearing to the
    /// eliminator must differ from the facing by more than
    /// `π - blind_spot_half_angle`.
    pub fn can_be_eliminated_by(&self, eliminator: Vec2, reach: f32, blind_spot_half_angle: f32) -> bool {
        if self.mode != EnemyMode::Patrolling || self.high_alert {
            return false;
        }

        let center = self.center();
        if center.distance(eliminator) > reach {
            return false;
        }

        let off_facing = angle_diff(self.facing, bearing(center, eliminator)).abs();
        off_facing > PI - blind_spot_half_angle
    }

    /// Terminal transition
    pub fn eliminate(&mut self) {
        self.mode = EnemyMode::Eliminated;
    }

    /// Advance one tick of movement
    pub fn update(&mut self, walls: &[Rect], arena: &Arena, settings: &Settings, dt: f32) -> EnemyStep {
        match self.mode {
            EnemyMode::Eliminated => EnemyStep::Idle,
            EnemyMode::Patrolling => self.patrol_step(walls, arena, settings, dt),
            EnemyMode::Chasing { target } => self.chase_step(target, walls, arena, settings, dt),
        }
    }

    fn patrol_step(&mut self, walls: &[Rect], arena: &Arena, settings: &Settings, dt: f32) -> EnemyStep {
        let Some(target) = self.current_waypoint() else {
            return EnemyStep::Idle;
        };

        let to_target = target - self.pos;
        let distance = to_target.length();
        if distance < WAYPOINT_ARRIVAL {
            self.advance_waypoint();
            self.stuck_time = 0.0;
            self.last_pos = self.pos;
            return EnemyStep::ArrivedAtWaypoint;
        }

        self.facing = to_target.y.atan2(to_target.x);
        let step = to_target / distance * (self.speed * dt).min(distance);
        self.move_by(step, walls, arena, settings, dt)
    }

    fn chase_step(
        &mut self,
        target: Vec2,
        walls: &[Rect],
        arena: &Arena,
        settings: &Settings,
        dt: f32,
    ) -> EnemyStep {
        let center = self.center();
        let to_target = target - center;
        let distance = to_target.length();
        if distance <= f32::EPSILON {
            return EnemyStep::Idle;
        }

        // Facing tracks the target itself, not the (possibly deflected) motion
        self.facing = bearing(center, target);
        let step = to_target / distance * (self.alert_speed * dt).min(distance);
        self.move_by(step, walls, arena, settings, dt)
    }

    fn move_by(&mut self, step: Vec2, walls: &[Rect], arena: &Arena, settings: &Settings, dt: f32) -> EnemyStep {
        let outcome = resolve_move(self.rect(), step.x, step.y, walls, arena);
        self.pos = outcome.pos;

        // Compared per second so the threshold holds at any tick rate
        if self.pos.distance(self.last_pos) < settings.stuck_speed * dt {
            self.stuck_time += dt;
        } else {
            self.stuck_time = 0.0;
        }
        self.last_pos = self.pos;

        if self.stuck_time > settings.stuck_seconds {
            log::debug!(
                "enemy {} stuck at ({:.1}, {:.1}), skipping to next waypoint",
                self.id,
                self.pos.x,
                self.pos.y
            );
            self.stuck_time = 0.0;
            self.advance_waypoint();
            return EnemyStep::Unstuck;
        }

        EnemyStep::Moved
    }
}
