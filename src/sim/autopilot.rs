//! Seeded autopilot that plays the game through `TickInput`
//!
//! Greedy and map-blind: walk toward the nearest uncollected document (then
//! the exit), backstab anything eligible, and wander randomly for a moment
//! whenever a wall stops progress. Same seed, same inputs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::settings::Settings;

/// Ticks of random wandering after getting blocked
const WANDER_TICKS: std::ops::RangeInclusive<u32> = 15..=45;
/// Dead zone so the pilot doesn't jitter across the target axis
const AXIS_SLACK: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    wander: Option<(TickInput, u32)>,
    last_pos: Option<Vec2>,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            wander: None,
            last_pos: None,
        }
    }

    /// Where the pilot is heading: nearest open document, else the exit
    pub fn goal(state: &GameState) -> Vec2 {
        let from = state.player.center();
        state
            .documents
            .iter()
            .filter(|d| !d.is_collected())
            .map(|d| d.rect().center())
            .min_by(|a, b| {
                a.distance_squared(from)
                    .partial_cmp(&b.distance_squared(from))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(state.level.exit)
    }

    /// Decide the input for the next tick
    pub fn next_input(&mut self, state: &GameState, settings: &Settings) -> TickInput {
        match state.phase {
            GamePhase::Caught => {
                self.reset();
                return TickInput {
                    restart: true,
                    ..Default::default()
                };
            }
            GamePhase::LevelComplete => {
                self.reset();
                return TickInput {
                    action: true,
                    ..Default::default()
                };
            }
            GamePhase::MissionComplete => return TickInput::default(),
            GamePhase::Playing => {}
        }

        let pos = state.player.pos;
        let blocked = self.last_pos == Some(pos);
        self.last_pos = Some(pos);

        let center = state.player.center();
        let action = state.live_enemies().any(|e| {
            e.can_be_eliminated_by(center, settings.elimination_distance, settings.blind_spot_half_angle)
        });

        if let Some((input, remaining)) = self.wander.as_mut() {
            *remaining -= 1;
            let input = TickInput { action, ..*input };
            if *remaining == 0 {
                self.wander = None;
            }
            return input;
        }

        if blocked {
            let input = self.random_direction();
            let ticks = self.rng.random_range(WANDER_TICKS);
            self.wander = Some((input, ticks));
            return TickInput { action, ..input };
        }

        let delta = Self::goal(state) - center;
        TickInput {
            left: delta.x < -AXIS_SLACK,
            right: delta.x > AXIS_SLACK,
            up: delta.y < -AXIS_SLACK,
            down: delta.y > AXIS_SLACK,
            run: state.alert_mode,
            action,
            restart: false,
        }
    }

    fn random_direction(&mut self) -> TickInput {
        let mut input = TickInput::default();
        // Never pick "no movement"
        while !(input.up || input.down || input.left || input.right) {
            match self.rng.random_range(0..3) {
                0 => input.left = true,
                1 => input.right = true,
                _ => {}
            }
            match self.rng.random_range(0..3) {
                0 => input.up = true,
                1 => input.down = true,
                _ => {}
            }
        }
        input
    }

    fn reset(&mut self) {
        self.wander = None;
        self.last_pos = None;
    }
}
