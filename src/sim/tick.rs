//! Fixed timestep simulation tick
//!
//! One call advances the session by `dt` seconds in a fixed order: player
//! movement, eliminations, escalation, enemies and perception, contact,
//! detection meter, alert broadcast, pickups, exit.

use std::rc::Rc;

use super::banner::BannerKind;
use super::collision::{Arena, resolve_move, separate};
use super::enemy::Enemy;
use super::geometry::{Rect, rects_overlap};
use super::state::{Facing, GameEvent, GamePhase, GameState};
use crate::settings::Settings;

/// Logical key snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Run modifier
    pub run: bool,
    /// Eliminate / continue to the next level
    pub action: bool,
    /// Restart the current level
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings, dt: f32) {
    state.events.clear();

    if input.restart {
        log::info!("Restarting level {}", state.level.number);
        state.restart_level(settings);
        return;
    }

    match state.phase {
        GamePhase::Playing => {}
        GamePhase::LevelComplete => {
            if input.action {
                state.next_level(settings);
            }
            return;
        }
        GamePhase::Caught | GamePhase::MissionComplete => return,
    }

    state.time_ticks += 1;
    state.banners.fire_due(state.time_ticks, state.epoch);

    let level = Rc::clone(&state.level);
    let walls = level.walls.as_slice();
    let arena = Arena::default();

    move_player(state, input, walls, &arena, settings, dt);

    if input.action {
        try_eliminate(state, settings);
    }
    check_high_alert(state, settings, dt);

    // Alert mode pursues the live position
    let player_center = state.player.center();
    if state.alert_mode {
        for enemy in state.enemies.iter_mut() {
            enemy.update_chase_target(player_center);
        }
    }

    let mut seen = false;
    let mut instant = false;
    for enemy in state.enemies.iter_mut().filter(|e| e.is_live()) {
        enemy.update(walls, &arena, settings, dt);

        if enemy.sees(player_center, walls) {
            seen = true;
            instant |= enemy.high_alert;
            if enemy.is_chasing() {
                enemy.update_chase_target(player_center);
            } else if settings.chase_on_sight {
                log::debug!("enemy {} spotted the player", enemy.id);
                enemy.alert(player_center);
            }
        }
    }

    if settings.separation {
        separate_enemies(&mut state.enemies, walls, &arena);
    }

    let player_rect = state.player.rect();
    let caught_by = state
        .live_enemies()
        .find(|e| rects_overlap(&e.rect(), &player_rect))
        .map(|e| e.id);
    if let Some(by) = caught_by {
        log::info!("Caught by enemy {by} on level {}", level.number);
        state.set_phase(GamePhase::Caught);
        state.banners.show(BannerKind::Caught, state.epoch);
        state.events.push(GameEvent::Caught { by });
        return;
    }

    update_detection(state, seen, instant, settings, dt);

    collect_documents(state, &player_rect);
    check_exit(state, &player_rect, &level.exit_rect(), settings, dt);
}

fn banner_ticks(settings: &Settings, dt: f32) -> u64 {
    (settings.banner_secs / dt).ceil().max(1.0) as u64
}

fn move_player(
    state: &mut GameState,
    input: &TickInput,
    walls: &[Rect],
    arena: &Arena,
    settings: &Settings,
    dt: f32,
) {
    let player = &mut state.player;
    player.elimination_cooldown = (player.elimination_cooldown - dt).max(0.0);

    let speed = if input.run { settings.run_speed } else { settings.player_speed } * dt;
    let mut dx = 0.0;
    let mut dy = 0.0;

    // Later keys win the facing, right last
    if input.up {
        dy = -speed;
        player.facing = Facing::Up;
    }
    if input.down {
        dy = speed;
        player.facing = Facing::Down;
    }
    if input.left {
        dx = -speed;
        player.facing = Facing::Left;
    }
    if input.right {
        dx = speed;
        player.facing = Facing::Right;
    }

    if dx != 0.0 || dy != 0.0 {
        player.pos = resolve_move(player.rect(), dx, dy, walls, arena).pos;
    }
}

fn try_eliminate(state: &mut GameState, settings: &Settings) {
    if state.player.elimination_cooldown > 0.0 {
        return;
    }

    let from = state.player.center();
    let Some(enemy) = state.enemies.iter_mut().find(|e| {
        e.can_be_eliminated_by(from, settings.elimination_distance, settings.blind_spot_half_angle)
    }) else {
        return;
    };

    enemy.eliminate();
    log::debug!("enemy {} eliminated", enemy.id);
    let id = enemy.id;
    state.player.elimination_cooldown = settings.elimination_cooldown_secs;
    state.events.push(GameEvent::EnemyEliminated { id });
}

/// Put the survivors on high alert once enough of the level's enemies are down
fn check_high_alert(state: &mut GameState, settings: &Settings, dt: f32) {
    if state.high_alert_mode || state.enemies.is_empty() {
        return;
    }

    let eliminated = state.enemies_eliminated();
    let ratio = eliminated as f32 / state.enemies.len() as f32;
    if ratio < settings.high_alert_ratio || eliminated == state.enemies.len() {
        return;
    }

    state.high_alert_mode = true;
    for enemy in state.enemies.iter_mut() {
        enemy.raise_vigilance(settings.high_alert_range_multiplier);
    }
    log::info!(
        "High alert: {eliminated}/{} enemies down on level {}",
        state.enemies.len(),
        state.level.number
    );
    state.events.push(GameEvent::HighAlert);
    state
        .banners
        .show_for(BannerKind::HighAlert, state.epoch, state.time_ticks, banner_ticks(settings, dt));
}

/// Push every overlapping pair of live enemies apart
fn separate_enemies(enemies: &mut [Enemy], walls: &[Rect], arena: &Arena) {
    for i in 0..enemies.len() {
        let (head, tail) = enemies.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.is_live() {
            continue;
        }
        for b in tail.iter_mut().filter(|e| e.is_live()) {
            let mut ra = a.rect();
            let mut rb = b.rect();
            if separate(&mut ra, &mut rb, walls, arena) {
                a.pos = ra.pos();
                b.pos = rb.pos();
            }
        }
    }
}

fn update_detection(state: &mut GameState, seen: bool, instant: bool, settings: &Settings, dt: f32) {
    if state.alert_mode {
        state.detection.fill();
        return;
    }

    if instant {
        state.detection.fill();
    } else if seen {
        state.detection.raise(settings.detection_gain_per_sec * dt);
    } else {
        state.detection.decay(settings.detection_decay_per_sec * dt);
    }

    if state.detection.is_full() {
        state.alert_mode = true;
        let target = state.player.center();
        for enemy in state.enemies.iter_mut() {
            enemy.alert(target);
        }
        log::info!("Alert raised on level {}", state.level.number);
        state.events.push(GameEvent::AlertRaised);
        state
            .banners
            .show_for(BannerKind::Alert, state.epoch, state.time_ticks, banner_ticks(settings, dt));
    }
}

fn collect_documents(state: &mut GameState, player_rect: &Rect) {
    for (index, doc) in state.documents.iter_mut().enumerate() {
        if !doc.is_collected() && rects_overlap(player_rect, &doc.rect()) && doc.collect() {
            log::debug!("document {index} collected");
            state.events.push(GameEvent::DocumentCollected { index });
        }
    }
}

fn check_exit(state: &mut GameState, player_rect: &Rect, exit: &Rect, settings: &Settings, dt: f32) {
    let at_exit = rects_overlap(player_rect, exit);
    let entered = at_exit && !state.player_at_exit;
    state.player_at_exit = at_exit;
    if !at_exit {
        return;
    }

    if !state.all_documents_collected() {
        if entered {
            let missing = state.documents.len() - state.documents_collected();
            state.events.push(GameEvent::ExitLocked { missing });
            state
                .banners
                .show_for(BannerKind::ExitLocked, state.epoch, state.time_ticks, banner_ticks(settings, dt));
        }
        return;
    }

    let number = state.level.number;
    if state.has_next_level() {
        log::info!("Level {number} complete");
        state.set_phase(GamePhase::LevelComplete);
        state.banners.show(BannerKind::LevelComplete, state.epoch);
        state.events.push(GameEvent::LevelComplete { number });
    } else {
        log::info!("Mission complete after level {number}");
        state.set_phase(GamePhase::MissionComplete);
        state.banners.show(BannerKind::MissionComplete, state.epoch);
        state.events.push(GameEvent::LevelComplete { number });
        state.events.push(GameEvent::MissionComplete);
    }
}
