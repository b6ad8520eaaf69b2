//! Read-only snapshots handed to rendering and HUD collaborators
//!
//! The core never draws or touches UI. Once per frame it builds these views
//! from the session and passes them to a [`Frontend`].

use std::fmt;

use crate::sim::banner::BannerKind;
use crate::sim::geometry::Rect;
use crate::sim::perception::VisionCone;
use crate::sim::state::{Facing, GameEvent, GamePhase, GameState};

/// A live enemy as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub id: u32,
    pub rect: Rect,
    pub facing: f32,
    pub chasing: bool,
    pub high_alert: bool,
    /// Cone to draw (already boosted on high alert)
    pub vision: VisionCone,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentView {
    pub rect: Rect,
    pub collected: bool,
}

/// Everything drawn in one frame
#[derive(Debug, Clone)]
pub struct RenderView<'a> {
    pub walls: &'a [Rect],
    /// Eliminated enemies are left out
    pub enemies: Vec<EnemyView>,
    pub player: Rect,
    pub player_facing: Facing,
    pub documents: Vec<DocumentView>,
    pub exit: Rect,
    /// Detection level 0.0..=1.0 for the overlay tint
    pub detection: f32,
}

impl<'a> RenderView<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            walls: &state.level.walls,
            enemies: state
                .live_enemies()
                .map(|e| EnemyView {
                    id: e.id,
                    rect: e.rect(),
                    facing: e.facing,
                    chasing: e.is_chasing(),
                    high_alert: e.high_alert,
                    vision: e.vision,
                })
                .collect(),
            player: state.player.rect(),
            player_facing: state.player.facing,
            documents: state
                .documents
                .iter()
                .map(|d| DocumentView {
                    rect: d.rect(),
                    collected: d.is_collected(),
                })
                .collect(),
            exit: state.level.exit_rect(),
            detection: state.detection.value() / crate::consts::DETECTION_MAX,
        }
    }
}

/// Banner text and colour (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerView {
    pub kind: BannerKind,
    pub text: &'static str,
    pub color: u32,
}

/// HUD counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudView {
    pub level: u32,
    pub phase: GamePhase,
    pub detection_percent: u8,
    pub documents_collected: usize,
    pub documents_total: usize,
    pub enemies_eliminated: usize,
    pub enemies_total: usize,
    pub banner: Option<BannerView>,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            level: state.level.number,
            phase: state.phase,
            detection_percent: state.detection.percent(),
            documents_collected: state.documents_collected(),
            documents_total: state.documents.len(),
            enemies_eliminated: state.enemies_eliminated(),
            enemies_total: state.enemies.len(),
            banner: state.banners.current().map(|b| BannerView {
                kind: b.kind,
                text: b.kind.text(),
                color: b.kind.color(),
            }),
        }
    }
}

impl fmt::Display for HudView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {} | Detection {:>3}% | Documents {}/{} | Eliminated {}/{}",
            self.level,
            self.detection_percent,
            self.documents_collected,
            self.documents_total,
            self.enemies_eliminated,
            self.enemies_total
        )?;
        if let Some(banner) = &self.banner {
            write!(f, " | {}", banner.text)?;
        }
        Ok(())
    }
}

/// Rendering + HUD collaborator
pub trait Frontend {
    /// Draw the frame
    fn render(&mut self, view: &RenderView<'_>);

    /// Refresh HUD text
    fn hud(&mut self, hud: &HudView);

    /// Events produced since the previous frame
    fn events(&mut self, _events: &[GameEvent]) {}
}
