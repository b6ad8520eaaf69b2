//! Frame loop: fixed-step updates followed by one render
//!
//! The host calls [`Game::frame`] once per display frame with the elapsed
//! wall time. Whole simulation ticks are run from an accumulator, then the
//! frontend receives the frame's events, the render view and the HUD.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::settings::Settings;
use crate::sim::level::LevelSet;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::{TickInput, tick};
use crate::view::{Frontend, HudView, RenderView};

/// Game instance holding all session state
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    accumulator: f32,
    input: TickInput,
    /// Events from every tick since the last render
    frame_events: Vec<GameEvent>,
}

impl Game {
    /// Start at the first level. None if `levels` is empty.
    pub fn new(levels: LevelSet, settings: Settings) -> Option<Self> {
        let state = GameState::new(levels, &settings)?;
        let frame_events = state.events.clone();
        Some(Self {
            state,
            settings,
            accumulator: 0.0,
            input: TickInput::default(),
            frame_events,
        })
    }

    /// Latest key snapshot. Held keys persist; `action` and `restart` are
    /// consumed by the first tick that sees them.
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the count.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        // A NaN would poison the accumulator for good
        let frame_dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, &self.settings, SIM_DT);
            self.frame_events.extend(self.state.events.iter().cloned());
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.action = false;
            self.input.restart = false;
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Hand the current state to the frontend
    pub fn render(&mut self, frontend: &mut impl Frontend) {
        let events = std::mem::take(&mut self.frame_events);
        if !events.is_empty() {
            frontend.events(&events);
        }
        frontend.render(&RenderView::from_state(&self.state));
        frontend.hud(&HudView::from_state(&self.state));
    }

    /// One display frame: update then render
    pub fn frame(&mut self, frame_dt: f32, frontend: &mut impl Frontend) -> u32 {
        let ticks = self.update(frame_dt);
        self.render(frontend);
        ticks
    }
}
