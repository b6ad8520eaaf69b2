//! Covert Ops headless runner
//!
//! Plays the mission with the seeded autopilot and logs HUD changes and game
//! events. Rendering is left to embedding frontends.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use covert_ops::consts::SIM_DT;
    use covert_ops::sim::autopilot::Autopilot;
    use covert_ops::sim::collision::Arena;
    use covert_ops::sim::level::LevelSet;
    use covert_ops::sim::state::{GameEvent, GamePhase};
    use covert_ops::view::{Frontend, HudView, RenderView};
    use covert_ops::{Difficulty, Game, Settings};

    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Settings JSON (missing or invalid files fall back to defaults)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Level set JSON; the built-in mission is used when omitted
        #[arg(short, long)]
        levels: Option<PathBuf>,

        /// Difficulty preset: easy, normal or hard
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Autopilot seed
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Frames to run at 60 fps before giving up
        #[arg(long, default_value_t = 60 * 300)]
        frames: u32,
    }

    /// Logs what a screen would show
    #[derive(Default)]
    struct LogFrontend {
        last_hud: Option<HudView>,
        caught: u32,
    }

    impl Frontend for LogFrontend {
        fn render(&mut self, _view: &RenderView<'_>) {}

        fn hud(&mut self, hud: &HudView) {
            if self.last_hud.as_ref() != Some(hud) {
                log::debug!("{hud}");
                self.last_hud = Some(*hud);
            }
        }

        fn events(&mut self, events: &[GameEvent]) {
            for event in events {
                if matches!(event, GameEvent::Caught { .. }) {
                    self.caught += 1;
                }
                log::info!("{event:?}");
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();
        log::info!("Covert Ops (headless) starting...");

        let mut settings = match &args.settings {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        if let Some(name) = &args.difficulty {
            let difficulty = Difficulty::from_str(name)
                .with_context(|| format!("Unknown difficulty: {name}"))?;
            settings.apply_difficulty(difficulty);
        }

        let levels = match &args.levels {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read level file: {}", path.display()))?;
                LevelSet::from_json(&json, &Arena::default())
                    .with_context(|| format!("Invalid level file: {}", path.display()))?
            }
            None => LevelSet::builtin(),
        };

        let mut game = Game::new(levels, settings).context("Level set is empty")?;
        let mut pilot = Autopilot::new(args.seed);
        let mut frontend = LogFrontend::default();
        log::info!("Autopilot seeded with {}", args.seed);

        let mut frames = 0;
        while frames < args.frames && game.state.phase != GamePhase::MissionComplete {
            let input = pilot.next_input(&game.state, &game.settings);
            game.set_input(input);
            game.frame(SIM_DT, &mut frontend);
            frames += 1;
        }

        println!("Run complete.");
        println!("Frames: {frames}");
        println!("Outcome: {:?}", game.state.phase);
        println!("Reached level: {}", game.state.level.number);
        println!("Times caught: {}", frontend.caught);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; embed the library instead
}
