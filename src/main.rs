//! Breakout entry point
//!
//! Headless driver: plays one game with an autoplay paddle and prints a JSON
//! summary of the run.
//!
//! Usage: `breakout [SEED] [SETTINGS_JSON_PATH]`

use serde::Serialize;

use breakout::Settings;
use breakout::consts::*;
use breakout::sim::{GameEvent, GamePhase, GameState, Outcome, TickInput, tick};

/// Frame time the driver pretends to render at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Ten minutes of play at 60 fps
const MAX_FRAMES: u32 = 60 * 60 * 10;
/// Paddle stops chasing once the ball is this close to its center
const AUTOPLAY_DEADZONE: f32 = 4.0;

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_SETTINGS_PATH: &str = "breakout.json";

/// Final report printed to stdout
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    score: u64,
    lives: u8,
    blocks_remaining: usize,
    damaged_blocks: usize,
    /// None when the frame limit ran out first
    outcome: Option<Outcome>,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, settings),
            accumulator: 0.0,
            input: TickInput {
                start: true,
                ..Default::default()
            },
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.input.paddle_axis = self.autoplay_axis();
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.pause = false;

            for event in self.state.drain_events() {
                log_event(&event);
            }
        }
    }

    /// Steer the paddle under the ball
    fn autoplay_axis(&self) -> f32 {
        let offset = self.state.ball.pos.x - self.state.paddle.pos.x;
        if offset.abs() < AUTOPLAY_DEADZONE {
            0.0
        } else {
            offset.signum()
        }
    }

    fn is_over(&self) -> bool {
        matches!(self.state.phase, GamePhase::GameOver(_))
    }

    fn summary(&self) -> RunSummary {
        let state = &self.state;
        RunSummary {
            seed: state.seed,
            ticks: state.time_ticks,
            score: state.score,
            lives: state.lives,
            blocks_remaining: state.blocks_remaining(),
            damaged_blocks: state.blocks.iter().filter(|b| b.is_damaged()).count(),
            outcome: match state.phase {
                GamePhase::GameOver(outcome) => Some(outcome),
                _ => None,
            },
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::BlockDestroyed { id, power } => {
            log::debug!("Block {} destroyed ({:?})", id, power)
        }
        GameEvent::LifeLost { lives } => log::info!("Life lost, {} left", lives),
        GameEvent::LifeGained { lives } => log::info!("Extra life, {} left", lives),
        other => log::trace!("{:?}", other),
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Breakout starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|e| {
            log::warn!("Invalid seed {:?} ({}), using {}", arg, e, DEFAULT_SEED);
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&settings_path);
    log::info!("Seed {} on {}", seed, settings.difficulty.as_str());

    let mut game = Game::new(seed, settings);
    for _ in 0..MAX_FRAMES {
        game.update(FRAME_DT);
        if game.is_over() {
            break;
        }
    }

    let summary = game.summary();
    log::info!(
        "Finished after {} ticks: score {}, {} blocks left",
        summary.ticks,
        summary.score,
        summary.blocks_remaining
    );
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize run summary: {}", e);
            std::process::exit(1);
        }
    }
}
