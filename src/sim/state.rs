//! Game state and core simulation types
//!
//! Everything needed to resume or replay a run lives here.

use glam::Vec2;
use rand::seq::index;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::shapes::{Box2D, Circle};
use crate::consts::*;
use crate::settings::Settings;

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu, waiting for play/rules
    Menu,
    /// Rules screen
    Rules,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver(Outcome),
}

/// Power-up carried by a block, granted when the block breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUp {
    #[default]
    None,
    /// Small, fast ball and a short, fast paddle
    Speed,
    /// Big, slow ball and a wide, slow paddle
    Slow,
    ExtraLife,
}

impl PowerUp {
    /// Hits needed to break a block carrying this power-up
    pub fn max_hp(&self) -> u8 {
        match self {
            PowerUp::None => 2,
            _ => 3,
        }
    }

    /// Speed and Slow wear off; an extra life doesn't
    pub fn is_timed(&self) -> bool {
        matches!(self, PowerUp::Speed | PowerUp::Slow)
    }

    pub fn ball_scale(&self) -> f32 {
        match self {
            PowerUp::Speed => 1.0,
            PowerUp::Slow => 1.5,
            _ => BALL_BASE_SCALE,
        }
    }

    pub fn paddle_scale(&self) -> f32 {
        match self {
            PowerUp::Speed => 0.5,
            PowerUp::Slow => 1.5,
            _ => 1.0,
        }
    }

    /// Shift applied to the base ball speed while active
    pub fn ball_speed_shift(&self, bonus: f32) -> f32 {
        match self {
            PowerUp::Speed => bonus,
            PowerUp::Slow => -bonus,
            _ => 0.0,
        }
    }

    /// Shift applied to the base paddle speed while active
    pub fn paddle_speed_shift(&self, bonus: f32) -> f32 {
        match self {
            PowerUp::Speed => bonus * 2.0,
            PowerUp::Slow => -bonus,
            _ => 0.0,
        }
    }

    /// Extra score for breaking a block with this power-up
    pub fn bonus_score(&self) -> u64 {
        if self.is_timed() { POWER_BLOCK_BONUS } else { 0 }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
}

impl Ball {
    pub fn new(speed: f32) -> Self {
        Self {
            pos: BALL_START,
            vel: Vec2::new(speed, -speed),
            scale: BALL_BASE_SCALE,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        BALL_FRAME_RADIUS * self.scale
    }

    pub fn collider(&self) -> Circle {
        Circle::new(self.pos, self.radius())
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub scale: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: PADDLE_START,
            scale: 1.0,
        }
    }
}

impl Paddle {
    pub fn extents(&self) -> Vec2 {
        PADDLE_SIZE * 0.5 * self.scale
    }

    pub fn collider(&self) -> Box2D {
        Box2D::new(self.pos, self.extents())
    }

    /// Slide horizontally, staying inside the playfield
    pub fn slide(&mut self, dx: f32) {
        let half = self.extents().x;
        self.pos.x = (self.pos.x + dx).clamp(half, (FIELD_WIDTH - half).max(half));
    }
}

/// A block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub bounds: Box2D,
    /// Remaining hits; 0 means broken
    pub hp: u8,
    pub power: PowerUp,
}

impl Block {
    pub fn new(id: u32, bounds: Box2D, power: PowerUp) -> Self {
        Self {
            id,
            bounds,
            hp: power.max_hp(),
            power,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// True when a block has been hit but not broken yet
    pub fn is_damaged(&self) -> bool {
        self.is_alive() && self.hp < self.power.max_hp()
    }
}

/// A running Speed/Slow power-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePower {
    pub kind: PowerUp,
    /// Seconds left
    pub remaining: f32,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    BlockHit { id: u32, hp: u8 },
    BlockDestroyed { id: u32, power: PowerUp },
    PowerActivated(PowerUp),
    PowerExpired(PowerUp),
    PaddleHit,
    LifeLost { lives: u8 },
    LifeGained { lives: u8 },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub settings: Settings,
    pub phase: GamePhase,
    pub score: u64,
    /// Score multiplier, grows with each broken block and resets on a lost life
    pub multiplier: u32,
    pub lives: u8,
    /// Base ball speed per axis, before power-ups
    pub ball_speed: f32,
    /// Base paddle speed, before power-ups
    pub paddle_speed: f32,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Blocks in layout order (sorted by id)
    pub blocks: Vec<Block>,
    pub active_power: Option<ActivePower>,
    /// Simulation tick counter (Playing only)
    pub time_ticks: u64,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game at the title menu
    pub fn new(seed: u64, settings: Settings) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let blocks = layout_blocks(&mut rng, &settings);

        Self {
            seed,
            rng_state,
            phase: GamePhase::Menu,
            score: 0,
            multiplier: 1,
            lives: settings.starting_lives,
            ball_speed: settings.ball_speed,
            paddle_speed: settings.paddle_speed,
            ball: Ball::new(settings.ball_speed),
            paddle: Paddle::default(),
            blocks,
            active_power: None,
            time_ticks: 0,
            events: Vec::new(),
            settings,
        }
    }

    /// Start over at the menu with a fresh layout derived from this run's seed
    pub fn restart(&mut self) {
        let next_seed = self.rng_state.to_rng().next_u64();
        log::info!("Restarting with seed {}", next_seed);
        *self = Self::new(next_seed, self.settings.clone());
        self.events.push(GameEvent::PhaseChanged(GamePhase::Menu));
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    /// Ball speed per axis with the active power-up applied
    pub fn effective_ball_speed(&self) -> f32 {
        let shift = self
            .active_power
            .map(|p| p.kind.ball_speed_shift(self.settings.power_bonus))
            .unwrap_or(0.0);
        self.ball_speed + shift
    }

    /// Paddle speed with the active power-up applied
    pub fn effective_paddle_speed(&self) -> f32 {
        let shift = self
            .active_power
            .map(|p| p.kind.paddle_speed_shift(self.settings.power_bonus))
            .unwrap_or(0.0);
        self.paddle_speed + shift
    }

    pub fn blocks_remaining(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_alive()).count()
    }

    /// Grant a power-up; a timed one replaces whatever was running
    pub fn activate_power(&mut self, kind: PowerUp) {
        match kind {
            PowerUp::None => return,
            PowerUp::ExtraLife => {
                self.lives = self.lives.saturating_add(1);
                self.events.push(GameEvent::LifeGained { lives: self.lives });
            }
            PowerUp::Speed | PowerUp::Slow => {
                self.active_power = Some(ActivePower {
                    kind,
                    remaining: self.settings.power_duration,
                });
                self.apply_power_scales();
            }
        }
        log::info!("Power-up activated: {:?}", kind);
        self.events.push(GameEvent::PowerActivated(kind));
    }

    /// Count down the running power-up, restoring sizes when it runs out
    pub fn update_power(&mut self, dt: f32) {
        let Some(active) = self.active_power.as_mut() else {
            return;
        };
        active.remaining -= dt;
        if active.remaining <= 0.0 {
            let kind = active.kind;
            self.active_power = None;
            self.apply_power_scales();
            log::info!("Power-up expired: {:?}", kind);
            self.events.push(GameEvent::PowerExpired(kind));
        }
    }

    fn apply_power_scales(&mut self) {
        let kind = self.active_power.map(|p| p.kind).unwrap_or_default();
        self.ball.scale = kind.ball_scale();
        self.paddle.scale = kind.paddle_scale();
        // Re-clamp in case the paddle grew past a wall
        self.paddle.slide(0.0);
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Build the block grid and hand power-ups to distinct, randomly chosen blocks
pub fn layout_blocks(rng: &mut Pcg32, settings: &Settings) -> Vec<Block> {
    let pitch = Vec2::new(BLOCK_SIZE.x + BLOCK_GAP, BLOCK_SIZE.y);
    let mut blocks: Vec<Block> = (0..BLOCK_COUNT)
        .map(|i| {
            let col = (i % BLOCK_COLUMNS) as f32;
            let row = (i / BLOCK_COLUMNS) as f32;
            let center = BLOCK_ORIGIN + pitch * Vec2::new(col, row);
            Block::new(i as u32, Box2D::new(center, BLOCK_SIZE * 0.5), PowerUp::None)
        })
        .collect();

    let kinds = std::iter::repeat_n(PowerUp::Speed, settings.speed_blocks)
        .chain(std::iter::repeat_n(PowerUp::Slow, settings.slow_blocks))
        .chain(std::iter::repeat_n(PowerUp::ExtraLife, settings.extra_life_blocks));
    let amount = settings.powered_blocks().min(BLOCK_COUNT);

    for (slot, kind) in index::sample(rng, BLOCK_COUNT, amount).iter().zip(kinds) {
        blocks[slot] = Block::new(blocks[slot].id, blocks[slot].bounds, kind);
    }

    log::debug!("Laid out {} blocks ({} powered)", blocks.len(), amount);
    blocks
}
