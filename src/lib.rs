//! Breakout - a block-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision geometry, game state, tick)
//! - `settings`: Data-driven game balance
//!
//! Rendering, windowing and input devices live outside this crate; callers feed
//! a [`sim::TickInput`] per fixed step and read the state back.

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels, +y down)
    pub const FIELD_WIDTH: f32 = 1024.0;
    pub const FIELD_HEIGHT: f32 = 768.0;

    /// Block grid: 6 rows of 8
    pub const BLOCK_COLUMNS: usize = 8;
    pub const BLOCK_ROWS: usize = 6;
    pub const BLOCK_COUNT: usize = BLOCK_COLUMNS * BLOCK_ROWS;
    pub const BLOCK_SIZE: Vec2 = Vec2::new(85.0, 74.0);
    /// Horizontal gap between neighbouring blocks; rows touch
    pub const BLOCK_GAP: f32 = 10.0;
    /// Center of the top-left block
    pub const BLOCK_ORIGIN: Vec2 = Vec2::new(180.0, 50.0);

    /// Ball radius at scale 1.0 (36px sprite frame)
    pub const BALL_FRAME_RADIUS: f32 = 18.0;
    pub const BALL_BASE_SCALE: f32 = 1.3;
    pub const BALL_START: Vec2 = Vec2::new(FIELD_WIDTH * 0.5, FIELD_HEIGHT * 0.65);

    /// Paddle size at scale 1.0
    pub const PADDLE_SIZE: Vec2 = Vec2::new(379.0, 63.0);
    pub const PADDLE_START: Vec2 = Vec2::new(FIELD_WIDTH * 0.5, FIELD_HEIGHT * 0.85);

    /// Points per block hit, multiplied by the current combo multiplier
    pub const BLOCK_HIT_SCORE: u64 = 10;
    /// Extra points for breaking a Speed or Slow block
    pub const POWER_BLOCK_BONUS: u64 = 10;
}
