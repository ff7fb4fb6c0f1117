//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by block ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod shapes;
pub mod state;
pub mod sweep;
pub mod tick;

pub use collision::{
    LineIntersection, box_box_check, box_circle_check, circle_circle_check, is_zero_to_one,
    line_line_check, reflect_velocity,
};
pub use shapes::{Box2D, BoxEdges, Circle, Line2D};
pub use state::{
    ActivePower, Ball, Block, GameEvent, GamePhase, GameState, Outcome, Paddle, PowerUp,
    RngState, layout_blocks,
};
pub use sweep::{Contact, ContactKind, Reflection, reflect_circle_box};
pub use tick::{TickInput, tick};
