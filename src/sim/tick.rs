//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use glam::Vec2;

use super::collision::{box_circle_check, reflect_velocity};
use super::shapes::Box2D;
use super::state::{GameEvent, GamePhase, GameState, Outcome};
use super::sweep::{Reflection, reflect_circle_box};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal paddle input, -1 (left) to 1 (right)
    pub paddle_axis: f32,
    /// Play button
    pub start: bool,
    /// Rules button (menu only)
    pub show_rules: bool,
    /// Menu button (rules / game over screens)
    pub back_to_menu: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.set_phase(GamePhase::Paused);
                return;
            }
            GamePhase::Paused => state.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.set_phase(GamePhase::Playing);
            } else if input.show_rules {
                state.set_phase(GamePhase::Rules);
            }
        }

        GamePhase::Rules => {
            if input.start {
                state.set_phase(GamePhase::Playing);
            } else if input.back_to_menu {
                state.set_phase(GamePhase::Menu);
            }
        }

        GamePhase::GameOver(_) => {
            if input.back_to_menu {
                state.restart();
            }
        }

        GamePhase::Paused => {}

        GamePhase::Playing => {
            state.time_ticks += 1;
            state.update_power(dt);

            move_ball(state, dt);
            if state.phase != GamePhase::Playing {
                return;
            }

            let axis = input.paddle_axis.clamp(-1.0, 1.0);
            let dx = axis * state.effective_paddle_speed() * dt;
            state.paddle.slide(dx);

            resolve_collisions(state, dt);
        }
    }
}

/// Integrate the ball and bounce it off the playfield walls
///
/// The bottom wall also bounces, but costs a life and resets the multiplier.
fn move_ball(state: &mut GameState, dt: f32) {
    let ball = &mut state.ball;
    let r = ball.radius();
    ball.pos += ball.vel * dt;

    // One wall per tick, checked left, right, top, bottom
    if ball.pos.x < r {
        ball.pos.x = r;
        ball.vel = reflect_velocity(ball.vel, Vec2::X);
    } else if ball.pos.x > FIELD_WIDTH - r {
        ball.pos.x = FIELD_WIDTH - r;
        ball.vel = reflect_velocity(ball.vel, Vec2::NEG_X);
    } else if ball.pos.y < r {
        ball.pos.y = r;
        ball.vel = reflect_velocity(ball.vel, Vec2::Y);
    } else if ball.pos.y > FIELD_HEIGHT - r {
        ball.pos.y = FIELD_HEIGHT - r;
        ball.vel = reflect_velocity(ball.vel, Vec2::NEG_Y);

        state.lives = state.lives.saturating_sub(1);
        state.multiplier = 1;
        log::info!("Ball lost, {} lives left", state.lives);
        state.events.push(GameEvent::LifeLost { lives: state.lives });

        if state.lives == 0 {
            state.set_phase(GamePhase::GameOver(Outcome::Lost));
        }
    }
}

/// Resolve the ball against at most one block, then against the paddle
///
/// Only the first overlapping live block (by id) is scored and bounced off. When the
/// ball straddles two blocks the other one is left for a later tick, so a double
/// overlap scores one hit per tick rather than one per block.
fn resolve_collisions(state: &mut GameState, dt: f32) {
    let ball = state.ball.collider();
    let hit = state
        .blocks
        .iter()
        .position(|b| b.is_alive() && box_circle_check(b.bounds, ball));

    if let Some(index) = hit {
        hit_block(state, index, dt);
        if state.phase != GamePhase::Playing {
            return;
        }
    }

    let paddle = state.paddle.collider();
    if box_circle_check(paddle, state.ball.collider()) {
        bounce_ball(state, paddle, dt);
        state.events.push(GameEvent::PaddleHit);
    }
}

/// Score, damage and bounce off the block at `index`
fn hit_block(state: &mut GameState, index: usize, dt: f32) {
    state.score += BLOCK_HIT_SCORE * u64::from(state.multiplier);

    let block = &mut state.blocks[index];
    block.hp = block.hp.saturating_sub(1);
    let (id, hp, power, bounds) = (block.id, block.hp, block.power, block.bounds);

    bounce_ball(state, bounds, dt);

    // Game speeds up with every hit
    state.ball_speed += state.settings.difficulty_step;
    state.paddle_speed += state.settings.difficulty_step;

    if hp > 0 {
        log::debug!("Block {} hit, {} hp left", id, hp);
        state.events.push(GameEvent::BlockHit { id, hp });
    } else {
        log::debug!("Block {} destroyed ({:?})", id, power);
        state.events.push(GameEvent::BlockDestroyed { id, power });
        state.multiplier += 1;
        state.score += power.bonus_score();
        state.activate_power(power);

        if state.blocks_remaining() == 0 {
            state.set_phase(GamePhase::GameOver(Outcome::Won));
        }
    }

    // Keep the direction, snap each axis to the current speed
    let speed = state.effective_ball_speed();
    let vel = state.ball.vel;
    state.ball.vel = Vec2::new(axis_sign(vel.x) * speed, axis_sign(vel.y) * speed);
}

/// Rewind the ball one step and sweep it against `target`
fn bounce_ball(state: &mut GameState, target: Box2D, dt: f32) {
    let ball = &mut state.ball;
    let rewound = ball.collider().translate(-ball.vel * dt);
    let Reflection {
        position, velocity, ..
    } = reflect_circle_box(rewound, ball.vel, dt, target);
    ball.pos = position;
    ball.vel = velocity;
}

/// -1, 0 or 1; unlike `f32::signum`, zero stays zero
#[inline]
fn axis_sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
