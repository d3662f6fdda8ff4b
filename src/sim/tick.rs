//! Per-frame simulation step
//!
//! Velocities are in units per frame, so one call to [`tick`] is exactly one
//! displayed frame. No delta-time scaling.

use glam::Vec2;

use super::collision::{DepthExit, clamp_paddle, depth_exit, paddle_covers, wall_overlap};
use super::schedule::{apply_due, schedule};
use super::state::{Axis, GameEvent, GameMode, SimulationState};
use crate::config::GameConfig;
use crate::projection::PointerProjector;

/// Host input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Latest pointer position in canvas pixels, if the pointer has been seen
    pub pointer: Option<Vec2>,
    /// Canvas size in pixels
    pub viewport: Vec2,
    /// Frame clock (ms)
    pub now_ms: f64,
}

/// Advance the game by one frame
pub fn tick(state: &mut SimulationState, config: &GameConfig, input: &FrameInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Deferred transitions become visible at the start of the next frame
    if let Some(event) = apply_due(state, input.now_ms) {
        events.push(event);
    }

    if state.mode == GameMode::Playing {
        if let Some(pointer) = input.pointer {
            update_paddle(state, config, pointer, input.viewport);
        }
    }

    if state.ball_moving() {
        step_ball(state, config, input.now_ms, &mut events);
    }

    events
}

/// Put the paddle under the pointer, clamped to the box face
pub fn update_paddle(state: &mut SimulationState, config: &GameConfig, pointer: Vec2, viewport: Vec2) {
    let projector = PointerProjector::from_config(viewport, config);
    let target = projector.project(pointer, config.paddle_z());
    state.paddle.pos = clamp_paddle(
        target,
        state.paddle.half_extents(),
        config.box_half().truncate(),
    );
}

fn step_ball(state: &mut SimulationState, config: &GameConfig, now_ms: f64, events: &mut Vec<GameEvent>) {
    let box_half = config.box_half();
    let ball = &mut state.ball;

    ball.pos += ball.vel;

    let (hit_x, hit_y) = wall_overlap(ball.pos, ball.radius, box_half);
    if hit_x {
        ball.vel.x = -ball.vel.x;
        events.push(GameEvent::WallBounce { axis: Axis::X });
    }
    if hit_y {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::WallBounce { axis: Axis::Y });
    }

    match depth_exit(ball.pos, ball.radius, box_half) {
        DepthExit::None => {}
        DepthExit::Far => {
            ball.vel.z = -ball.vel.z;
            events.push(GameEvent::WallBounce { axis: Axis::Z });
        }
        DepthExit::Near => match state.mode {
            GameMode::Playing => {
                let center = ball.pos.truncate();
                if paddle_covers(state.paddle.pos, state.paddle.half_extents(), center) {
                    ball.vel.z = -ball.vel.z;
                    state.score += 1;
                    log::debug!("Paddle hit, score {}", state.score);
                    events.push(GameEvent::PaddleHit { score: state.score });
                } else {
                    // The ball keeps flying through the near face until game over applies
                    if state.pending.is_none() {
                        log::info!("Ball missed at {:?}", center);
                        events.push(GameEvent::BallMissed);
                    }
                    schedule(state, GameMode::GameOver, now_ms, config.grace_delay_ms);
                }
            }
            _ => {
                ball.vel.z = -ball.vel.z;
                events.push(GameEvent::WallBounce { axis: Axis::Z });
            }
        },
    }
}

/// Handle a click at screen-centered pixel coordinates (y down).
///
/// Starts a game from the menu or the game over screen when the click lands on
/// the button; ignored otherwise.
pub fn click(state: &mut SimulationState, config: &GameConfig, at: Vec2) -> Option<GameEvent> {
    if state.mode == GameMode::Playing || !config.button.contains(at) {
        return None;
    }
    log::info!("Starting game from {:?}", state.mode);
    state.start_game(config);
    Some(GameEvent::GameStarted)
}
