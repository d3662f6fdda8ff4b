//! Game state and core simulation types
//!
//! One owned value holds everything a frame reads and writes.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::schedule::ScheduledTransition;
use crate::config::GameConfig;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title and Play button; the ball bounces freely as an attract loop
    #[default]
    Menu,
    /// Paddle follows the pointer, hits score
    Playing,
    /// Ball frozen, final score and Restart button
    GameOver,
}

/// Axis of a wall bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Things that happened during a frame, for logging and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Menu or GameOver -> Playing
    GameStarted,
    /// Ball bounced off a wall (Z = back wall, or near face in the menu)
    WallBounce { axis: Axis },
    /// Ball returned by the paddle; carries the new score
    PaddleHit { score: u32 },
    /// Ball passed the paddle; game over is scheduled
    BallMissed,
    /// Playing -> GameOver
    GameOver { score: u32 },
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    /// Units per frame
    pub vel: Vec3,
    pub radius: f32,
}

impl Ball {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: config.initial_velocity,
            radius: config.ball_radius,
        }
    }
}

/// The player's paddle, sliding on the plane just outside the box's near face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Center on the paddle plane
    pub pos: Vec2,
    /// Width, height, depth
    pub size: Vec3,
}

impl Paddle {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: config.paddle_size,
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size.truncate() * 0.5
    }
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub ball: Ball,
    pub paddle: Paddle,
    pub score: u32,
    pub mode: GameMode,
    /// Deferred mode change (game over after a miss)
    pub pending: Option<ScheduledTransition>,
}

impl SimulationState {
    /// Fresh state on the main menu
    pub fn new(config: &GameConfig) -> Self {
        Self {
            ball: Ball::new(config),
            paddle: Paddle::new(config),
            score: 0,
            mode: GameMode::Menu,
            pending: None,
        }
    }

    /// Enter Playing with score, ball and paddle reset
    pub fn start_game(&mut self, config: &GameConfig) {
        self.ball = Ball::new(config);
        self.paddle = Paddle::new(config);
        self.score = 0;
        self.pending = None;
        self.mode = GameMode::Playing;
    }

    /// Whether the ball advances this frame
    pub fn ball_moving(&self) -> bool {
        self.mode != GameMode::GameOver
    }
}
