//! Curveball 3D - Pong in a box, viewed through red/cyan glasses
//!
//! Core modules:
//! - `projection`: Pointer to scene-plane mapping through the camera model
//! - `sim`: Deterministic per-frame simulation (ball, paddle, score, mode)
//! - `ui`: Screen-space button and per-mode overlay text
//! - `game`: Owning controller that serializes host input into frames
//! - `renderer`: Scene drawing and the WebGPU anaglyph renderer
//! - `config`: Tunable constants with JSON overrides

pub mod config;
pub mod game;
pub mod projection;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, InputEvent};

/// Game configuration defaults
pub mod consts {
    /// Box dimensions (width, height, depth) in scene units
    pub const BOX_WIDTH: f32 = 700.0;
    pub const BOX_HEIGHT: f32 = 400.0;
    pub const BOX_DEPTH: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 25.0;
    /// Velocity in units per frame
    pub const BALL_INITIAL_VELOCITY: [f32; 3] = [5.0, 5.0, 12.0];

    /// Paddle dimensions
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 70.0;
    pub const PADDLE_DEPTH: f32 = 16.0;

    /// Camera vertical field of view
    pub const VFOV_DEGREES: f32 = 60.0;
    /// Visible extent is ~90% of what the nominal FOV predicts (tuned by hand)
    pub const FOV_SCALE: f32 = 0.9;

    /// Delay between a missed ball and the game over screen
    pub const GRACE_DELAY_MS: f64 = 250.0;

    /// Play/Restart button region in screen-centered pixels (y down)
    pub const BUTTON_MIN: [f32; 2] = [-160.0, 80.0];
    pub const BUTTON_MAX: [f32; 2] = [160.0, 240.0];

    /// Distance between the two anaglyph eyes in scene units
    pub const EYE_SEPARATION: f32 = 12.0;
}

/// Approximate float equality
#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
