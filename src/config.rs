//! Game configuration
//!
//! Every tunable constant of the game lives here so the browser shell can
//! override it from LocalStorage. Missing fields fall back to the defaults in
//! [`crate::consts`].

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ui::ScreenRect;

/// Reasons a configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// A size or radius is zero, negative or not finite
    NonPositive(&'static str),
    /// The paddle face is larger than the box face it slides on
    PaddleTooLarge,
    /// Vertical field of view outside (0, 180) degrees
    FieldOfView(f32),
    /// Grace delay is negative or not finite
    GraceDelay(f64),
    /// Button region has no area
    EmptyButton,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {e}"),
            ConfigError::NonPositive(field) => write!(f, "{field} must be positive"),
            ConfigError::PaddleTooLarge => {
                write!(f, "paddle must fit within the box's width and height")
            }
            ConfigError::FieldOfView(deg) => {
                write!(f, "vertical field of view {deg} is outside (0, 180) degrees")
            }
            ConfigError::GraceDelay(ms) => write!(f, "grace delay {ms}ms must be >= 0"),
            ConfigError::EmptyButton => write!(f, "button region is empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Box width, height and depth
    pub box_size: Vec3,
    pub ball_radius: f32,
    /// Paddle width, height and depth
    pub paddle_size: Vec3,
    /// Ball velocity on start/restart, units per frame
    pub initial_velocity: Vec3,
    pub vfov_degrees: f32,
    /// Correction between the nominal FOV and the visible extent
    pub fov_scale: f32,
    pub grace_delay_ms: f64,
    /// Play/Restart hit region, screen-centered pixels
    pub button: ScreenRect,
    /// Anaglyph eye separation
    pub eye_separation: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            box_size: Vec3::new(BOX_WIDTH, BOX_HEIGHT, BOX_DEPTH),
            ball_radius: BALL_RADIUS,
            paddle_size: Vec3::new(PADDLE_WIDTH, PADDLE_HEIGHT, PADDLE_DEPTH),
            initial_velocity: Vec3::from_array(BALL_INITIAL_VELOCITY),
            vfov_degrees: VFOV_DEGREES,
            fov_scale: FOV_SCALE,
            grace_delay_ms: GRACE_DELAY_MS,
            button: ScreenRect::new(Vec2::from_array(BUTTON_MIN), Vec2::from_array(BUTTON_MAX)),
            eye_separation: EYE_SEPARATION,
        }
    }
}

impl GameConfig {
    /// Half extents of the box
    pub fn box_half(&self) -> Vec3 {
        self.box_size * 0.5
    }

    /// Half extents of the paddle
    pub fn paddle_half(&self) -> Vec3 {
        self.paddle_size * 0.5
    }

    /// Depth of the paddle's center plane, just outside the box's near face
    pub fn paddle_z(&self) -> f32 {
        self.box_size.z / 2.0 + self.paddle_size.z / 2.0
    }

    /// Vertical field of view in radians
    pub fn vfov(&self) -> f32 {
        self.vfov_degrees.to_radians()
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !self.box_size.to_array().into_iter().all(positive) {
            return Err(ConfigError::NonPositive("box_size"));
        }
        if !self.paddle_size.to_array().into_iter().all(positive) {
            return Err(ConfigError::NonPositive("paddle_size"));
        }
        if !positive(self.ball_radius) {
            return Err(ConfigError::NonPositive("ball_radius"));
        }
        if !positive(self.fov_scale) {
            return Err(ConfigError::NonPositive("fov_scale"));
        }
        if self.paddle_size.x > self.box_size.x || self.paddle_size.y > self.box_size.y {
            return Err(ConfigError::PaddleTooLarge);
        }
        if !(self.vfov_degrees > 0.0 && self.vfov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(self.vfov_degrees));
        }
        if !(self.grace_delay_ms.is_finite() && self.grace_delay_ms >= 0.0) {
            return Err(ConfigError::GraceDelay(self.grace_delay_ms));
        }
        if self.button.is_empty() {
            return Err(ConfigError::EmptyButton);
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "curveball3d_config";

    /// Load config overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config overrides from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {e}"),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
