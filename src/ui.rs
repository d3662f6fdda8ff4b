//! Menu, HUD and game over overlay
//!
//! UI elements live on the z = 0 plane of the scene. Screen-centered pixel
//! coordinates (y down) map to that plane by flipping y. The camera eye sits at
//! `(height / 2) / tan(π/6)`, so this is one unit per pixel only at the default
//! 60° vfov; other fields of view scale the drawn UI about the canvas center,
//! while the button hit test stays in screen pixels. Text labels are placed by
//! projecting through the camera (`renderer::anaglyph::project_to_canvas`).

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::sim::GameMode;

/// Button fill when idle / hovered
pub const BUTTON_FILL: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
pub const BUTTON_FILL_HOVER: [f32; 4] = [0.55, 0.55, 0.55, 1.0];

/// Axis-aligned rectangle in screen-centered pixels (origin at canvas center, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Inclusive hit test
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn is_empty(&self) -> bool {
        !(self.max.x > self.min.x && self.max.y > self.min.y)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Center of the rectangle on the scene's z = 0 plane
    pub fn scene_center(&self) -> Vec3 {
        screen_to_scene(self.center())
    }
}

/// Canvas pixel coordinates to screen-centered coordinates
pub fn screen_centered(pointer: Vec2, viewport: Vec2) -> Vec2 {
    pointer - viewport * 0.5
}

/// Screen-centered pixels to a point on the scene's z = 0 plane
pub fn screen_to_scene(p: Vec2) -> Vec3 {
    Vec3::new(p.x, -p.y, 0.0)
}

/// Text drawn as a billboard inside the scene
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub position: Vec3,
    /// Glyph height in scene units
    pub size: f32,
}

/// The Play/Restart button as it should be drawn this frame
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonItem {
    pub label: &'static str,
    pub rect: ScreenRect,
    pub fill: [f32; 4],
}

/// Everything the UI layer draws for one mode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub texts: Vec<TextItem>,
    pub button: Option<ButtonItem>,
}

fn button(label: &'static str, config: &GameConfig, hovered: bool) -> ButtonItem {
    ButtonItem {
        label,
        rect: config.button,
        fill: if hovered { BUTTON_FILL_HOVER } else { BUTTON_FILL },
    }
}

/// Build the overlay for the current mode
pub fn overlay(mode: GameMode, score: u32, config: &GameConfig, hovered: bool) -> Overlay {
    let top = config.box_size.y / 2.0;
    match mode {
        GameMode::Menu => Overlay {
            texts: vec![TextItem {
                text: "Curveball 3D".to_string(),
                position: Vec3::new(0.0, 40.0, 0.0),
                size: 64.0,
            }],
            button: Some(button("Play", config, hovered)),
        },
        GameMode::Playing => Overlay {
            texts: vec![TextItem {
                text: score.to_string(),
                position: Vec3::new(0.0, top - 40.0, 0.0),
                size: 48.0,
            }],
            button: None,
        },
        GameMode::GameOver => Overlay {
            texts: vec![
                TextItem {
                    text: "Game Over".to_string(),
                    position: Vec3::new(0.0, 80.0, 0.0),
                    size: 64.0,
                },
                TextItem {
                    text: format!("Score: {score}"),
                    position: Vec3::new(0.0, 10.0, 0.0),
                    size: 36.0,
                },
            ],
            button: Some(button("Restart", config, hovered)),
        },
    }
}
