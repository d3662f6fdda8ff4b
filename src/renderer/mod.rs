//! Scene rendering
//!
//! The scene is drawn through the [`DrawTarget`] trait once per frame.
//! [`SceneBatch`] tessellates those calls into vertex lists, which the WebGPU
//! [`AnaglyphRenderer`] draws once per eye.

use glam::Vec3;

use crate::ui::ScreenRect;

pub mod anaglyph;
pub mod batch;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use anaglyph::AnaglyphRenderer;
pub use batch::{Label, SceneBatch};
pub use scene::draw_scene;
pub use vertex::Vertex;

/// Line color and weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: [f32; 4],
    /// Line weight in scene units
    pub weight: f32,
}

impl Stroke {
    pub const fn new(color: [f32; 4], weight: f32) -> Self {
        Self { color, weight }
    }
}

/// Surface the scene draws into
pub trait DrawTarget {
    /// Fill the whole frame
    fn clear(&mut self, color: [f32; 4]);
    /// Outline of an axis-aligned box
    fn wire_box(&mut self, center: Vec3, size: Vec3, stroke: Stroke);
    /// Filled axis-aligned box
    fn solid_box(&mut self, center: Vec3, size: Vec3, color: [f32; 4]);
    /// Filled sphere
    fn sphere(&mut self, center: Vec3, radius: f32, color: [f32; 4]);
    /// Text billboard centered at `position`
    fn text(&mut self, text: &str, position: Vec3, size: f32, color: [f32; 4]);
    /// Filled button on the z = 0 plane with a centered label
    fn button(&mut self, rect: ScreenRect, label: &str, fill: [f32; 4]);
}
