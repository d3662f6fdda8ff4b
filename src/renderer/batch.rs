//! CPU-side draw target that collects vertices for the GPU renderer

use glam::{Vec2, Vec3};

use super::shapes;
use super::vertex::{Vertex, colors};
use super::{DrawTarget, Stroke};
use crate::ui::ScreenRect;

/// Thickness of the button plate around the z = 0 plane
const BUTTON_THICKNESS: f32 = 2.0;

/// Sphere tessellation
const SPHERE_RINGS: u32 = 12;
const SPHERE_SEGMENTS: u32 = 24;

/// Text to be laid out by the page on top of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Scene position (z = 0 plane for UI text)
    pub position: Vec3,
    pub size: f32,
    pub color: [f32; 4],
}

/// One frame of geometry
#[derive(Debug, Clone, Default)]
pub struct SceneBatch {
    pub clear_color: [f32; 4],
    /// Line list
    pub lines: Vec<Vertex>,
    /// Triangle list
    pub triangles: Vec<Vertex>,
    pub labels: Vec<Label>,
}

impl SceneBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty() && self.labels.is_empty()
    }
}

impl DrawTarget for SceneBatch {
    fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.lines.clear();
        self.triangles.clear();
        self.labels.clear();
    }

    fn wire_box(&mut self, center: Vec3, size: Vec3, stroke: Stroke) {
        self.lines
            .extend(shapes::box_edges(center, size, stroke.color));

        // Lines are one pixel wide on the GPU; heavy strokes get an inset outline too
        if stroke.weight > 1.0 {
            let inset = Vec3::new(stroke.weight, stroke.weight, 0.0);
            let inner = (size - inset).max(Vec3::ZERO);
            self.lines
                .extend(shapes::box_edges(center, inner, stroke.color));
        }
    }

    fn solid_box(&mut self, center: Vec3, size: Vec3, color: [f32; 4]) {
        self.triangles.extend(shapes::solid_box(center, size, color));
    }

    fn sphere(&mut self, center: Vec3, radius: f32, color: [f32; 4]) {
        self.triangles.extend(shapes::sphere(
            center,
            radius,
            color,
            SPHERE_RINGS,
            SPHERE_SEGMENTS,
        ));
    }

    fn text(&mut self, text: &str, position: Vec3, size: f32, color: [f32; 4]) {
        self.labels.push(Label {
            text: text.to_string(),
            position,
            size,
            color,
        });
    }

    fn button(&mut self, rect: ScreenRect, label: &str, fill: [f32; 4]) {
        let size: Vec2 = rect.size();
        let center = rect.scene_center();
        self.solid_box(center, size.extend(BUTTON_THICKNESS), fill);
        self.text(label, center, size.y * 0.4, colors::TEXT);
    }
}
