//! Pointer to scene-plane projection
//!
//! Maps a pointer position in canvas pixels onto a plane of constant depth in
//! the scene, so the paddle sits under the cursor from the camera's point of
//! view.

use std::f32::consts::PI;

use glam::Vec2;

use crate::config::GameConfig;

/// Horizontal field of view for a vertical FOV and aspect ratio (radians)
#[inline]
pub fn hfov_from_vfov(vfov: f32, aspect: f32) -> f32 {
    2.0 * (aspect * (vfov * 0.5).tan()).atan()
}

/// Camera distance from the z = 0 plane for a canvas height.
///
/// Always uses a 30° half-angle, whatever FOV the camera is configured with.
#[inline]
pub fn eye_distance(canvas_height: f32) -> f32 {
    (canvas_height / 2.0) / (PI / 6.0).tan()
}

/// Linear remap of `v` from `[a0, a1]` to `[b0, b1]`
#[inline]
fn remap(v: f32, a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    b0 + (v - a0) / (a1 - a0) * (b1 - b0)
}

/// Camera parameters needed to invert the perspective for pointer input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerProjector {
    /// Canvas size in pixels
    pub viewport: Vec2,
    /// Vertical field of view (radians)
    pub vfov: f32,
    /// Empirical correction between nominal FOV and visible extent
    pub fov_scale: f32,
}

impl PointerProjector {
    pub fn new(viewport: Vec2, vfov: f32, fov_scale: f32) -> Self {
        Self {
            viewport,
            vfov,
            fov_scale,
        }
    }

    pub fn from_config(viewport: Vec2, config: &GameConfig) -> Self {
        Self::new(viewport, config.vfov(), config.fov_scale)
    }

    /// World-space extent visible at the eye's reference plane
    pub fn world_size(&self) -> Vec2 {
        let aspect = self.viewport.x / self.viewport.y;
        let hfov = hfov_from_vfov(self.vfov, aspect);
        let eye = eye_distance(self.viewport.y);
        Vec2::new(
            (hfov / 2.0).tan() * self.fov_scale * eye * 2.0,
            (self.vfov / 2.0).tan() * self.fov_scale * eye * 2.0,
        )
    }

    /// Project a pointer (canvas pixels, y down) onto the plane at depth `plane_z`.
    ///
    /// Returns scene coordinates with y up.
    pub fn project(&self, pointer: Vec2, plane_z: f32) -> Vec2 {
        let (w, h) = (self.viewport.x, self.viewport.y);
        if !(w > 0.0 && h > 0.0) {
            return Vec2::ZERO;
        }

        let dx = pointer.x - w / 2.0;
        let dy = -(pointer.y - h / 2.0);

        let world = self.world_size();
        let nx = remap(dx, -w / 2.0, w / 2.0, -world.x / 2.0, world.x / 2.0);
        let ny = remap(dy, -h / 2.0, h / 2.0, -world.y / 2.0, world.y / 2.0);

        // Similar triangles from the eye through the reference plane to the target plane
        let eye = eye_distance(h);
        let reference = self.fov_scale * eye;
        let theta_x = (nx / reference).atan();
        let theta_y = (ny / reference).atan();

        Vec2::new(
            theta_x.tan() * (eye - plane_z),
            theta_y.tan() * (eye - plane_z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn test_hfov_square_viewport_matches_vfov() {
        let vfov = PI / 3.0;
        assert!(approx_eq(hfov_from_vfov(vfov, 1.0), vfov, 1e-6));
        assert!(hfov_from_vfov(vfov, 16.0 / 9.0) > vfov);
    }

    #[test]
    fn test_eye_distance_ignores_fov() {
        // 300 / tan(30°)
        assert!(approx_eq(eye_distance(600.0), 519.615_2, 1e-2));
    }

    #[test]
    fn test_center_maps_to_origin() {
        let p = PointerProjector::from_config(Vec2::new(1280.0, 720.0), &GameConfig::default());
        assert_eq!(p.project(Vec2::new(640.0, 360.0), 308.0), Vec2::ZERO);
    }

    #[test]
    fn test_right_and_up_are_positive() {
        let p = PointerProjector::from_config(Vec2::new(800.0, 600.0), &GameConfig::default());
        let v = p.project(Vec2::new(700.0, 100.0), 308.0);
        assert!(v.x > 0.0);
        assert!(v.y > 0.0);
        let v = p.project(Vec2::new(100.0, 500.0), 308.0);
        assert!(v.x < 0.0);
        assert!(v.y < 0.0);
    }

    #[test]
    fn test_vertical_offset_matches_closed_form() {
        // For y the remap and the reference distance cancel: plane_y = dy * tan(vfov/2) * 2 / h * (eye - z)
        let viewport = Vec2::new(800.0, 600.0);
        let p = PointerProjector::new(viewport, PI / 3.0, 0.9);
        let eye = eye_distance(600.0);
        let z = 308.0;
        let v = p.project(Vec2::new(400.0, 150.0), z);
        let expected = 150.0 * (PI / 6.0).tan() * 2.0 / 600.0 * (eye - z);
        assert!(approx_eq(v.y, expected, 1e-3), "{} vs {}", v.y, expected);
        assert!(approx_eq(v.x, 0.0, 1e-6));
    }

    #[test]
    fn test_plane_closer_to_eye_shrinks_offset() {
        let p = PointerProjector::from_config(Vec2::new(800.0, 600.0), &GameConfig::default());
        let near = p.project(Vec2::new(700.0, 300.0), 400.0);
        let far = p.project(Vec2::new(700.0, 300.0), 0.0);
        assert!(near.x.abs() < far.x.abs());
    }

    #[test]
    fn test_degenerate_viewport_is_zero() {
        let p = PointerProjector::from_config(Vec2::new(0.0, 600.0), &GameConfig::default());
        assert_eq!(p.project(Vec2::new(10.0, 10.0), 308.0), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_center_always_projects_to_origin(
            w in 1.0f32..4000.0,
            h in 1.0f32..4000.0,
            z in -600.0f32..600.0,
        ) {
            let p = PointerProjector::from_config(Vec2::new(w, h), &GameConfig::default());
            let v = p.project(Vec2::new(w / 2.0, h / 2.0), z);
            prop_assert!(v.x.abs() < 1e-4 && v.y.abs() < 1e-4);
        }
    }
}
