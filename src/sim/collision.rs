//! Collision tests for the ball against the box and paddle
//!
//! Discrete, not swept: the ball may overshoot a wall by one velocity step
//! before the bounce applies. All bound comparisons are strict, so a ball
//! resting exactly on a boundary does not bounce.

use glam::{Vec2, Vec3};

/// Which face of the box the ball has crossed along Z
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthExit {
    /// Inside the box depth
    None,
    /// Crossed the far (back) face
    Far,
    /// Crossed the near face, where the paddle is
    Near,
}

/// True if a sphere at `center` with `radius` pokes out of `[-half, half]`.
#[inline]
pub fn exceeds(center: f32, radius: f32, half: f32) -> bool {
    center - radius < -half || center + radius > half
}

/// Per-axis wall test for X and Y
pub fn wall_overlap(pos: Vec3, radius: f32, box_half: Vec3) -> (bool, bool) {
    (
        exceeds(pos.x, radius, box_half.x),
        exceeds(pos.y, radius, box_half.y),
    )
}

/// Depth test; the far face is checked first
pub fn depth_exit(pos: Vec3, radius: f32, box_half: Vec3) -> DepthExit {
    if pos.z - radius < -box_half.z {
        DepthExit::Far
    } else if pos.z + radius > box_half.z {
        DepthExit::Near
    } else {
        DepthExit::None
    }
}

/// Whether the ball center lies strictly inside the paddle face
pub fn paddle_covers(paddle_pos: Vec2, paddle_half: Vec2, point: Vec2) -> bool {
    point.x > paddle_pos.x - paddle_half.x
        && point.x < paddle_pos.x + paddle_half.x
        && point.y > paddle_pos.y - paddle_half.y
        && point.y < paddle_pos.y + paddle_half.y
}

/// Move the paddle center so its face stays within the box face.
///
/// An edge past the box edge is pulled back until it touches it.
pub fn clamp_paddle(pos: Vec2, paddle_half: Vec2, box_half: Vec2) -> Vec2 {
    let mut p = pos;
    if p.x - paddle_half.x < -box_half.x {
        p.x = -box_half.x + paddle_half.x;
    }
    if p.x + paddle_half.x > box_half.x {
        p.x = box_half.x - paddle_half.x;
    }
    if p.y - paddle_half.y < -box_half.y {
        p.y = -box_half.y + paddle_half.y;
    }
    if p.y + paddle_half.y > box_half.y {
        p.y = box_half.y - paddle_half.y;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOX_HALF: Vec3 = Vec3::new(350.0, 200.0, 300.0);
    const PADDLE_HALF: Vec2 = Vec2::new(50.0, 35.0);

    #[test]
    fn test_exceeds_is_strict() {
        // Touching the wall exactly is not a hit
        assert!(!exceeds(325.0, 25.0, 350.0));
        assert!(exceeds(325.5, 25.0, 350.0));
        assert!(!exceeds(-325.0, 25.0, 350.0));
        assert!(exceeds(-325.5, 25.0, 350.0));
        assert!(!exceeds(0.0, 25.0, 350.0));
    }

    #[test]
    fn test_wall_overlap_per_axis() {
        assert_eq!(
            wall_overlap(Vec3::new(330.0, 0.0, 0.0), 25.0, BOX_HALF),
            (true, false)
        );
        assert_eq!(
            wall_overlap(Vec3::new(0.0, -180.0, 0.0), 25.0, BOX_HALF),
            (false, true)
        );
        assert_eq!(
            wall_overlap(Vec3::new(340.0, 190.0, 0.0), 25.0, BOX_HALF),
            (true, true)
        );
    }

    #[test]
    fn test_depth_exit() {
        assert_eq!(depth_exit(Vec3::ZERO, 25.0, BOX_HALF), DepthExit::None);
        assert_eq!(
            depth_exit(Vec3::new(0.0, 0.0, 276.0), 25.0, BOX_HALF),
            DepthExit::Near
        );
        assert_eq!(
            depth_exit(Vec3::new(0.0, 0.0, -276.0), 25.0, BOX_HALF),
            DepthExit::Far
        );
        assert_eq!(
            depth_exit(Vec3::new(0.0, 0.0, 275.0), 25.0, BOX_HALF),
            DepthExit::None
        );
    }

    #[test]
    fn test_paddle_covers_open_interval() {
        let paddle = Vec2::new(100.0, 0.0);
        assert!(paddle_covers(paddle, PADDLE_HALF, Vec2::new(100.0, 0.0)));
        assert!(paddle_covers(paddle, PADDLE_HALF, Vec2::new(149.0, 34.0)));
        assert!(!paddle_covers(paddle, PADDLE_HALF, Vec2::new(150.0, 0.0)));
        assert!(!paddle_covers(paddle, PADDLE_HALF, Vec2::new(100.0, -35.0)));
        assert!(!paddle_covers(Vec2::new(400.0, 0.0), PADDLE_HALF, Vec2::ZERO));
    }

    #[test]
    fn test_clamp_paddle_touches_edges() {
        let box_half = BOX_HALF.truncate();
        assert_eq!(
            clamp_paddle(Vec2::new(1000.0, 1000.0), PADDLE_HALF, box_half),
            Vec2::new(300.0, 165.0)
        );
        assert_eq!(
            clamp_paddle(Vec2::new(-1000.0, -1000.0), PADDLE_HALF, box_half),
            Vec2::new(-300.0, -165.0)
        );
        assert_eq!(
            clamp_paddle(Vec2::new(12.0, -7.0), PADDLE_HALF, box_half),
            Vec2::new(12.0, -7.0)
        );
    }

    proptest! {
        #[test]
        fn prop_clamped_paddle_stays_in_box(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let box_half = BOX_HALF.truncate();
            let p = clamp_paddle(Vec2::new(x, y), PADDLE_HALF, box_half);
            prop_assert!(p.x - PADDLE_HALF.x >= -box_half.x);
            prop_assert!(p.x + PADDLE_HALF.x <= box_half.x);
            prop_assert!(p.y - PADDLE_HALF.y >= -box_half.y);
            prop_assert!(p.y + PADDLE_HALF.y <= box_half.y);
        }
    }
}
