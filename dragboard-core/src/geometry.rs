//! Geometry kernel
//!
//! Stateless math for rotated-rectangle manipulation. Everything here is a
//! pure function of its inputs; all state lives in the widget.
//!
//! Screen convention throughout: Y grows downward and positive rotation is
//! clockwise, so rotating a vector is
//! `x' = x cos θ − y sin θ`, `y' = x sin θ + y cos θ`.

use kurbo::Vec2;

/// Axis-aligned extents of a set of points, relative to the rectangle center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl CenterBounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Rotate a vector by `rotation` radians
pub fn rotate_vec(v: Vec2, rotation: f64) -> Vec2 {
    let (sin, cos) = rotation.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Corners of a `width × height` rectangle centered at the origin, rotated
/// by `rotation` radians, relative to the rectangle's own center
///
/// Order: top-left, top-right, bottom-right, bottom-left.
pub fn rotated_corners(width: f64, height: f64, rotation: f64) -> [Vec2; 4] {
    let w2 = width / 2.0;
    let h2 = height / 2.0;
    [
        Vec2::new(-w2, -h2),
        Vec2::new(w2, -h2),
        Vec2::new(w2, h2),
        Vec2::new(-w2, h2),
    ]
    .map(|corner| rotate_vec(corner, rotation))
}

/// Axis-aligned bounding box of rotated corners, relative to the center
pub fn bounding_box(corners: &[Vec2; 4]) -> CenterBounds {
    let mut bounds = CenterBounds {
        min_x: corners[0].x,
        max_x: corners[0].x,
        min_y: corners[0].y,
        max_y: corners[0].y,
    };
    for corner in &corners[1..] {
        bounds.min_x = bounds.min_x.min(corner.x);
        bounds.max_x = bounds.max_x.max(corner.x);
        bounds.min_y = bounds.min_y.min(corner.y);
        bounds.max_y = bounds.max_y.max(corner.y);
    }
    bounds
}

/// Rotate a screen-space drag delta into the rectangle's local frame
/// (the inverse of [`rotate_vec`])
pub fn local_delta(translation: Vec2, rotation: f64) -> Vec2 {
    let (sin, cos) = rotation.sin_cos();
    Vec2::new(
        translation.x * cos + translation.y * sin,
        -translation.x * sin + translation.y * cos,
    )
}

/// Scalar projection factor `(P·D)/(D·D)` of the cursor vector onto the
/// rectangle's un-rotated diagonal
///
/// Used for aspect-locked diagonal resize: the factor is the uniform scale
/// that keeps the dragged corner on the line through the original diagonal.
/// The caller must guard a zero-length diagonal.
pub fn project_onto_diagonal(cursor: Vec2, diagonal: Vec2) -> f64 {
    cursor.dot(diagonal) / diagonal.dot(diagonal)
}

/// Screen-space shift needed to keep the pre-rotation top-left corner fixed
/// when the size changes by `(dw, dh)` symmetrically about the center
///
/// The center moves by `(dw/2, dh/2)` in local space; the anchor stays put
/// when the position is moved by `-shift` where
/// `shift = (dw/2, dh/2) − R(rotation)·(dw/2, dh/2)`.
pub fn anchor_shift(dw: f64, dh: f64, rotation: f64) -> Vec2 {
    let half = Vec2::new(dw / 2.0, dh / 2.0);
    half - rotate_vec(half, rotation)
}

/// Shortest signed angle from `start` to `current`, normalized to (−π, π]
///
/// Both vectors are reduced with `atan2`; the difference is folded once,
/// which is enough because each angle is already within (−π, π]. This keeps
/// incremental rotation continuous across the atan2 branch cut.
pub fn angle_delta(start: Vec2, current: Vec2) -> f64 {
    let mut diff = current.atan2() - start.atan2();
    if diff > std::f64::consts::PI {
        diff -= 2.0 * std::f64::consts::PI;
    }
    if diff < -std::f64::consts::PI {
        diff += 2.0 * std::f64::consts::PI;
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_vec_close(a: Vec2, b: Vec2) {
        assert!((a.x - b.x).abs() < 1e-9, "{a:?} != {b:?}");
        assert!((a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_rotate_vec_quarter_turn() {
        // Clockwise-positive in screen coords: +X rotates toward +Y
        let rotated = rotate_vec(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert_vec_close(rotated, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_local_delta_inverts_rotate_vec() {
        let v = Vec2::new(3.0, -7.0);
        let round_trip = local_delta(rotate_vec(v, 0.83), 0.83);
        assert_vec_close(round_trip, v);
    }

    #[test]
    fn test_corners_unrotated() {
        let corners = rotated_corners(100.0, 50.0, 0.0);
        assert_vec_close(corners[0], Vec2::new(-50.0, -25.0));
        assert_vec_close(corners[1], Vec2::new(50.0, -25.0));
        assert_vec_close(corners[2], Vec2::new(50.0, 25.0));
        assert_vec_close(corners[3], Vec2::new(-50.0, 25.0));
    }

    #[test]
    fn test_bounding_box_quarter_turn_swaps_extents() {
        let corners = rotated_corners(100.0, 50.0, FRAC_PI_2);
        let bounds = bounding_box(&corners);
        assert!((bounds.width() - 50.0).abs() < 1e-9);
        assert!((bounds.height() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_diagonal_square() {
        // A 100x100 square at 45° has a bbox of 100·√2 per side
        let corners = rotated_corners(100.0, 100.0, FRAC_PI_4);
        let bounds = bounding_box(&corners);
        let expected = 100.0 * 2.0_f64.sqrt();
        assert!((bounds.width() - expected).abs() < 1e-9);
        assert!((bounds.height() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_projection_on_diagonal_is_identity() {
        let diagonal = Vec2::new(100.0, 50.0);
        let factor = project_onto_diagonal(diagonal * 1.5, diagonal);
        assert!((factor - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_projection_orthogonal_is_zero() {
        let diagonal = Vec2::new(100.0, 50.0);
        let orthogonal = Vec2::new(-50.0, 100.0);
        assert!(project_onto_diagonal(orthogonal, diagonal).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_shift_zero_rotation_is_zero() {
        assert_vec_close(anchor_shift(40.0, 20.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_anchor_shift_keeps_top_left_fixed() {
        // Growing by (dw, dh) at rotation θ: the new top-left corner, after
        // moving the position by -shift, must land where the old one was.
        let (w, h, dw, dh, theta) = (100.0, 60.0, 30.0, 18.0, 0.7);
        let shift = anchor_shift(dw, dh, theta);

        // Screen position of the rotated top-left corner for a rect whose
        // un-rotated top-left sits at (x, y)
        let corner = |x: f64, y: f64, w: f64, h: f64| {
            let center = Vec2::new(x + w / 2.0, y + h / 2.0);
            center + rotate_vec(Vec2::new(-w / 2.0, -h / 2.0), theta)
        };

        let before = corner(10.0, 20.0, w, h);
        let after = corner(10.0 - shift.x, 20.0 - shift.y, w + dw, h + dh);
        assert_vec_close(before, after);
    }

    #[test]
    fn test_angle_delta_small_step() {
        let start = Vec2::new(1.0, 0.0);
        let current = rotate_vec(start, 0.1);
        assert!((angle_delta(start, current) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_angle_delta_across_branch_cut() {
        // Step across the -X axis: the raw atan2 difference is near -2π
        // but the true step is small and positive.
        let start = Vec2::new(-1.0, 0.01);
        let current = Vec2::new(-1.0, -0.01);
        let delta = angle_delta(start, current);
        assert!(delta > 0.0);
        assert!(delta < 0.1);
    }

    #[test]
    fn test_angle_delta_half_turn_is_pi_magnitude() {
        let start = Vec2::new(1.0, 0.0);
        let current = Vec2::new(-1.0, 0.0);
        assert!((angle_delta(start, current).abs() - PI).abs() < 1e-9);
    }
}
