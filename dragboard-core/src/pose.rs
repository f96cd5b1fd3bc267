//! Widget pose state
//!
//! A Pose is the authoritative position/size/rotation of one widget. Position
//! and size describe the un-rotated rectangle; rotation is applied about the
//! rectangle's center for rendering and containment.

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Position, size, and rotation of a widget
///
/// `x`/`y` are the top-left corner before rotation, in container-local units.
/// `rotation` is in radians, clockwise-positive in screen coordinates, and is
/// stored unnormalized; only angle *deltas* are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Top-left X before rotation
    pub x: f64,
    /// Top-left Y before rotation
    pub y: f64,
    /// Width before rotation
    pub width: f64,
    /// Height before rotation
    pub height: f64,
    /// Rotation in radians (unbounded)
    pub rotation: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
        }
    }
}

impl Pose {
    /// Create a pose with position and size, no rotation
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Set rotation (radians)
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Center of the rectangle in container coordinates
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Transform mapping local rectangle coordinates (0..width, 0..height)
    /// to container coordinates, rotation applied about the center
    pub fn to_affine(&self) -> Affine {
        Affine::rotate_about(self.rotation, self.center()) * Affine::translate((self.x, self.y))
    }

    /// The four rotated corners in container coordinates
    /// (top-left, top-right, bottom-right, bottom-left)
    pub fn screen_corners(&self) -> [Point; 4] {
        let center = self.center();
        geometry::rotated_corners(self.width, self.height, self.rotation)
            .map(|corner| center + corner)
    }
}
