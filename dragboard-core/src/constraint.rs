//! Constraint policy
//!
//! Decides how a proposed pose interacts with the container: translation is
//! clamped to the nearest legal position ("stop at the wall"), while a resize
//! that cannot honor both the container and the anchor position is rejected
//! outright for that update tick. Clamping a resize would silently break the
//! aspect ratio or the anchor the user is holding; clamping a drag is what
//! users expect from direct manipulation.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Fixed-size container the widget must stay inside
///
/// Supplied by the host; immutable for the duration of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for ContainerBounds {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
        }
    }
}

impl ContainerBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Result of clamping a rotated rectangle into the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    /// Clamped top-left X (before rotation)
    pub x: f64,
    /// Clamped top-left Y (before rotation)
    pub y: f64,
    /// Width of the rotated bounding box
    pub bbox_width: f64,
    /// Height of the rotated bounding box
    pub bbox_height: f64,
}

/// Whether a resize update was committed or refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ResizeOutcome {
    /// Pose updated to the new size and anchor-preserving position
    Applied,
    /// Pose left untouched for this tick
    Rejected,
}

/// Clamp the rectangle's center so its rotated bounding box stays within
/// `[0, bounds.width] × [0, bounds.height]`, then derive the top-left
///
/// For a center `c` and corner extents `[min, max]` relative to it, the legal
/// center range on one axis is `[-min, container - max]`. The lower bound is
/// applied last, so a box larger than the container pins to the low edge.
pub fn clamp_to_container(
    width: f64,
    height: f64,
    rotation: f64,
    x: f64,
    y: f64,
    bounds: &ContainerBounds,
) -> Clamped {
    let cx = x + width / 2.0;
    let cy = y + height / 2.0;

    let extents = geometry::bounding_box(&geometry::rotated_corners(width, height, rotation));

    let clamped_cx = (-extents.min_x).max((bounds.width - extents.max_x).min(cx));
    let clamped_cy = (-extents.min_y).max((bounds.height - extents.max_y).min(cy));

    Clamped {
        x: clamped_cx - width / 2.0,
        y: clamped_cy - height / 2.0,
        bbox_width: extents.width(),
        bbox_height: extents.height(),
    }
}

/// Apply the reject-or-commit policy to a clamped resize candidate
///
/// Rejects when the rotated bounding box does not fit in the container at
/// all, or when containment forced the position more than `tolerance` away
/// from the anchor-preserving target.
pub fn validate_resize(
    clamped: &Clamped,
    target: Vec2,
    bounds: &ContainerBounds,
    tolerance: f64,
) -> ResizeOutcome {
    if clamped.bbox_width > bounds.width || clamped.bbox_height > bounds.height {
        return ResizeOutcome::Rejected;
    }
    if (clamped.x - target.x).abs() > tolerance || (clamped.y - target.y).abs() > tolerance {
        return ResizeOutcome::Rejected;
    }
    ResizeOutcome::Applied
}
