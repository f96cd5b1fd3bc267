//! Gesture lifecycle state
//!
//! Each widget carries exactly one tagged gesture slot. The snapshot a
//! gesture needs lives inside its variant: created on start, read during
//! updates, dropped on finish. At most one gesture is active per widget;
//! starting another while one is active is refused by the widget.

use kurbo::{Point, Vec2};

use crate::pose::Pose;

/// Which axes a resize gesture drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAxis {
    /// Right-center handle: local X only
    Width,
    /// Bottom-center handle: local Y only
    Height,
    /// Bottom-right handle: both axes, aspect ratio locked
    Diagonal,
}

/// Lifecycle state of the widget's single gesture slot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Dragging the widget body
    Dragging {
        /// Position at gesture start
        start: Point,
    },

    /// Resizing via one of the resize handles
    Resizing {
        axis: ResizeAxis,
        /// Full pose at gesture start
        start: Pose,
    },

    /// Rotating via the rotate handle
    Rotating {
        /// Center-to-handle vector in screen space at gesture start
        start_vector: Vec2,
        /// Rotation at gesture start
        start_rotation: f64,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Dragging { .. } => "drag",
            GestureState::Resizing { .. } => "resize",
            GestureState::Rotating { .. } => "rotate",
        }
    }
}
