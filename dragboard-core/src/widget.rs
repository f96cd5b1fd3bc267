//! The transform state machine
//!
//! A Widget owns one pose and one gesture slot and turns cumulative
//! pointer-drag deltas into committed pose updates. All deltas are measured
//! from gesture start, so updates are idempotent per input event and the
//! math never accumulates error across ticks.
//!
//! Update policy (see [`crate::constraint`]): drags always commit a clamped
//! position; resizes either fully commit or leave the pose untouched.

use kurbo::{Point, Vec2};
use tracing::debug;
use uuid::Uuid;

use crate::config::TransformConfig;
use crate::constraint::{self, ContainerBounds, ResizeOutcome};
use crate::events::{EventQueue, WidgetEvent};
use crate::geometry;
use crate::gesture::{GestureState, ResizeAxis};
use crate::pose::Pose;
use crate::watch::PoseWatch;

/// One draggable, resizable, rotatable widget
#[derive(Debug)]
pub struct Widget {
    /// Unique identifier, reported through selection/delete/copy events
    pub id: Uuid,

    pose: Pose,
    gesture: GestureState,
    config: TransformConfig,
    watch: PoseWatch,
}

impl Widget {
    /// Create a widget with a fresh id
    pub fn new(pose: Pose, config: TransformConfig) -> Self {
        Self::with_id(Uuid::new_v4(), pose, config)
    }

    /// Create a widget with a specific id
    pub fn with_id(id: Uuid, pose: Pose, config: TransformConfig) -> Self {
        Self {
            id,
            pose,
            gesture: GestureState::Idle,
            config,
            watch: PoseWatch::new(pose),
        }
    }

    /// Current committed pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Policy parameters this widget was built with
    pub fn config(&self) -> TransformConfig {
        self.config
    }

    /// Shared handle for observing committed pose updates
    pub fn watch(&self) -> PoseWatch {
        self.watch.clone()
    }

    /// Whether a gesture is currently in progress
    pub fn is_active(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// A short tap on the widget body: selects without moving
    pub fn tap(&self, events: &EventQueue) {
        events.emit(WidgetEvent::Selected(self.id));
    }

    /// Start a body drag; selects the widget as a side effect
    ///
    /// Returns `false` (and changes nothing) if another gesture is active.
    pub fn begin_drag(&mut self, events: &EventQueue) -> bool {
        if !self.begin(GestureState::Dragging {
            start: Point::new(self.pose.x, self.pose.y),
        }) {
            return false;
        }
        events.emit(WidgetEvent::Selected(self.id));
        true
    }

    /// Apply a drag update with the cumulative translation since start
    ///
    /// The candidate position is clamped so the rotated bounding box stays
    /// inside the container; a drag never rejects.
    pub fn update_drag(&mut self, translation: Vec2, bounds: &ContainerBounds) {
        let GestureState::Dragging { start } = self.gesture else {
            debug!(widget = %self.id, state = self.gesture.name(), "drag update ignored");
            return;
        };

        let clamped = constraint::clamp_to_container(
            self.pose.width,
            self.pose.height,
            self.pose.rotation,
            start.x + translation.x,
            start.y + translation.y,
            bounds,
        );

        self.pose.x = clamped.x;
        self.pose.y = clamped.y;
        self.watch.publish(self.pose);
    }

    /// Start a resize on the given axis
    pub fn begin_resize(&mut self, axis: ResizeAxis) -> bool {
        self.begin(GestureState::Resizing {
            axis,
            start: self.pose,
        })
    }

    /// Apply a resize update with the cumulative translation since start
    ///
    /// The translation is rotated into the widget's local frame. Diagonal
    /// resizes project the dragged corner onto the start diagonal so the
    /// aspect ratio is preserved; single-axis resizes move one extent. The
    /// new size is floored at `min_size`, the position is shifted to keep
    /// the pre-rotation top-left corner fixed, and the whole candidate is
    /// committed only if it satisfies the container constraint.
    pub fn update_resize(
        &mut self,
        translation: Vec2,
        bounds: &ContainerBounds,
    ) -> ResizeOutcome {
        let GestureState::Resizing { axis, start } = self.gesture else {
            debug!(widget = %self.id, state = self.gesture.name(), "resize update ignored");
            return ResizeOutcome::Rejected;
        };

        let min = self.config.min_size;
        let delta = geometry::local_delta(translation, self.pose.rotation);

        let (new_width, new_height) = match axis {
            ResizeAxis::Diagonal => {
                // A degenerate start size makes the projection (and the
                // minimum-size floor) undefined; treat the tick as a no-op.
                if start.width <= f64::EPSILON || start.height <= f64::EPSILON {
                    debug!(widget = %self.id, "diagonal resize with degenerate start size");
                    return ResizeOutcome::Rejected;
                }
                let diagonal = Vec2::new(start.width, start.height);
                let cursor = diagonal + delta;
                let mut scale = geometry::project_onto_diagonal(cursor, diagonal);
                if start.width * scale < min || start.height * scale < min {
                    scale = (min / start.width).max(min / start.height);
                }
                (start.width * scale, start.height * scale)
            }
            ResizeAxis::Width => ((start.width + delta.x).max(min), start.height),
            ResizeAxis::Height => (start.width, (start.height + delta.y).max(min)),
        };

        let dw = new_width - start.width;
        let dh = new_height - start.height;
        let shift = geometry::anchor_shift(dw, dh, self.pose.rotation);
        let target = Vec2::new(start.x - shift.x, start.y - shift.y);

        let clamped = constraint::clamp_to_container(
            new_width,
            new_height,
            self.pose.rotation,
            target.x,
            target.y,
            bounds,
        );

        match constraint::validate_resize(&clamped, target, bounds, self.config.reject_tolerance) {
            ResizeOutcome::Rejected => {
                debug!(widget = %self.id, new_width, new_height, "resize rejected");
                ResizeOutcome::Rejected
            }
            ResizeOutcome::Applied => {
                self.pose.width = new_width;
                self.pose.height = new_height;
                self.pose.x = clamped.x;
                self.pose.y = clamped.y;
                self.watch.publish(self.pose);
                ResizeOutcome::Applied
            }
        }
    }

    /// Start a rotation
    ///
    /// Tracks the screen-space vector from the widget center to the rotate
    /// handle (bottom-left corner of the handle frame), not the raw pointer
    /// angle: the handle vector is far from the center and stays continuous
    /// when later updates add the pointer translation to it.
    pub fn begin_rotate(&mut self) -> bool {
        let frame_width = self.pose.width + 2.0 * self.config.handle_offset;
        let frame_height = self.pose.height + 2.0 * self.config.handle_offset;
        let local = Vec2::new(-frame_width / 2.0, frame_height / 2.0);
        self.begin(GestureState::Rotating {
            start_vector: geometry::rotate_vec(local, self.pose.rotation),
            start_rotation: self.pose.rotation,
        })
    }

    /// Apply a rotation update with the cumulative translation since start
    pub fn update_rotate(&mut self, translation: Vec2) {
        let GestureState::Rotating {
            start_vector,
            start_rotation,
        } = self.gesture
        else {
            debug!(widget = %self.id, state = self.gesture.name(), "rotate update ignored");
            return;
        };

        let current = start_vector + translation;
        // A collapsed tracking vector has no angle; atan2 of the zero
        // vector would snap the rotation instead of holding it.
        if current.hypot() <= f64::EPSILON {
            debug!(widget = %self.id, "rotate update with degenerate tracking vector");
            return;
        }
        self.pose.rotation = start_rotation + geometry::angle_delta(start_vector, current);
        self.watch.publish(self.pose);
    }

    /// End the active gesture, keeping the last committed pose
    pub fn finish_gesture(&mut self) {
        if !self.gesture.is_idle() {
            debug!(widget = %self.id, gesture = self.gesture.name(), "gesture finished");
        }
        self.gesture = GestureState::Idle;
    }

    /// Cancel the active gesture
    ///
    /// The last committed pose stands; there is no rollback to the
    /// gesture-start snapshot.
    pub fn cancel_gesture(&mut self) {
        if !self.gesture.is_idle() {
            debug!(widget = %self.id, gesture = self.gesture.name(), "gesture cancelled");
        }
        self.gesture = GestureState::Idle;
    }

    /// Transition into a new gesture if the slot is idle
    fn begin(&mut self, gesture: GestureState) -> bool {
        if !self.gesture.is_idle() {
            debug!(
                widget = %self.id,
                active = self.gesture.name(),
                refused = gesture.name(),
                "gesture refused, another is active"
            );
            return false;
        }
        debug!(widget = %self.id, gesture = gesture.name(), "gesture started");
        self.gesture = gesture;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn widget() -> Widget {
        Widget::new(Pose::default(), TransformConfig::default())
    }

    fn bounds() -> ContainerBounds {
        ContainerBounds::new(300.0, 300.0)
    }

    #[test]
    fn test_drag_moves_freely_inside() {
        let (queue, _receiver) = events::channel();
        let mut w = widget();
        assert!(w.begin_drag(&queue));
        w.update_drag(Vec2::new(20.0, -10.0), &bounds());
        assert_eq!(w.pose().x, 70.0);
        assert_eq!(w.pose().y, 40.0);
    }

    #[test]
    fn test_drag_clamps_to_container() {
        // 100x100 widget at (50,50) in 300x300: x + w <= 300 means x <= 200
        let (queue, _receiver) = events::channel();
        let mut w = widget();
        assert!(w.begin_drag(&queue));
        w.update_drag(Vec2::new(300.0, 300.0), &bounds());
        assert_eq!(w.pose().x, 200.0);
        assert_eq!(w.pose().y, 200.0);
    }

    #[test]
    fn test_drag_emits_selected() {
        let (queue, receiver) = events::channel();
        let mut w = widget();
        w.begin_drag(&queue);
        assert_eq!(receiver.try_drain(), vec![WidgetEvent::Selected(w.id)]);
    }

    #[test]
    fn test_drag_deltas_are_cumulative_not_additive() {
        let (queue, _receiver) = events::channel();
        let mut w = widget();
        w.begin_drag(&queue);
        w.update_drag(Vec2::new(10.0, 0.0), &bounds());
        w.update_drag(Vec2::new(15.0, 0.0), &bounds());
        assert_eq!(w.pose().x, 65.0);
    }

    #[test]
    fn test_drag_containment_under_rotation() {
        let (queue, _receiver) = events::channel();
        let mut w = Widget::new(
            Pose::new(100.0, 100.0, 100.0, 100.0).with_rotation(0.5),
            TransformConfig::default(),
        );
        w.begin_drag(&queue);
        w.update_drag(Vec2::new(1000.0, 1000.0), &bounds());

        let corners = w.pose().screen_corners();
        for corner in corners {
            assert!(corner.x >= -1e-9 && corner.x <= 300.0 + 1e-9);
            assert!(corner.y >= -1e-9 && corner.y <= 300.0 + 1e-9);
        }
    }

    #[test]
    fn test_diagonal_resize_preserves_aspect_ratio() {
        let mut w = Widget::new(
            Pose::new(50.0, 50.0, 100.0, 50.0),
            TransformConfig::default(),
        );
        assert!(w.begin_resize(ResizeAxis::Diagonal));
        let outcome = w.update_resize(Vec2::new(40.0, 20.0), &bounds());
        assert_eq!(outcome, ResizeOutcome::Applied);
        let pose = w.pose();
        assert!((pose.width / pose.height - 2.0).abs() < 1e-9);
        assert!(pose.width > 100.0);
    }

    #[test]
    fn test_diagonal_resize_enforces_min_size() {
        let mut w = Widget::new(
            Pose::new(50.0, 50.0, 100.0, 50.0),
            TransformConfig::default(),
        );
        w.begin_resize(ResizeAxis::Diagonal);
        let outcome = w.update_resize(Vec2::new(-500.0, -500.0), &bounds());
        assert_eq!(outcome, ResizeOutcome::Applied);
        let pose = w.pose();
        assert!(pose.width >= 30.0 - 1e-9);
        assert!(pose.height >= 30.0 - 1e-9);
        // The smaller start dimension pins at the floor
        assert!((pose.height - 30.0).abs() < 1e-9);
        assert!((pose.width - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_resize_is_rejected_unchanged() {
        let mut w = widget();
        w.begin_resize(ResizeAxis::Diagonal);
        let before = w.pose();
        let outcome = w.update_resize(Vec2::new(1000.0, 1000.0), &bounds());
        assert_eq!(outcome, ResizeOutcome::Rejected);
        assert_eq!(w.pose(), before);
    }

    #[test]
    fn test_resize_anchor_stays_fixed() {
        let mut w = Widget::new(
            Pose::new(80.0, 80.0, 100.0, 100.0).with_rotation(0.6),
            TransformConfig::default(),
        );
        let anchor_before = w.pose().screen_corners()[0];
        w.begin_resize(ResizeAxis::Diagonal);
        let outcome = w.update_resize(Vec2::new(15.0, 15.0), &bounds());
        assert_eq!(outcome, ResizeOutcome::Applied);
        let anchor_after = w.pose().screen_corners()[0];
        assert!((anchor_after.x - anchor_before.x).abs() <= 1.0);
        assert!((anchor_after.y - anchor_before.y).abs() <= 1.0);
    }

    #[test]
    fn test_width_resize_leaves_height() {
        let mut w = widget();
        w.begin_resize(ResizeAxis::Width);
        let outcome = w.update_resize(Vec2::new(30.0, 500.0), &bounds());
        assert_eq!(outcome, ResizeOutcome::Applied);
        assert_eq!(w.pose().width, 130.0);
        assert_eq!(w.pose().height, 100.0);
    }

    #[test]
    fn test_height_resize_floors_at_min_size() {
        let mut w = widget();
        w.begin_resize(ResizeAxis::Height);
        let outcome = w.update_resize(Vec2::new(0.0, -500.0), &bounds());
        assert_eq!(outcome, ResizeOutcome::Applied);
        assert_eq!(w.pose().height, 30.0);
        assert_eq!(w.pose().width, 100.0);
    }

    #[test]
    fn test_width_resize_follows_local_axis_under_rotation() {
        // At 90°, the widget's local X axis points along screen +Y
        let mut w = Widget::new(
            Pose::new(100.0, 100.0, 100.0, 100.0).with_rotation(FRAC_PI_2),
            TransformConfig::default(),
        );
        w.begin_resize(ResizeAxis::Width);
        let outcome = w.update_resize(Vec2::new(0.0, 40.0), &bounds());
        assert_eq!(outcome, ResizeOutcome::Applied);
        assert!((w.pose().width - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_start_size_is_noop() {
        // Constructed directly; committed poses can never be zero-sized
        let mut w = Widget::new(
            Pose::new(50.0, 50.0, 0.0, 0.0),
            TransformConfig::default(),
        );
        w.begin_resize(ResizeAxis::Diagonal);
        let before = w.pose();
        let outcome = w.update_resize(Vec2::new(50.0, 50.0), &bounds());
        assert_eq!(outcome, ResizeOutcome::Rejected);
        assert_eq!(w.pose(), before);
        assert!(w.pose().width.is_finite());
    }

    #[test]
    fn test_rotation_follows_handle_drag() {
        let mut w = widget();
        assert!(w.begin_rotate());
        // Handle frame is 130x130; start vector (-65, 65). Dragging the
        // handle straight up to (-65, -65) turns the widget a quarter turn
        // clockwise (positive in screen coordinates).
        w.update_rotate(Vec2::new(0.0, -130.0));
        assert!((w.pose().rotation - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_ignores_collapsed_tracking_vector() {
        let mut w = widget();
        assert!(w.begin_rotate());
        // Handle frame is 130x130, start vector (-65, 65); dragging by
        // (65, -65) collapses the tracked vector onto the center, where
        // it has no defined angle. The pose must hold.
        w.update_rotate(Vec2::new(65.0, -65.0));
        assert_eq!(w.pose().rotation, 0.0);

        // The gesture stays live and recovers on the next update
        w.update_rotate(Vec2::new(0.0, -130.0));
        assert!((w.pose().rotation - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_continuous_across_branch_cut() {
        let mut w = widget();
        let mut previous = w.pose().rotation;
        // Many small steps through well over a half turn: each committed
        // change must match the true angular step, with no wraparound jump
        // as the tracked vector crosses the atan2 branch cut.
        for _ in 0..200 {
            w.begin_rotate();
            let GestureState::Rotating { start_vector, .. } = w.gesture else {
                panic!("expected rotating state");
            };
            let moved = geometry::rotate_vec(start_vector, 0.02) - start_vector;
            w.update_rotate(moved);
            let rotation = w.pose().rotation;
            assert!((rotation - previous - 0.02).abs() < 1e-9);
            previous = rotation;
            w.finish_gesture();
        }
        // Accumulated rotation exceeds π without any wraparound jump
        assert!(w.pose().rotation > PI);
    }

    #[test]
    fn test_second_gesture_refused_while_active() {
        let (queue, _receiver) = events::channel();
        let mut w = widget();
        assert!(w.begin_drag(&queue));
        assert!(!w.begin_resize(ResizeAxis::Diagonal));
        assert!(!w.begin_rotate());
        assert!(!w.begin_drag(&queue));
        w.finish_gesture();
        assert!(w.begin_rotate());
    }

    #[test]
    fn test_cancel_keeps_last_committed_pose() {
        let (queue, _receiver) = events::channel();
        let mut w = widget();
        w.begin_drag(&queue);
        w.update_drag(Vec2::new(25.0, 0.0), &bounds());
        w.cancel_gesture();
        assert_eq!(w.pose().x, 75.0);
        assert!(!w.is_active());
    }

    #[test]
    fn test_update_without_begin_is_ignored() {
        let mut w = widget();
        let before = w.pose();
        w.update_drag(Vec2::new(50.0, 50.0), &bounds());
        assert_eq!(w.pose(), before);
        assert_eq!(
            w.update_resize(Vec2::new(10.0, 10.0), &bounds()),
            ResizeOutcome::Rejected
        );
        w.update_rotate(Vec2::new(10.0, 10.0));
        assert_eq!(w.pose(), before);
    }

    #[test]
    fn test_watch_sees_committed_updates() {
        let (queue, _receiver) = events::channel();
        let mut w = widget();
        let watch = w.watch();
        let (_, gen0) = watch.latest();

        w.begin_drag(&queue);
        w.update_drag(Vec2::new(10.0, 0.0), &bounds());

        let (pose, gen1) = watch.latest();
        assert!(gen1 > gen0);
        assert_eq!(pose.x, 60.0);
    }

    #[test]
    fn test_rejected_resize_does_not_publish() {
        let mut w = widget();
        let watch = w.watch();
        let (_, before) = watch.latest();
        w.begin_resize(ResizeAxis::Diagonal);
        let _ = w.update_resize(Vec2::new(1000.0, 1000.0), &bounds());
        let (_, after) = watch.latest();
        assert_eq!(before, after);
    }
}
