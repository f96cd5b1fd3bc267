//! Host-side board model
//!
//! The board owns the widget set, the container bounds, and the selection —
//! widgets themselves never know whether they are selected, they only emit
//! events. The board also applies delete/copy requests drained from the
//! event queue on the control thread.

use kurbo::Vec2;
use tracing::debug;
use uuid::Uuid;

use crate::config::TransformConfig;
use crate::constraint::{self, ContainerBounds, ResizeOutcome};
use crate::events::{self, EventQueue, EventReceiver, WidgetEvent};
use crate::gesture::ResizeAxis;
use crate::pose::Pose;
use crate::widget::Widget;

/// Offset applied to a copied widget so it does not cover the original
const COPY_OFFSET: f64 = 20.0;

/// A container full of widgets plus the selection state
#[derive(Debug)]
pub struct Board {
    container: ContainerBounds,
    config: TransformConfig,
    widgets: Vec<Widget>,
    selected: Option<Uuid>,
    queue: EventQueue,
    receiver: EventReceiver,
}

impl Board {
    pub fn new(container: ContainerBounds, config: TransformConfig) -> Self {
        let (queue, receiver) = events::channel();
        Self {
            container,
            config,
            widgets: Vec::new(),
            selected: None,
            queue,
            receiver,
        }
    }

    pub fn container(&self) -> ContainerBounds {
        self.container
    }

    /// Container bounds may change between gestures, never during one
    pub fn set_container(&mut self, container: ContainerBounds) {
        self.container = container;
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected == Some(id)
    }

    /// Add a widget with the given pose, returning its id
    pub fn spawn(&mut self, pose: Pose) -> Uuid {
        let widget = Widget::new(pose, self.config);
        let id = widget.id;
        self.widgets.push(widget);
        id
    }

    /// Shared queue for wiring external gesture sources
    pub fn event_queue(&self) -> EventQueue {
        self.queue.clone()
    }

    /// Drain pending widget events and apply them to board state
    ///
    /// Must run on the host control thread. Returns the applied events so
    /// the host can react (e.g. repaint).
    pub fn pump_events(&mut self) -> Vec<WidgetEvent> {
        let drained = self.receiver.try_drain();
        for event in &drained {
            match *event {
                WidgetEvent::Selected(id) => self.selected = Some(id),
                WidgetEvent::Deselected => self.selected = None,
                WidgetEvent::DeleteRequested(id) => self.delete(id),
                WidgetEvent::CopyRequested(id) => {
                    self.copy(id);
                }
            }
        }
        drained
    }

    /// Tap on a widget body
    pub fn tap_widget(&self, id: Uuid) {
        if let Some(widget) = self.widgets.iter().find(|w| w.id == id) {
            widget.tap(&self.queue);
        }
    }

    /// Tap on the background region while a widget is selected
    pub fn tap_background(&self) {
        if self.selected.is_some() {
            self.queue.emit(WidgetEvent::Deselected);
        }
    }

    /// Tap on the delete handle of the selected widget
    pub fn request_delete(&self, id: Uuid) {
        if self.is_selected(id) {
            self.queue.emit(WidgetEvent::DeleteRequested(id));
        }
    }

    /// Tap on the copy handle of the selected widget
    pub fn request_copy(&self, id: Uuid) {
        if self.is_selected(id) {
            self.queue.emit(WidgetEvent::CopyRequested(id));
        }
    }

    pub fn begin_drag(&mut self, id: Uuid) -> bool {
        let queue = self.queue.clone();
        match self.widget_mut(id) {
            Some(widget) => widget.begin_drag(&queue),
            None => false,
        }
    }

    pub fn update_drag(&mut self, id: Uuid, translation: Vec2) {
        let container = self.container;
        if let Some(widget) = self.widget_mut(id) {
            widget.update_drag(translation, &container);
        }
    }

    /// Start a resize; the handles are only reachable on the selected widget
    pub fn begin_resize(&mut self, id: Uuid, axis: ResizeAxis) -> bool {
        if !self.is_selected(id) {
            debug!(widget = %id, "resize refused, widget not selected");
            return false;
        }
        match self.widget_mut(id) {
            Some(widget) => widget.begin_resize(axis),
            None => false,
        }
    }

    pub fn update_resize(&mut self, id: Uuid, translation: Vec2) -> ResizeOutcome {
        let container = self.container;
        match self.widget_mut(id) {
            Some(widget) => widget.update_resize(translation, &container),
            None => ResizeOutcome::Rejected,
        }
    }

    /// Start a rotation; the handle is only reachable on the selected widget
    pub fn begin_rotate(&mut self, id: Uuid) -> bool {
        if !self.is_selected(id) {
            debug!(widget = %id, "rotate refused, widget not selected");
            return false;
        }
        match self.widget_mut(id) {
            Some(widget) => widget.begin_rotate(),
            None => false,
        }
    }

    pub fn update_rotate(&mut self, id: Uuid, translation: Vec2) {
        if let Some(widget) = self.widget_mut(id) {
            widget.update_rotate(translation);
        }
    }

    pub fn finish_gesture(&mut self, id: Uuid) {
        if let Some(widget) = self.widget_mut(id) {
            widget.finish_gesture();
        }
    }

    pub fn cancel_gesture(&mut self, id: Uuid) {
        if let Some(widget) = self.widget_mut(id) {
            widget.cancel_gesture();
        }
    }

    fn widget_mut(&mut self, id: Uuid) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    fn delete(&mut self, id: Uuid) {
        self.widgets.retain(|w| w.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Duplicate a widget with a small offset, clamped into the container
    fn copy(&mut self, id: Uuid) -> Option<Uuid> {
        let source = self.widgets.iter().find(|w| w.id == id)?.pose();
        let clamped = constraint::clamp_to_container(
            source.width,
            source.height,
            source.rotation,
            source.x + COPY_OFFSET,
            source.y + COPY_OFFSET,
            &self.container,
        );
        let pose = Pose {
            x: clamped.x,
            y: clamped.y,
            ..source
        };
        Some(self.spawn(pose))
    }
}
