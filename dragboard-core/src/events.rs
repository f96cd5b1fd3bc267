//! Widget-to-host event dispatch
//!
//! Gesture handling may run on a different thread than the host's control
//! loop, so side effects never call into the host directly. Gesture-side
//! code enqueues a [`WidgetEvent`]; the host drains the queue on its own
//! thread. A dropped receiver means the host does not handle events, which
//! is "feature disabled", not an error.

use std::sync::mpsc;

use uuid::Uuid;

/// Events the engine raises for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Widget was tapped or a drag on it started
    Selected(Uuid),
    /// The background outside the selected widget was tapped
    Deselected,
    /// The delete handle was tapped
    DeleteRequested(Uuid),
    /// The copy handle was tapped
    CopyRequested(Uuid),
}

/// Sending side of the event hand-off; cheap to clone into gesture code
#[derive(Debug, Clone)]
pub struct EventQueue {
    tx: mpsc::Sender<WidgetEvent>,
}

/// Receiving side; owned by the host control thread
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::Receiver<WidgetEvent>,
}

/// Create a connected queue/receiver pair
pub fn channel() -> (EventQueue, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventQueue { tx }, EventReceiver { rx })
}

impl EventQueue {
    /// Enqueue an event for the host; silently dropped if the host is gone
    pub fn emit(&self, event: WidgetEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!(?event, "event dropped, no host receiver");
        }
    }
}

impl EventReceiver {
    /// Drain all pending events without blocking
    pub fn try_drain(&self) -> Vec<WidgetEvent> {
        self.rx.try_iter().collect()
    }
}
