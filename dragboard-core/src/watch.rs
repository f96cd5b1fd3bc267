//! Reactive pose observation
//!
//! A renderer must see the pose at every committed gesture update without
//! polling the widget. `PoseWatch` is a single-writer shared cell with a
//! generation counter: the owning widget publishes, any number of readers
//! take the latest value or block until it changes.

use std::sync::{Arc, Condvar, Mutex, PoisonError};

use crate::pose::Pose;

#[derive(Debug)]
struct Shared {
    state: Mutex<(Pose, u64)>,
    changed: Condvar,
}

/// Shared handle to a widget's latest committed pose
#[derive(Debug, Clone)]
pub struct PoseWatch {
    shared: Arc<Shared>,
}

impl PoseWatch {
    /// Create a watch seeded with an initial pose (generation 0)
    pub fn new(pose: Pose) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new((pose, 0)),
                changed: Condvar::new(),
            }),
        }
    }

    /// Publish a new pose, bumping the generation and waking waiters
    ///
    /// Called only by the owning widget after a committed update.
    pub fn publish(&self, pose: Pose) {
        let mut state = self
            .shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.0 = pose;
        state.1 += 1;
        self.shared.changed.notify_all();
    }

    /// Latest pose and its generation, without blocking
    pub fn latest(&self) -> (Pose, u64) {
        *self
            .shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until a pose newer than `seen` is published, then return it
    pub fn wait_newer(&self, seen: u64) -> (Pose, u64) {
        let mut state = self
            .shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while state.1 <= seen {
            state = self
                .shared
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *state
    }
}
