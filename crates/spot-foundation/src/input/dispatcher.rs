//! Pointer event queue between the platform and gesture sources.
//!
//! Platform integrations push raw events as they arrive; the owning screen
//! drains them once per host tick through a [`GestureSource`] so that gesture
//! handling always runs on the UI thread in arrival order.

use super::types::PointerEvent;
use crate::gestures::{GestureEvent, GestureSource};

#[derive(Default)]
pub struct PointerDispatcher {
    queue: Vec<PointerEvent>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Runs queued events through `source` and hands every resulting gesture
    /// event to `handler`, in order.
    pub fn drain_gestures<S, F>(&mut self, source: &mut S, mut handler: F)
    where
        S: GestureSource + ?Sized,
        F: FnMut(GestureEvent),
    {
        for event in self.queue.drain(..) {
            for gesture in source.on_pointer_event(&event) {
                handler(gesture);
            }
        }
    }
}
