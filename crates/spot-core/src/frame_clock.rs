use crate::runtime::RuntimeHandle;
use crate::{FrameCallbackId, NANOS_PER_MILLI};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Runs `callback` once on the next drained frame.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let runtime = self.runtime.clone();
        match runtime.register_frame_callback(callback) {
            Some(id) => FrameCallbackRegistration::new(runtime, id),
            None => FrameCallbackRegistration::inactive(runtime),
        }
    }

    /// Runs `callback` once `delay_millis` have passed on this clock.
    ///
    /// The delay is measured from the first frame drained after this call,
    /// which is the same origin tween animations use, so a deferred call
    /// scheduled alongside an animation of equal duration fires on the frame
    /// the animation lands.
    pub fn with_delay_millis(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> DeferredCall {
        let state = Rc::new(RefCell::new(DeferredState {
            clock: self.clone(),
            delay_nanos: delay_millis.saturating_mul(NANOS_PER_MILLI),
            start_nanos: None,
            callback: Some(Box::new(callback)),
            registration: None,
        }));
        DeferredCall::arm(&state);
        DeferredCall { state }
    }
}

pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

struct DeferredState {
    clock: FrameClock,
    delay_nanos: u64,
    start_nanos: Option<u64>,
    callback: Option<Box<dyn FnOnce() + 'static>>,
    registration: Option<FrameCallbackRegistration>,
}

/// Handle to a callback waiting on the frame clock.
///
/// The handle owns the pending call: dropping or cancelling it guarantees the
/// callback never runs.
pub struct DeferredCall {
    state: Rc<RefCell<DeferredState>>,
}

impl DeferredCall {
    fn arm(state: &Rc<RefCell<DeferredState>>) {
        let clock = state.borrow().clock.clone();
        let weak = Rc::downgrade(state);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::debug!("deferred call scheduled on a dropped runtime; it will never fire");
        }
        state.borrow_mut().registration = Some(registration);
    }

    fn on_frame(state: &Rc<RefCell<DeferredState>>, frame_time_nanos: u64) {
        let ready = {
            let mut inner = state.borrow_mut();
            // The registration already fired; forget it so re-arming starts fresh.
            if let Some(mut registration) = inner.registration.take() {
                registration.id = None;
            }
            let start = *inner.start_nanos.get_or_insert(frame_time_nanos);
            if frame_time_nanos.saturating_sub(start) >= inner.delay_nanos {
                inner.callback.take()
            } else {
                None
            }
        };

        match ready {
            Some(callback) => callback(),
            None => {
                if state.borrow().callback.is_some() {
                    Self::arm(state);
                }
            }
        }
    }

    /// Whether the callback is still waiting to run.
    pub fn is_pending(&self) -> bool {
        self.state.borrow().callback.is_some()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for DeferredCall {
    fn drop(&mut self) {
        let registration = {
            let mut inner = self.state.borrow_mut();
            inner.callback = None;
            inner.registration.take()
        };
        drop(registration);
    }
}

#[cfg(test)]
#[path = "tests/frame_clock_tests.rs"]
mod tests;
