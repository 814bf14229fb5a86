use std::cell::RefCell;
use std::rc::Rc;

use spot_core::{Runtime, RuntimeHandle, NANOS_PER_MILLI};
use spot_foundation::{DragGestureSampler, GestureSource, PointerDispatcher, PointerEvent};
use spot_swipe::{SwipeConfig, SwipeController, SwipeError, SwipePhase};

use crate::recording::{RecordedOutcome, RecordingFeedback};

/// One 60 Hz frame.
pub const FRAME_NANOS: u64 = 16_666_667;

const MAX_IDLE_FRAMES: usize = 600;

/// Headless harness for exercising a swipe controller in tests.
///
/// `SwipeTestRule` owns a manual runtime whose frames only advance when the
/// test asks, a controller bound to card `1`, and the pointer pipeline in
/// front of it. Pointer helpers go through [`PointerDispatcher`] and
/// [`DragGestureSampler`] exactly like a host would, so touch slop applies.
pub struct SwipeTestRule {
    runtime: Runtime,
    controller: SwipeController<u64>,
    dispatcher: PointerDispatcher,
    sampler: DragGestureSampler,
    feedback: RecordingFeedback,
    outcomes: Rc<RefCell<Vec<RecordedOutcome>>>,
    frame_time_nanos: u64,
}

impl SwipeTestRule {
    /// Default configuration on a screen `screen_width` pixels wide.
    pub fn new(screen_width: f32) -> Result<Self, SwipeError> {
        Self::with_config(SwipeConfig::default(), screen_width)
    }

    pub fn with_config(config: SwipeConfig, screen_width: f32) -> Result<Self, SwipeError> {
        let runtime = Runtime::default();
        let feedback = RecordingFeedback::new();
        let controller = SwipeController::new(config, screen_width, runtime.frame_clock())?
            .with_feedback(feedback.clone());

        let outcomes = Rc::new(RefCell::new(Vec::new()));
        {
            let outcomes = Rc::clone(&outcomes);
            controller.set_on_skip(move || outcomes.borrow_mut().push(RecordedOutcome::Skip));
        }
        {
            let outcomes = Rc::clone(&outcomes);
            controller
                .set_on_select(move |id| outcomes.borrow_mut().push(RecordedOutcome::Select(id)));
        }
        controller.bind(1);

        Ok(Self {
            runtime,
            controller,
            dispatcher: PointerDispatcher::new(),
            sampler: DragGestureSampler::new(),
            feedback,
            outcomes,
            frame_time_nanos: 0,
        })
    }

    pub fn controller(&self) -> &SwipeController<u64> {
        &self.controller
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn feedback(&self) -> &RecordingFeedback {
        &self.feedback
    }

    pub fn outcomes(&self) -> Vec<RecordedOutcome> {
        self.outcomes.borrow().clone()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    pub fn phase(&self) -> SwipePhase {
        self.controller.phase()
    }

    pub fn bind(&self, card: u64) {
        self.controller.bind(card);
    }

    /// Queue a raw pointer event and run the queue through the sampler.
    pub fn send(&mut self, event: PointerEvent) {
        self.dispatcher.push(event);
        let controller = &self.controller;
        self.dispatcher.drain_gestures(&mut self.sampler, |gesture| {
            controller.handle_gesture(gesture);
        });
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.send(PointerEvent::down(x, y));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.send(PointerEvent::moved(x, y));
    }

    pub fn lift(&mut self, x: f32, y: f32) {
        self.send(PointerEvent::up(x, y));
    }

    pub fn cancel_pointer(&mut self) {
        self.send(PointerEvent::cancel(0.0, 0.0));
    }

    /// Press at the origin and move horizontally to `translation_x` in a few
    /// steps, leaving the pointer down.
    pub fn drag_to(&mut self, translation_x: f32) {
        if !self.sampler.is_dragging() {
            self.press(0.0, 0.0);
        }
        const STEPS: usize = 4;
        for step in 1..=STEPS {
            let x = translation_x * step as f32 / STEPS as f32;
            self.move_to(x, 0.0);
        }
    }

    /// Continue an active drag straight to `translation_x`.
    pub fn move_x(&mut self, translation_x: f32) {
        self.move_to(translation_x, 0.0);
    }

    pub fn release(&mut self, translation_x: f32) {
        self.lift(translation_x, 0.0);
    }

    /// Full drag and release at `translation_x`.
    pub fn swipe(&mut self, translation_x: f32) {
        self.drag_to(translation_x);
        self.release(translation_x);
    }

    /// Drain one frame callback batch one frame after the previous one.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS;
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Advance whole frames until at least `millis` have passed.
    pub fn advance_millis(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis * NANOS_PER_MILLI;
        while self.frame_time_nanos < target {
            self.advance_frame();
        }
    }

    /// Run frames until the controller is idle and no frame work is left.
    /// Returns the number of frames drained.
    pub fn pump_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while !self.controller.phase().is_idle() || self.runtime.has_frame_callbacks() {
            if frames >= MAX_IDLE_FRAMES {
                panic!(
                    "pump_until_idle: still {:?} after {MAX_IDLE_FRAMES} frames",
                    self.controller.phase()
                );
            }
            self.advance_frame();
            frames += 1;
        }
        log::trace!("pump_until_idle drained {frames} frame(s)");
        frames
    }
}
