use super::*;
use crate::progress::SwipeDirection;
use spot_core::Runtime;
use std::cell::{Cell, RefCell};

const FRAME_NANOS: u64 = 16_666_667;

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<FeedbackCue>>>);

impl SwipeFeedback for Recorder {
    fn on_gesture_start(&mut self) {
        self.0.borrow_mut().push(FeedbackCue::GestureStart);
    }

    fn on_threshold_crossed(&mut self, direction: SwipeDirection) {
        self.0.borrow_mut().push(FeedbackCue::ThresholdCrossed(direction));
    }

    fn on_commit_skip(&mut self) {
        self.0.borrow_mut().push(FeedbackCue::CommitSkip);
    }

    fn on_commit_select(&mut self) {
        self.0.borrow_mut().push(FeedbackCue::CommitSelect);
    }
}

struct Harness {
    runtime: Runtime,
    controller: SwipeController<u32>,
    cues: Recorder,
    skips: Rc<Cell<u32>>,
    selects: Rc<RefCell<Vec<u32>>>,
    now: u64,
}

impl Harness {
    /// 400 px wide screen with default config, so `T = 100`.
    fn new() -> Self {
        let runtime = Runtime::default();
        let cues = Recorder::default();
        let controller = SwipeController::new(SwipeConfig::default(), 400.0, runtime.frame_clock())
            .expect("valid config")
            .with_feedback(cues.clone());
        let skips = Rc::new(Cell::new(0));
        let selects = Rc::new(RefCell::new(Vec::new()));
        {
            let skips = Rc::clone(&skips);
            controller.set_on_skip(move || skips.set(skips.get() + 1));
        }
        {
            let selects = Rc::clone(&selects);
            controller.set_on_select(move |id| selects.borrow_mut().push(id));
        }
        controller.bind(7);
        Self {
            runtime,
            controller,
            cues,
            skips,
            selects,
            now: 0,
        }
    }

    fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.now += FRAME_NANOS;
            self.runtime.drain_frame_callbacks(self.now);
        }
    }

    fn pump_until_idle(&mut self) {
        for _ in 0..600 {
            if self.controller.phase().is_idle() {
                return;
            }
            self.frames(1);
        }
        panic!("controller still {:?} after 600 frames", self.controller.phase());
    }

    fn drag(&self, xs: &[f32]) {
        assert!(self.controller.begin());
        for &x in xs {
            assert!(self.controller.update(GestureSample::new(x, 0.0)));
        }
    }

    fn release_at(&self, x: f32) {
        assert!(self.controller.end(GestureSample::new(x, 0.0)));
    }

    fn cues(&self) -> Vec<FeedbackCue> {
        self.cues.0.borrow().clone()
    }

    fn threshold_cues(&self) -> usize {
        self.cues()
            .iter()
            .filter(|cue| matches!(cue, FeedbackCue::ThresholdCrossed(_)))
            .count()
    }
}

#[test]
fn short_drag_left_springs_back_without_callback() {
    let mut h = Harness::new();
    h.drag(&[-10.0, -25.0, -40.0]);

    let state = h.controller.state();
    assert!((state.progress - 0.4).abs() < 1e-6);
    assert_eq!(state.direction, SwipeDirection::Left);
    assert!(!state.threshold_crossed);
    assert_eq!(state.phase, SwipePhase::Dragging);

    h.release_at(-40.0);
    assert_eq!(h.controller.phase(), SwipePhase::Returning);

    h.pump_until_idle();
    assert_eq!(h.controller.transform(), CardTransform::REST);
    assert_eq!(h.controller.state().progress, 0.0);
    assert_eq!(h.skips.get(), 0);
    assert!(h.selects.borrow().is_empty());
    assert_eq!(h.cues(), vec![FeedbackCue::GestureStart]);
}

#[test]
fn drag_past_threshold_selects_once_after_exit_duration() {
    let mut h = Harness::new();
    h.drag(&[60.0, 150.0]);

    let state = h.controller.state();
    assert_eq!(state.progress, 1.0);
    assert_eq!(state.direction, SwipeDirection::Right);
    assert!(state.threshold_crossed);

    h.controller.update(GestureSample::new(90.0, 0.0));
    h.controller.update(GestureSample::new(150.0, 0.0));
    assert_eq!(h.threshold_cues(), 1);

    h.release_at(150.0);
    assert_eq!(h.controller.phase(), SwipePhase::CommittingRight);
    assert!(h.controller.has_pending_outcome());
    assert_eq!(
        h.cues(),
        vec![
            FeedbackCue::GestureStart,
            FeedbackCue::ThresholdCrossed(SwipeDirection::Right),
            FeedbackCue::CommitSelect,
        ]
    );

    // The delay starts on the first frame; 300 ms is reached on frame 19.
    h.frames(18);
    assert!(h.selects.borrow().is_empty());
    h.frames(1);
    assert_eq!(*h.selects.borrow(), vec![7]);
    assert_eq!(h.controller.phase(), SwipePhase::Idle);
    assert!(!h.controller.has_pending_outcome());

    h.frames(60);
    assert_eq!(*h.selects.borrow(), vec![7]);
    assert_eq!(h.controller.card(), Some(7));
    assert_eq!(h.controller.transform(), CardTransform::REST);
}

#[test]
fn skip_leaves_card_off_screen_and_unbound() {
    let mut h = Harness::new();
    h.drag(&[-120.0]);
    h.release_at(-120.0);
    assert_eq!(h.controller.phase(), SwipePhase::CommittingLeft);

    h.frames(19);
    assert_eq!(h.skips.get(), 1);
    assert_eq!(h.controller.card(), None);

    let transform = h.controller.transform();
    assert_eq!(transform.translation_x, -600.0);
    assert_eq!(transform.alpha, 0.0);
    assert!(!h.controller.begin());
}

#[test]
fn release_exactly_at_threshold_returns() {
    let mut h = Harness::new();
    h.drag(&[100.0]);
    assert!(h.controller.state().threshold_crossed);

    h.release_at(100.0);
    assert_eq!(h.controller.phase(), SwipePhase::Returning);
    h.pump_until_idle();
    assert!(h.selects.borrow().is_empty());
    assert!(!h.cues().contains(&FeedbackCue::CommitSelect));
}

#[test]
fn overshoot_then_return_before_release_cancels() {
    let mut h = Harness::new();
    h.drag(&[-150.0, -30.0]);
    h.release_at(-30.0);

    assert_eq!(h.controller.phase(), SwipePhase::Returning);
    h.pump_until_idle();
    assert_eq!(h.skips.get(), 0);
    assert_eq!(h.threshold_cues(), 1);
}

#[test]
fn latch_clears_on_the_next_gesture() {
    let mut h = Harness::new();
    h.drag(&[130.0, 20.0]);
    h.release_at(20.0);
    h.pump_until_idle();
    assert!(!h.controller.state().threshold_crossed);

    h.drag(&[-130.0]);
    assert_eq!(h.threshold_cues(), 2);
}

#[test]
fn new_gestures_are_refused_while_animating() {
    let mut h = Harness::new();
    h.drag(&[150.0]);
    h.release_at(150.0);

    assert!(!h.controller.begin());
    assert!(!h.controller.handle_gesture(GestureEvent::Update(GestureSample::new(
        -200.0, 0.0
    ))));
    assert!(!h.controller.handle_gesture(GestureEvent::End(GestureSample::new(-200.0, 0.0))));
    assert_eq!(h.controller.phase(), SwipePhase::CommittingRight);

    h.frames(19);
    assert_eq!(*h.selects.borrow(), vec![7]);
    assert_eq!(h.skips.get(), 0);
}

#[test]
fn updates_outside_a_drag_are_ignored() {
    let h = Harness::new();
    assert!(!h.controller.update(GestureSample::new(50.0, 0.0)));
    assert!(!h.controller.cancel());
    assert_eq!(h.controller.transform(), CardTransform::REST);
}

#[test]
fn gestures_need_a_bound_card() {
    let runtime = Runtime::default();
    let controller: SwipeController<u32> =
        SwipeController::new(SwipeConfig::default(), 400.0, runtime.frame_clock())
            .expect("valid config");
    assert!(!controller.begin());
    assert_eq!(controller.phase(), SwipePhase::Idle);
}

#[test]
fn host_cancel_springs_back_even_past_threshold() {
    let mut h = Harness::new();
    h.drag(&[200.0]);
    assert!(h.controller.handle_gesture(GestureEvent::Cancel));
    assert_eq!(h.controller.phase(), SwipePhase::Returning);

    h.pump_until_idle();
    assert!(h.selects.borrow().is_empty());
    assert!(!h.cues().contains(&FeedbackCue::CommitSelect));
}

#[test]
fn rebinding_cancels_the_pending_outcome() {
    let mut h = Harness::new();
    h.drag(&[150.0]);
    h.release_at(150.0);
    h.frames(5);

    h.controller.bind(8);
    assert!(!h.controller.has_pending_outcome());
    assert_eq!(h.controller.phase(), SwipePhase::Idle);
    assert_eq!(h.controller.transform(), CardTransform::REST);

    h.frames(40);
    assert!(h.selects.borrow().is_empty());

    h.drag(&[-150.0]);
    h.release_at(-150.0);
    h.frames(19);
    assert_eq!(h.skips.get(), 1);
}

#[test]
fn dispose_silences_everything() {
    let mut h = Harness::new();
    h.drag(&[-150.0]);
    h.release_at(-150.0);
    h.controller.dispose();

    h.frames(40);
    assert_eq!(h.skips.get(), 0);
    assert_eq!(h.controller.card(), None);
}

#[test]
fn dropping_the_controller_cancels_the_outcome() {
    let runtime = Runtime::default();
    let fired = Rc::new(Cell::new(false));
    {
        let controller = SwipeController::new(SwipeConfig::default(), 400.0, runtime.frame_clock())
            .expect("valid config");
        let fired = Rc::clone(&fired);
        controller.set_on_select(move |_: u32| fired.set(true));
        controller.bind(1);
        controller.begin();
        controller.end(GestureSample::new(180.0, 0.0));
    }

    let mut now = 0;
    for _ in 0..40 {
        now += FRAME_NANOS;
        runtime.drain_frame_callbacks(now);
    }
    assert!(!fired.get());
}

#[test]
fn skip_handler_may_bind_the_next_card() {
    let mut h = Harness::new();
    let weak = h.controller.downgrade();
    let next = Rc::new(Cell::new(8u32));
    {
        let next = Rc::clone(&next);
        h.controller.set_on_skip(move || {
            if let Some(controller) = weak.upgrade() {
                controller.bind(next.get());
                next.set(next.get() + 1);
            }
        });
    }

    h.drag(&[-150.0]);
    h.release_at(-150.0);
    h.frames(19);
    assert_eq!(h.controller.card(), Some(8));
    assert_eq!(h.controller.transform(), CardTransform::REST);

    h.drag(&[-150.0]);
    h.release_at(-150.0);
    h.frames(19);
    assert_eq!(h.controller.card(), Some(9));
}

#[test]
fn zero_threshold_fraction_is_rejected() {
    let runtime = Runtime::default();
    let result = SwipeController::<u32>::new(
        SwipeConfig::default().with_threshold_fraction(0.0),
        400.0,
        runtime.frame_clock(),
    );
    assert!(matches!(
        result,
        Err(SwipeError::InvalidConfiguration { .. })
    ));
}

#[test]
fn transform_tilts_with_the_drag() {
    let h = Harness::new();
    h.drag(&[50.0]);
    let transform = h.controller.transform();
    assert_eq!(transform.rotation_degrees, 6.0);
    assert_eq!(transform.overlay, SwipeDirection::Right);
    assert_eq!(transform.overlay_alpha, 0.5);
}

#[test]
fn non_finite_release_springs_back_to_idle() {
    let mut h = Harness::new();
    for x in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        h.drag(&[-40.0, x]);
        assert_eq!(h.controller.state().progress, 0.0);
        h.release_at(x);
        assert_eq!(h.controller.phase(), SwipePhase::Returning);

        h.pump_until_idle();
        assert_eq!(h.controller.transform(), CardTransform::REST);
    }
    assert!(h.controller.begin());
    assert_eq!(h.skips.get(), 0);
    assert!(h.selects.borrow().is_empty());
}

#[test]
fn non_finite_vertical_drift_is_ignored() {
    let mut h = Harness::new();
    assert!(h.controller.begin());
    assert!(h.controller.end(GestureSample::new(-150.0, f32::NAN)));
    assert_eq!(h.controller.transform().translation_y, 0.0);

    h.frames(19);
    assert_eq!(h.skips.get(), 1);
}

/// Disposes its controller from inside a commit cue.
struct DisposeOnCommit(WeakSwipeController<u32>);

impl SwipeFeedback for DisposeOnCommit {
    fn on_commit_skip(&mut self) {
        if let Some(controller) = self.0.upgrade() {
            controller.dispose();
        }
    }
}

#[test]
fn feedback_sink_may_dispose_the_controller() {
    let mut h = Harness::new();
    h.controller.add_feedback(DisposeOnCommit(h.controller.downgrade()));

    h.drag(&[-150.0]);
    h.release_at(-150.0);
    assert_eq!(h.controller.card(), None);
    assert!(!h.controller.has_pending_outcome());

    h.frames(40);
    assert_eq!(h.skips.get(), 0);

    h.controller.bind(8);
    h.drag(&[-150.0]);
    h.release_at(-150.0);
    h.frames(19);
    // Disposal dropped every sink, including the recorder.
    assert_eq!(
        h.cues(),
        vec![
            FeedbackCue::GestureStart,
            FeedbackCue::ThresholdCrossed(SwipeDirection::Left),
            FeedbackCue::CommitSkip,
        ]
    );
    assert_eq!(h.skips.get(), 0);
}

/// Registers one more recorder the first time a gesture starts.
struct AddOnStart {
    controller: WeakSwipeController<u32>,
    late: Option<Recorder>,
}

impl SwipeFeedback for AddOnStart {
    fn on_gesture_start(&mut self) {
        if let (Some(controller), Some(late)) = (self.controller.upgrade(), self.late.take()) {
            controller.add_feedback(late);
        }
    }
}

#[test]
fn feedback_sink_may_add_another_sink() {
    let mut h = Harness::new();
    let late = Recorder::default();
    h.controller.add_feedback(AddOnStart {
        controller: h.controller.downgrade(),
        late: Some(late.clone()),
    });

    h.drag(&[-40.0]);
    assert!(late.0.borrow().is_empty());
    h.release_at(-40.0);
    h.pump_until_idle();

    h.drag(&[-40.0]);
    assert_eq!(*late.0.borrow(), vec![FeedbackCue::GestureStart]);
    assert_eq!(h.cues(), vec![FeedbackCue::GestureStart; 2]);
}

#[test]
fn skip_handler_may_dispose_for_good() {
    let mut h = Harness::new();
    let weak = h.controller.downgrade();
    let fired = Rc::new(Cell::new(0u32));
    {
        let fired = Rc::clone(&fired);
        h.controller.set_on_skip(move || {
            fired.set(fired.get() + 1);
            if let Some(controller) = weak.upgrade() {
                controller.dispose();
            }
        });
    }

    h.drag(&[-150.0]);
    h.release_at(-150.0);
    h.frames(19);
    assert_eq!(fired.get(), 1);

    h.controller.bind(8);
    h.drag(&[-150.0]);
    h.release_at(-150.0);
    h.frames(19);
    assert_eq!(fired.get(), 1);
    assert_eq!(h.controller.card(), None);
}

#[test]
fn select_handler_may_dispose_for_good() {
    let mut h = Harness::new();
    let weak = h.controller.downgrade();
    let fired = Rc::new(Cell::new(0u32));
    {
        let fired = Rc::clone(&fired);
        h.controller.set_on_select(move |_| {
            fired.set(fired.get() + 1);
            if let Some(controller) = weak.upgrade() {
                controller.dispose();
            }
        });
    }

    h.drag(&[150.0]);
    h.release_at(150.0);
    h.frames(19);
    assert_eq!(fired.get(), 1);

    h.controller.bind(8);
    h.drag(&[150.0]);
    h.release_at(150.0);
    h.frames(19);
    assert_eq!(fired.get(), 1);
}
