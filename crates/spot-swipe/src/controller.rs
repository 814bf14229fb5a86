//! The swipe interaction controller.
//!
//! One controller drives one visible card. It consumes gesture events,
//! keeps the card's animators in step with the finger, and resolves each
//! release into a skip, a select or a spring back to rest.
//!
//! All mutable state lives behind `RefCell`s in a shared block. Borrows are
//! always released before feedback sinks, owner callbacks or animation
//! drivers get control back, so any of them may call into the controller
//! again (an `on_skip` handler binding the next card, for example).

use std::cell::{Cell, RefCell};
use std::mem;
use std::fmt;
use std::rc::{Rc, Weak};

use spot_animation::{Animatable, AnimationDriver, AnimationType, EndListener};
use spot_core::{DeferredCall, FrameClock, RuntimeHandle};
use spot_foundation::{GestureEvent, GestureSample};

use crate::config::{SwipeConfig, SwipeThreshold};
use crate::error::SwipeError;
use crate::feedback::{FeedbackCue, FeedbackDispatcher, SwipeFeedback};
use crate::progress::compute_progress;
use crate::resolver::resolve_release;
use crate::state::{Outcome, SwipePhase, SwipeState};
use crate::threshold::ThresholdLatch;
use crate::visual::CardTransform;

/// The three animatable channels of a card.
pub struct CardAnimators {
    pub x: Box<dyn AnimationDriver>,
    pub y: Box<dyn AnimationDriver>,
    pub alpha: Box<dyn AnimationDriver>,
}

impl CardAnimators {
    pub fn new(
        x: impl AnimationDriver + 'static,
        y: impl AnimationDriver + 'static,
        alpha: impl AnimationDriver + 'static,
    ) -> Self {
        Self {
            x: Box::new(x),
            y: Box::new(y),
            alpha: Box::new(alpha),
        }
    }

    /// Frame-clock animatables on `runtime`, starting at rest.
    pub fn on_runtime(runtime: &RuntimeHandle) -> Self {
        Self::new(
            Animatable::new(0.0f32, runtime.clone()),
            Animatable::new(0.0f32, runtime.clone()),
            Animatable::new(1.0f32, runtime.clone()),
        )
    }

    fn snap_to_rest(&mut self) {
        self.x.snap_to(0.0);
        self.y.snap_to(0.0);
        self.alpha.snap_to(1.0);
    }
}

impl fmt::Debug for CardAnimators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardAnimators")
            .field("x", &self.x.value())
            .field("y", &self.y.value())
            .field("alpha", &self.alpha.value())
            .finish()
    }
}

/// Lifecycle bookkeeping for the bound card.
struct Core<Id> {
    card: Option<Id>,
    /// Bumped on every bind/unbind so stale callbacks can tell they are stale.
    generation: u64,
    phase: SwipePhase,
    latch: ThresholdLatch,
    pending_outcome: Option<DeferredCall>,
    returning_axes: u8,
}

type SkipCallback = Box<dyn FnMut()>;
type SelectCallback<Id> = Box<dyn FnMut(Id)>;

struct Shared<Id: 'static> {
    config: SwipeConfig,
    screen_width: f32,
    threshold: SwipeThreshold,
    clock: FrameClock,
    core: RefCell<Core<Id>>,
    animators: RefCell<CardAnimators>,
    feedback: RefCell<FeedbackDispatcher>,
    on_skip: RefCell<Option<SkipCallback>>,
    on_select: RefCell<Option<SelectCallback<Id>>>,
    /// Bumped by `dispose` so callbacks and sinks taken out for a call are
    /// not put back afterwards.
    disposals: Cell<u64>,
}

/// Drives one card through drag, commit and spring-back.
///
/// Clones share the same controller.
pub struct SwipeController<Id: Clone + fmt::Debug + 'static> {
    shared: Rc<Shared<Id>>,
}

impl<Id: Clone + fmt::Debug + 'static> Clone for SwipeController<Id> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

/// Non-owning handle, for closures that must not keep the controller alive.
pub struct WeakSwipeController<Id: Clone + fmt::Debug + 'static> {
    shared: Weak<Shared<Id>>,
}

impl<Id: Clone + fmt::Debug + 'static> Clone for WeakSwipeController<Id> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<Id: Clone + fmt::Debug + 'static> WeakSwipeController<Id> {
    pub fn upgrade(&self) -> Option<SwipeController<Id>> {
        self.shared.upgrade().map(|shared| SwipeController { shared })
    }
}

impl<Id: Clone + fmt::Debug + 'static> SwipeController<Id> {
    /// Builds a controller animating on `clock`'s runtime.
    ///
    /// Fails with [`SwipeError::InvalidConfiguration`] when the threshold
    /// distance `screen_width * swipe_threshold_fraction` is not positive.
    pub fn new(config: SwipeConfig, screen_width: f32, clock: FrameClock) -> Result<Self, SwipeError> {
        let animators = CardAnimators::on_runtime(&clock.runtime_handle());
        Self::with_animators(config, screen_width, clock, animators)
    }

    /// Builds a controller over host-provided animation drivers. `clock`
    /// still times the outcome delay.
    pub fn with_animators(
        config: SwipeConfig,
        screen_width: f32,
        clock: FrameClock,
        mut animators: CardAnimators,
    ) -> Result<Self, SwipeError> {
        let threshold = config.threshold(screen_width)?;
        animators.snap_to_rest();
        log::debug!(
            "swipe controller: screen width {screen_width}, threshold {}",
            threshold.distance()
        );
        Ok(Self {
            shared: Rc::new(Shared {
                config,
                screen_width,
                threshold,
                clock,
                core: RefCell::new(Core {
                    card: None,
                    generation: 0,
                    phase: SwipePhase::Idle,
                    latch: ThresholdLatch::new(),
                    pending_outcome: None,
                    returning_axes: 0,
                }),
                animators: RefCell::new(animators),
                feedback: RefCell::new(FeedbackDispatcher::new()),
                on_skip: RefCell::new(None),
                on_select: RefCell::new(None),
                disposals: Cell::new(0),
            }),
        })
    }

    pub fn with_feedback(self, sink: impl SwipeFeedback + 'static) -> Self {
        self.add_feedback(sink);
        self
    }

    pub fn add_feedback(&self, sink: impl SwipeFeedback + 'static) {
        self.shared.feedback.borrow_mut().add(sink);
    }

    pub fn set_on_skip(&self, callback: impl FnMut() + 'static) {
        *self.shared.on_skip.borrow_mut() = Some(Box::new(callback));
    }

    pub fn set_on_select(&self, callback: impl FnMut(Id) + 'static) {
        *self.shared.on_select.borrow_mut() = Some(Box::new(callback));
    }

    pub fn downgrade(&self) -> WeakSwipeController<Id> {
        WeakSwipeController {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.shared.config
    }

    pub fn threshold(&self) -> SwipeThreshold {
        self.shared.threshold
    }

    /// Shows `card`, discarding whatever the previous card was doing.
    ///
    /// A pending outcome for the previous card is cancelled and never fires.
    pub fn bind(&self, card: Id) {
        log::debug!("binding card {card:?}");
        self.reset(Some(card));
    }

    pub fn unbind(&self) {
        self.reset(None);
    }

    /// Unbinds and drops the owner callbacks and feedback sinks.
    pub fn dispose(&self) {
        self.reset(None);
        self.shared.disposals.set(self.shared.disposals.get().wrapping_add(1));
        self.shared.on_skip.borrow_mut().take();
        self.shared.on_select.borrow_mut().take();
        *self.shared.feedback.borrow_mut() = FeedbackDispatcher::new();
    }

    pub fn card(&self) -> Option<Id> {
        self.shared.core.borrow().card.clone()
    }

    pub fn phase(&self) -> SwipePhase {
        self.shared.core.borrow().phase
    }

    /// Whether a committed outcome is still waiting on the exit animation.
    pub fn has_pending_outcome(&self) -> bool {
        self.shared
            .core
            .borrow()
            .pending_outcome
            .as_ref()
            .is_some_and(DeferredCall::is_pending)
    }

    /// Current state, with progress recomputed from the live translation.
    pub fn state(&self) -> SwipeState {
        let translation_x = self.shared.animators.borrow().x.value();
        let progress = compute_progress(translation_x, self.shared.threshold);
        let core = self.shared.core.borrow();
        SwipeState {
            progress: progress.progress,
            direction: progress.direction,
            threshold_crossed: core.latch.is_crossed(),
            phase: core.phase,
        }
    }

    pub fn transform(&self) -> CardTransform {
        let animators = self.shared.animators.borrow();
        CardTransform::from_translation(
            animators.x.value(),
            animators.y.value(),
            animators.alpha.value(),
            self.shared.threshold,
            self.shared.config.max_rotation_degrees,
        )
    }

    /// Feeds one gesture event. Returns whether the event was accepted.
    pub fn handle_gesture(&self, event: GestureEvent) -> bool {
        match event {
            GestureEvent::Begin => self.begin(),
            GestureEvent::Update(sample) => self.update(sample),
            GestureEvent::End(sample) => self.end(sample),
            GestureEvent::Cancel => self.cancel(),
        }
    }

    pub fn begin(&self) -> bool {
        {
            let mut core = self.shared.core.borrow_mut();
            if core.card.is_none() {
                log::debug!("gesture begin ignored: no card bound");
                return false;
            }
            if !core.phase.is_idle() {
                log::debug!("gesture begin ignored while {:?}", core.phase);
                return false;
            }
            core.phase = SwipePhase::Dragging;
            core.latch.reset();
        }
        log::debug!("swipe phase Idle -> Dragging");
        self.shared.dispatch(FeedbackCue::GestureStart);
        true
    }

    pub fn update(&self, sample: GestureSample) -> bool {
        if self.phase() != SwipePhase::Dragging {
            log::debug!("gesture update ignored outside a drag");
            return false;
        }
        self.shared.track(sample.finite_or_rest());
        true
    }

    pub fn end(&self, sample: GestureSample) -> bool {
        if self.phase() != SwipePhase::Dragging {
            log::debug!("gesture end ignored outside a drag");
            return false;
        }
        let sample = sample.finite_or_rest();
        self.shared.track(sample);
        let outcome = resolve_release(sample.translation_x, self.shared.threshold);
        Shared::release(&self.shared, outcome);
        true
    }

    /// The host aborted the pointer stream; the card springs back.
    pub fn cancel(&self) -> bool {
        if self.phase() != SwipePhase::Dragging {
            log::debug!("gesture cancel ignored outside a drag");
            return false;
        }
        Shared::release(&self.shared, Outcome::Cancel);
        true
    }

    fn reset(&self, card: Option<Id>) {
        let pending = {
            let mut core = self.shared.core.borrow_mut();
            core.generation = core.generation.wrapping_add(1);
            core.card = card;
            core.phase = SwipePhase::Idle;
            core.latch.reset();
            core.returning_axes = 0;
            core.pending_outcome.take()
        };
        if pending.as_ref().is_some_and(DeferredCall::is_pending) {
            log::debug!("cancelling pending swipe outcome");
        }
        drop(pending);
        self.shared.animators.borrow_mut().snap_to_rest();
    }
}

impl<Id: Clone + fmt::Debug + 'static> Shared<Id> {
    /// Sinks run with the dispatcher taken out of its cell, so they may add
    /// sinks or dispose the controller. Sinks added meanwhile queue up behind
    /// the existing ones.
    fn dispatch(&self, cue: FeedbackCue) {
        let disposals = self.disposals.get();
        let mut dispatcher = mem::take(&mut *self.feedback.borrow_mut());
        dispatcher.dispatch(cue);
        if self.disposals.get() != disposals {
            return;
        }
        let mut slot = self.feedback.borrow_mut();
        let added = mem::replace(&mut *slot, dispatcher);
        slot.append(added);
    }

    /// Moves the card with the finger and evaluates the threshold latch.
    fn track(&self, sample: GestureSample) {
        {
            let mut animators = self.animators.borrow_mut();
            animators.x.snap_to(sample.translation_x);
            animators.y.snap_to(sample.translation_y);
        }
        let progress = compute_progress(sample.translation_x, self.threshold);
        log::trace!(
            "drag x={} progress={:.3} {:?}",
            sample.translation_x,
            progress.progress,
            progress.direction
        );
        let crossed = self.core.borrow_mut().latch.evaluate(progress);
        if let Some(crossed) = crossed {
            log::debug!("swipe threshold crossed toward {:?}", crossed.direction);
            self.dispatch(FeedbackCue::ThresholdCrossed(crossed.direction));
        }
    }

    fn release(this: &Rc<Self>, outcome: Outcome) {
        let generation = {
            let mut core = this.core.borrow_mut();
            core.phase = outcome.phase();
            core.generation
        };
        log::debug!("swipe phase Dragging -> {:?}", outcome.phase());
        match outcome {
            Outcome::Cancel => Self::start_return(this, generation),
            Outcome::Skip | Outcome::Select => Self::start_exit(this, outcome, generation),
        }
    }

    fn start_return(this: &Rc<Self>, generation: u64) {
        this.core.borrow_mut().returning_axes = 2;
        let spring = AnimationType::Spring(this.config.return_spring);
        let mut animators = this.animators.borrow_mut();
        animators
            .x
            .animate_to(0.0, spring, Some(Self::axis_settled_listener(this, generation)));
        animators
            .y
            .animate_to(0.0, spring, Some(Self::axis_settled_listener(this, generation)));
    }

    fn axis_settled_listener(this: &Rc<Self>, generation: u64) -> EndListener {
        let weak = Rc::downgrade(this);
        Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.on_axis_settled(generation);
            }
        })
    }

    fn on_axis_settled(&self, generation: u64) {
        let mut core = self.core.borrow_mut();
        if core.generation != generation || core.phase != SwipePhase::Returning {
            return;
        }
        core.returning_axes = core.returning_axes.saturating_sub(1);
        if core.returning_axes == 0 {
            core.phase = SwipePhase::Idle;
            core.latch.reset();
            log::debug!("swipe phase Returning -> Idle");
        }
    }

    fn start_exit(this: &Rc<Self>, outcome: Outcome, generation: u64) {
        let (sign, cue) = match outcome {
            Outcome::Skip => (-1.0, FeedbackCue::CommitSkip),
            _ => (1.0, FeedbackCue::CommitSelect),
        };
        let exit = AnimationType::Tween(this.config.exit_animation());
        {
            let mut animators = this.animators.borrow_mut();
            animators.x.animate_to(
                sign * this.screen_width * this.config.exit_distance_factor,
                exit,
                None,
            );
            animators.alpha.animate_to(0.0, exit, None);
        }

        let weak = Rc::downgrade(this);
        let deferred = this
            .clock
            .with_delay_millis(this.config.exit_duration_ms, move || {
                if let Some(shared) = weak.upgrade() {
                    shared.on_exit_finished(outcome, generation);
                }
            });
        this.core.borrow_mut().pending_outcome = Some(deferred);
        this.dispatch(cue);
    }

    fn on_exit_finished(&self, outcome: Outcome, generation: u64) {
        let (card, finished) = {
            let mut core = self.core.borrow_mut();
            if core.generation != generation || !core.phase.is_committing() {
                return;
            }
            core.phase = SwipePhase::Idle;
            core.latch.reset();
            let card = match outcome {
                // A skipped card is gone; gestures wait for the next bind.
                Outcome::Skip => core.card.take(),
                _ => core.card.clone(),
            };
            (card, core.pending_outcome.take())
        };
        drop(finished);
        log::debug!("swipe outcome {outcome:?} resolved for {card:?}");

        match outcome {
            Outcome::Select => {
                self.animators.borrow_mut().snap_to_rest();
                match card {
                    Some(card) => self.notify_select(card),
                    None => log::debug!("select resolved without a bound card"),
                }
            }
            _ => self.notify_skip(),
        }
    }

    fn notify_skip(&self) {
        let disposals = self.disposals.get();
        let callback = self.on_skip.borrow_mut().take();
        if let Some(mut callback) = callback {
            callback();
            let mut slot = self.on_skip.borrow_mut();
            if slot.is_none() && self.disposals.get() == disposals {
                *slot = Some(callback);
            }
        }
    }

    fn notify_select(&self, card: Id) {
        let disposals = self.disposals.get();
        let callback = self.on_select.borrow_mut().take();
        if let Some(mut callback) = callback {
            callback(card);
            let mut slot = self.on_select.borrow_mut();
            if slot.is_none() && self.disposals.get() == disposals {
                *slot = Some(callback);
            }
        }
    }
}

impl<Id: Clone + fmt::Debug + 'static> fmt::Debug for SwipeController<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.shared.core.borrow();
        f.debug_struct("SwipeController")
            .field("card", &core.card)
            .field("phase", &core.phase)
            .field("threshold", &self.shared.threshold.distance())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
