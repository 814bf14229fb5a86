//! Time-based animations with easing curves and spring physics.
//!
//! An [`Animatable`] registers itself on the [`FrameClock`] while it has
//! somewhere to go and unregisters once it lands. Values only advance when the
//! host drains frames, so tests can step time deterministically.

use std::cell::RefCell;
use std::rc::Rc;

use spot_core::{FrameCallbackRegistration, RuntimeHandle, NANOS_PER_MILLI};

use crate::driver::EndListener;

/// Fixed integration step for springs, roughly one 60 Hz frame.
const SPRING_TIMESTEP_SECS: f32 = 0.016;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Values that can be driven by a spring.
///
/// The spring runs in "progress space" (0 at the start value, 1 at the
/// target) so any interpolable scalar can use the same physics.
pub trait SpringScalar: Lerp + Clone {
    fn to_f32(&self) -> f32;

    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let start_val = start.to_f32();
        let target_val = target.to_f32();
        let current_val = current.to_f32();

        if (target_val - start_val).abs() < f32::EPSILON {
            1.0
        } else {
            (current_val - start_val) / (target_val - start_val)
        }
    }

    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current.to_f32() - target.to_f32()).abs() < threshold
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }
}

/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Material standard curve; the default for tweens.
    FastOutSlowIn,
    FastOutLinearIn,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
        }
    }
}

struct BezierAxis {
    a: f32,
    b: f32,
    c: f32,
}

impl BezierAxis {
    fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    fn sample(&self, t: f32) -> f32 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn derivative(&self, t: f32) -> f32 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

/// Evaluates a unit cubic bezier `(0,0) (x1,y1) (x2,y2) (1,1)` at `x = fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let x_axis = BezierAxis::new(x1, x2);
    let y_axis = BezierAxis::new(y1, y2);

    // Newton-Raphson first; bisection when the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let error = x_axis.sample(t) - fraction;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let slope = x_axis.derivative(t);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..16 {
            let error = x_axis.sample(t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    y_axis.sample(t)
}

/// Tween specification: duration, easing and an optional start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Damped spring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped, below 1.0 overshoots, above 1.0 creeps in.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Settles once velocity (progress units per second) drops below this...
    pub velocity_threshold: f32,
    /// ...and the value is within this distance of the target.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            ..Self::default_spring()
        }
    }

    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.01,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    pub fn with_position_threshold(mut self, threshold: f32) -> Self {
        self.position_threshold = threshold;
        self
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// A value that animates toward a target on the frame clock.
///
/// Clones share the same underlying value.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    runtime: RuntimeHandle,
    current: T,
    /// Spring velocity in progress units per second.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndListener>,
    running: bool,
}

impl<T: SpringScalar + 'static> AnimatableInner<T> {
    fn stop(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.velocity = 0.0;
        self.running = false;
        // An interrupted animation never reports completion.
        self.on_end = None;
    }

    fn land(&mut self) -> Option<EndListener> {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.velocity = 0.0;
        self.running = false;
        self.on_end.take()
    }
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            on_end: None,
            running: false,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate from the current value to `target`.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.animate_to_then(target, animation, None);
    }

    /// Animate to `target` and run `on_end` once the value lands there.
    ///
    /// `on_end` is dropped without running if the animation is interrupted by
    /// another `animate_to*` or `snap_to` call.
    pub fn animate_to_then(&self, target: T, animation: AnimationType, on_end: Option<EndListener>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.stop();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.on_end = on_end;
            inner.running = true;
        }
        Self::schedule_frame(&self.inner);
    }

    /// Jump straight to `value`, cancelling any running animation.
    pub fn snap_to(&self, value: T) {
        let mut inner = self.inner.borrow_mut();
        inner.stop();
        inner.current = value.clone();
        inner.start = value.clone();
        inner.target = value;
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::debug!("animation scheduled on a dropped runtime; value will not advance");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);

            match inner.animation_type {
                AnimationType::Tween(spec) => {
                    let delay_nanos = spec.delay_millis.saturating_mul(NANOS_PER_MILLI);
                    if elapsed_nanos < delay_nanos {
                        schedule_next = true;
                    } else {
                        let duration_nanos =
                            spec.duration_millis.saturating_mul(NANOS_PER_MILLI).max(1);
                        let linear_progress = ((elapsed_nanos - delay_nanos) as f32
                            / duration_nanos as f32)
                            .clamp(0.0, 1.0);

                        if linear_progress >= 1.0 {
                            finished = Some(inner.land());
                        } else {
                            let eased = spec.easing.transform(linear_progress);
                            inner.current = inner.start.lerp(&inner.target, eased);
                            schedule_next = true;
                        }
                    }
                }
                AnimationType::Spring(spec) => {
                    let previous = inner.last_frame_nanos.replace(frame_time_nanos);
                    let dt = previous
                        .map(|prev| frame_time_nanos.saturating_sub(prev) as f32 / 1_000_000_000.0)
                        .unwrap_or(0.0);

                    if dt > 0.0 {
                        // Damped harmonic oscillator toward progress 1.0, semi-implicit Euler.
                        let stiffness = spec.stiffness;
                        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
                        let mut simulated = 0.0f32;
                        let mut progress = <T as SpringScalar>::spring_progress(
                            &inner.start,
                            &inner.target,
                            &inner.current,
                        );
                        while simulated < dt {
                            let step = SPRING_TIMESTEP_SECS.min(dt - simulated);
                            let displacement = progress - 1.0;
                            let force = -stiffness * displacement - damping * inner.velocity;
                            inner.velocity += force * step;
                            progress = (progress + inner.velocity * step).clamp(-1.0, 2.0);
                            simulated += step;
                        }
                        inner.current = inner.start.lerp(&inner.target, progress);
                    }

                    let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                    let near_target = <T as SpringScalar>::is_near_target(
                        &inner.current,
                        &inner.target,
                        spec.position_threshold,
                    );
                    if dt > 0.0 && at_rest && near_target {
                        finished = Some(inner.land());
                    } else {
                        schedule_next = true;
                    }
                }
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some(Some(on_end)) = finished {
            on_end();
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
