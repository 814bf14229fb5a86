//! The animation capability the swipe controller depends on.
//!
//! Hosts with their own animation system implement [`AnimationDriver`]
//! directly; everyone else uses [`Animatable<f32>`] on a Spot frame clock.

use crate::animation::{Animatable, AnimationType};

/// Completion callback for a driver animation.
pub type EndListener = Box<dyn FnOnce() + 'static>;

/// A single animatable scalar (a translation axis, an alpha).
pub trait AnimationDriver {
    /// Set the value immediately, cancelling any running animation.
    fn snap_to(&mut self, value: f32);

    /// Animate from the current value to `target`.
    ///
    /// `on_end` runs once when the value lands on `target`. It must not run if
    /// the animation is interrupted by a later `snap_to` or `animate_to`.
    fn animate_to(&mut self, target: f32, animation: AnimationType, on_end: Option<EndListener>);

    /// The value as of the last frame.
    fn value(&self) -> f32;

    fn is_running(&self) -> bool;
}

impl AnimationDriver for Animatable<f32> {
    fn snap_to(&mut self, value: f32) {
        Animatable::snap_to(self, value);
    }

    fn animate_to(&mut self, target: f32, animation: AnimationType, on_end: Option<EndListener>) {
        self.animate_to_then(target, animation, on_end);
    }

    fn value(&self) -> f32 {
        Animatable::value(self)
    }

    fn is_running(&self) -> bool {
        Animatable::is_running(self)
    }
}
