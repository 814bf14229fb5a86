//! Animation system for Spot.
//!
//! Provides frame-clock driven tweens and springs, plus the
//! [`AnimationDriver`] capability the swipe controller animates through.

mod animation;
mod driver;

pub use animation::{
    Animatable, AnimationSpec, AnimationType, Easing, Lerp, SpringScalar, SpringSpec,
};
pub use driver::{AnimationDriver, EndListener};
