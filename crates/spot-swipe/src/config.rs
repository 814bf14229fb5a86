use spot_animation::{AnimationSpec, Easing, SpringSpec};

use crate::error::SwipeError;

/// Fraction of the screen width a drag must exceed to commit.
pub const DEFAULT_THRESHOLD_FRACTION: f32 = 0.25;

/// Duration of the off-screen exit animation and of the outcome delay.
pub const DEFAULT_EXIT_DURATION_MS: u64 = 300;

/// Recognised options for a swipe controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub swipe_threshold_fraction: f32,
    pub exit_duration_ms: u64,
    /// Spring used to return a released card that did not commit.
    pub return_spring: SpringSpec,
    /// Card tilt at full progress; scales linearly with the drag.
    pub max_rotation_degrees: f32,
    /// Exit target as a multiple of the screen width.
    pub exit_distance_factor: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
            exit_duration_ms: DEFAULT_EXIT_DURATION_MS,
            return_spring: SpringSpec::new(0.75, 400.0).with_position_threshold(0.5),
            max_rotation_degrees: 12.0,
            exit_distance_factor: 1.5,
        }
    }
}

impl SwipeConfig {
    pub fn with_threshold_fraction(mut self, fraction: f32) -> Self {
        self.swipe_threshold_fraction = fraction;
        self
    }

    pub fn with_exit_duration_ms(mut self, duration_ms: u64) -> Self {
        self.exit_duration_ms = duration_ms;
        self
    }

    pub fn with_return_spring(mut self, spring: SpringSpec) -> Self {
        self.return_spring = spring;
        self
    }

    pub fn with_max_rotation_degrees(mut self, degrees: f32) -> Self {
        self.max_rotation_degrees = degrees;
        self
    }

    pub fn with_exit_distance_factor(mut self, factor: f32) -> Self {
        self.exit_distance_factor = factor;
        self
    }

    /// Commit distance for a screen `screen_width` pixels wide.
    pub fn threshold(&self, screen_width: f32) -> Result<SwipeThreshold, SwipeError> {
        if !screen_width.is_finite() || screen_width <= 0.0 {
            return Err(SwipeError::InvalidConfiguration {
                reason: "screen width must be positive and finite",
                value: screen_width,
            });
        }
        SwipeThreshold::new(screen_width * self.swipe_threshold_fraction)
    }

    pub(crate) fn exit_animation(&self) -> AnimationSpec {
        AnimationSpec::tween(self.exit_duration_ms, Easing::FastOutLinearIn)
    }
}

/// Distance in pixels beyond which a drag commits. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SwipeThreshold(f32);

impl SwipeThreshold {
    pub fn new(distance: f32) -> Result<Self, SwipeError> {
        if distance.is_finite() && distance > 0.0 {
            Ok(Self(distance))
        } else {
            log::warn!("rejecting swipe threshold distance {distance}");
            Err(SwipeError::InvalidConfiguration {
                reason: "threshold distance must be positive and finite",
                value: distance,
            })
        }
    }

    pub fn distance(self) -> f32 {
        self.0
    }
}
