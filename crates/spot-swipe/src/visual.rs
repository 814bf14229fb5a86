use crate::config::SwipeThreshold;
use crate::progress::{compute_progress, SwipeDirection};

/// What the host should draw for a card this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    pub translation_x: f32,
    pub translation_y: f32,
    pub rotation_degrees: f32,
    pub alpha: f32,
    /// Opacity of the skip/select badge; equals swipe progress.
    pub overlay_alpha: f32,
    pub overlay: SwipeDirection,
}

impl CardTransform {
    pub const REST: CardTransform = CardTransform {
        translation_x: 0.0,
        translation_y: 0.0,
        rotation_degrees: 0.0,
        alpha: 1.0,
        overlay_alpha: 0.0,
        overlay: SwipeDirection::None,
    };

    pub fn from_translation(
        translation_x: f32,
        translation_y: f32,
        alpha: f32,
        threshold: SwipeThreshold,
        max_rotation_degrees: f32,
    ) -> Self {
        let progress = compute_progress(translation_x, threshold);
        let tilt = if translation_x.is_finite() {
            (translation_x / threshold.distance()).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            translation_x,
            translation_y,
            rotation_degrees: tilt * max_rotation_degrees,
            alpha: alpha.clamp(0.0, 1.0),
            overlay_alpha: progress.progress,
            overlay: progress.direction,
        }
    }
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::REST
    }
}
