use crate::config::SwipeThreshold;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SwipeDirection {
    #[default]
    None,
    Left,
    Right,
}

/// How far toward committing the current drag is, in its dominant direction.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SwipeProgress {
    /// In `[0, 1]`; exactly 1 from `|translation_x| == T` onward.
    pub progress: f32,
    pub direction: SwipeDirection,
}

impl SwipeProgress {
    pub const REST: SwipeProgress = SwipeProgress {
        progress: 0.0,
        direction: SwipeDirection::None,
    };

    pub fn is_full(&self) -> bool {
        self.progress >= 1.0
    }
}

/// `progress = min(|translation_x| / T, 1)`, `direction = sign(translation_x)`.
///
/// Total: a non-finite translation reads as rest.
pub fn compute_progress(translation_x: f32, threshold: SwipeThreshold) -> SwipeProgress {
    if !translation_x.is_finite() || translation_x == 0.0 {
        return SwipeProgress::REST;
    }
    let direction = if translation_x < 0.0 {
        SwipeDirection::Left
    } else {
        SwipeDirection::Right
    };
    SwipeProgress {
        progress: (translation_x.abs() / threshold.distance()).min(1.0),
        direction,
    }
}
