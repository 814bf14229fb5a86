use crate::progress::{SwipeDirection, SwipeProgress};

/// One-shot signal raised the first time a gesture reaches full progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdCrossed {
    pub direction: SwipeDirection,
}

/// Latches once per gesture so the threshold cue cannot buzz when the finger
/// oscillates across the boundary. Only [`ThresholdLatch::reset`] clears it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThresholdLatch {
    crossed: bool,
}

impl ThresholdLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_crossed(&self) -> bool {
        self.crossed
    }

    pub fn reset(&mut self) {
        self.crossed = false;
    }

    pub fn evaluate(&mut self, progress: SwipeProgress) -> Option<ThresholdCrossed> {
        if self.crossed || !progress.is_full() {
            return None;
        }
        self.crossed = true;
        Some(ThresholdCrossed {
            direction: progress.direction,
        })
    }
}
