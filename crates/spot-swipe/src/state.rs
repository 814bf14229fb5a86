use crate::progress::SwipeDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SwipePhase {
    #[default]
    Idle,
    Dragging,
    /// Exit animation toward the left; resolves to a skip.
    CommittingLeft,
    /// Exit animation toward the right; resolves to a select.
    CommittingRight,
    /// Spring-back after a release that did not commit.
    Returning,
}

impl SwipePhase {
    pub fn is_idle(self) -> bool {
        self == SwipePhase::Idle
    }

    pub fn is_committing(self) -> bool {
        matches!(self, SwipePhase::CommittingLeft | SwipePhase::CommittingRight)
    }

    /// Phases during which new gestures are refused.
    pub fn is_animating(self) -> bool {
        self.is_committing() || self == SwipePhase::Returning
    }
}

/// Terminal result of one gesture lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Skip,
    Select,
    Cancel,
}

impl Outcome {
    pub(crate) fn phase(self) -> SwipePhase {
        match self {
            Outcome::Skip => SwipePhase::CommittingLeft,
            Outcome::Select => SwipePhase::CommittingRight,
            Outcome::Cancel => SwipePhase::Returning,
        }
    }
}

/// Snapshot of one card's swipe state.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SwipeState {
    pub progress: f32,
    pub direction: SwipeDirection,
    pub threshold_crossed: bool,
    pub phase: SwipePhase,
}
