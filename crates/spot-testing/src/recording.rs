use std::cell::RefCell;
use std::rc::Rc;

use spot_swipe::{FeedbackCue, SwipeDirection, SwipeFeedback};

/// Feedback sink that remembers every cue it receives.
///
/// Clones share the same log, so a test keeps one clone and hands the other
/// to the controller.
#[derive(Clone, Default, Debug)]
pub struct RecordingFeedback {
    cues: Rc<RefCell<Vec<FeedbackCue>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<FeedbackCue> {
        self.cues.borrow().clone()
    }

    pub fn count(&self, cue: FeedbackCue) -> usize {
        self.cues.borrow().iter().filter(|c| **c == cue).count()
    }

    pub fn threshold_crossings(&self) -> usize {
        self.cues
            .borrow()
            .iter()
            .filter(|c| matches!(c, FeedbackCue::ThresholdCrossed(_)))
            .count()
    }

    pub fn clear(&self) {
        self.cues.borrow_mut().clear();
    }

    fn push(&self, cue: FeedbackCue) {
        self.cues.borrow_mut().push(cue);
    }
}

impl SwipeFeedback for RecordingFeedback {
    fn on_gesture_start(&mut self) {
        self.push(FeedbackCue::GestureStart);
    }

    fn on_threshold_crossed(&mut self, direction: SwipeDirection) {
        self.push(FeedbackCue::ThresholdCrossed(direction));
    }

    fn on_commit_skip(&mut self) {
        self.push(FeedbackCue::CommitSkip);
    }

    fn on_commit_select(&mut self) {
        self.push(FeedbackCue::CommitSelect);
    }
}

/// Owner callback invocation seen by a [`crate::SwipeTestRule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedOutcome {
    Skip,
    Select(u64),
}
