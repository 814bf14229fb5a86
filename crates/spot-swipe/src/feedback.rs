//! Side-channel cues (haptics, sounds, captions) raised by the controller.
//!
//! The controller only says *when*; hosts decide what a cue feels like by
//! implementing [`SwipeFeedback`].

use smallvec::SmallVec;

use crate::progress::SwipeDirection;

/// Receiver for the four feedback trigger points. Every method defaults to a
/// no-op so sinks implement only what they care about.
pub trait SwipeFeedback {
    fn on_gesture_start(&mut self) {}

    fn on_threshold_crossed(&mut self, _direction: SwipeDirection) {}

    fn on_commit_skip(&mut self) {}

    fn on_commit_select(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackCue {
    GestureStart,
    ThresholdCrossed(SwipeDirection),
    CommitSkip,
    CommitSelect,
}

/// Fan-out point from the controller to any number of feedback sinks.
#[derive(Default)]
pub struct FeedbackDispatcher {
    sinks: SmallVec<[Box<dyn SwipeFeedback>; 2]>,
}

impl FeedbackDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl SwipeFeedback + 'static) -> Self {
        self.add(sink);
        self
    }

    pub fn add(&mut self, sink: impl SwipeFeedback + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Moves every sink of `other` behind this dispatcher's sinks.
    pub fn append(&mut self, other: FeedbackDispatcher) {
        self.sinks.extend(other.sinks);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn dispatch(&mut self, cue: FeedbackCue) {
        log::trace!("feedback cue {cue:?} -> {} sink(s)", self.sinks.len());
        for sink in self.sinks.iter_mut() {
            match cue {
                FeedbackCue::GestureStart => sink.on_gesture_start(),
                FeedbackCue::ThresholdCrossed(direction) => sink.on_threshold_crossed(direction),
                FeedbackCue::CommitSkip => sink.on_commit_skip(),
                FeedbackCue::CommitSelect => sink.on_commit_select(),
            }
        }
    }
}

impl std::fmt::Debug for FeedbackDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackDispatcher")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tally(Rc<RefCell<Vec<&'static str>>>, &'static str);

    impl SwipeFeedback for Tally {
        fn on_commit_skip(&mut self) {
            self.0.borrow_mut().push(self.1);
        }
    }

    #[test]
    fn dispatch_reaches_every_sink_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = FeedbackDispatcher::new()
            .with(Tally(Rc::clone(&log), "haptics"))
            .with(Tally(Rc::clone(&log), "sound"));

        dispatcher.dispatch(FeedbackCue::CommitSkip);
        dispatcher.dispatch(FeedbackCue::GestureStart);

        assert_eq!(dispatcher.len(), 2);
        assert_eq!(*log.borrow(), vec!["haptics", "sound"]);
    }

    #[test]
    fn append_keeps_existing_sinks_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = FeedbackDispatcher::new().with(Tally(Rc::clone(&log), "haptics"));
        dispatcher.append(FeedbackDispatcher::new().with(Tally(Rc::clone(&log), "caption")));

        dispatcher.dispatch(FeedbackCue::CommitSkip);
        assert_eq!(*log.borrow(), vec!["haptics", "caption"]);
    }

    #[test]
    fn empty_dispatcher_is_a_no_op() {
        let mut dispatcher = FeedbackDispatcher::new();
        dispatcher.dispatch(FeedbackCue::ThresholdCrossed(SwipeDirection::Left));
        assert!(dispatcher.is_empty());
    }
}
