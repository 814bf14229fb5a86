//! Testing utilities and harness for Spot swipe interactions

pub mod recording;
pub mod testing;

pub use recording::{RecordedOutcome, RecordingFeedback};
pub use testing::{SwipeTestRule, FRAME_NANOS};

pub mod prelude {
    pub use crate::recording::*;
    pub use crate::testing::*;
    pub use spot_foundation::{GestureEvent, GestureSample, PointerEvent};
    pub use spot_swipe::{
        CardTransform, FeedbackCue, SwipeConfig, SwipeDirection, SwipePhase, SwipeState,
    };
}
