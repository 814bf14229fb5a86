//! Swipe interaction controller for suggestion cards.
//!
//! A [`SwipeController`] turns a drag on one card into proportional visual
//! feedback while the finger is down and a single discrete outcome when it
//! lifts: skip (left), select (right) or a spring back to rest. Animation and
//! gesture input are capabilities injected from `spot-animation` and
//! `spot-foundation`; platform feedback goes out through [`SwipeFeedback`].

mod caption;
mod config;
mod controller;
mod deck;
mod error;
mod feedback;
mod progress;
mod resolver;
mod state;
mod threshold;
mod visual;

pub use caption::{CaptionPicker, DEFAULT_SELECT_CAPTIONS, DEFAULT_SKIP_CAPTIONS};
pub use config::{SwipeConfig, SwipeThreshold, DEFAULT_EXIT_DURATION_MS, DEFAULT_THRESHOLD_FRACTION};
pub use controller::{CardAnimators, SwipeController, WeakSwipeController};
pub use deck::{DeckItem, SwipeDeck};
pub use error::SwipeError;
pub use feedback::{FeedbackCue, FeedbackDispatcher, SwipeFeedback};
pub use progress::{compute_progress, SwipeDirection, SwipeProgress};
pub use resolver::resolve_release;
pub use state::{Outcome, SwipePhase, SwipeState};
pub use threshold::{ThresholdCrossed, ThresholdLatch};
pub use visual::CardTransform;

pub use spot_foundation::{GestureEvent, GestureSample};
