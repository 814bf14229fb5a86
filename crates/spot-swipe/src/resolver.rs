use crate::config::SwipeThreshold;
use crate::state::Outcome;

/// Decides the outcome of a released drag from its final position alone.
///
/// Commit needs strict inequality: a release at exactly `±T` springs back
/// even though progress reads 1 there. Whether the threshold latch fired
/// earlier in the gesture is irrelevant. A non-finite release reads as rest,
/// matching [`compute_progress`](crate::progress::compute_progress).
pub fn resolve_release(translation_x: f32, threshold: SwipeThreshold) -> Outcome {
    let t = threshold.distance();
    if !translation_x.is_finite() {
        Outcome::Cancel
    } else if translation_x < -t {
        Outcome::Skip
    } else if translation_x > t {
        Outcome::Select
    } else {
        Outcome::Cancel
    }
}
