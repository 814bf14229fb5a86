//! Gesture-level events produced from raw pointer input.

mod drag;

pub use drag::DragGestureSampler;

use crate::input::PointerEvent;
use smallvec::SmallVec;

/// Offset of the pointer from where the gesture started, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureSample {
    pub translation_x: f32,
    pub translation_y: f32,
}

impl GestureSample {
    pub const fn new(translation_x: f32, translation_y: f32) -> Self {
        Self {
            translation_x,
            translation_y,
        }
    }

    /// Replaces a non-finite component with 0.0.
    pub fn finite_or_rest(self) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self::new(finite(self.translation_x), finite(self.translation_y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Begin,
    Update(GestureSample),
    End(GestureSample),
    /// The host aborted the gesture; the final position is not meaningful.
    Cancel,
}

/// Events produced by a single pointer event. A drag crossing the touch slop
/// yields `Begin` and its first `Update` together.
pub type GestureEvents = SmallVec<[GestureEvent; 2]>;

/// Turns raw pointer events into begin/update/end gesture events.
pub trait GestureSource {
    fn on_pointer_event(&mut self, event: &PointerEvent) -> GestureEvents;

    /// Forget any in-flight gesture without emitting events.
    fn reset(&mut self);

    fn is_dragging(&self) -> bool;
}
