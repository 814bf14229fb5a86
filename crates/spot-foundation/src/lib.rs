//! Pointer input plumbing and gesture sampling for Spot.

pub mod gesture_constants;
pub mod gestures;
mod geometry;
pub mod input;

pub use geometry::Point;
pub use gestures::{DragGestureSampler, GestureEvent, GestureSample, GestureSource};
pub use input::{PointerDispatcher, PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use crate::gestures::{DragGestureSampler, GestureEvent, GestureSample, GestureSource};
    pub use crate::input::{PointerEvent, PointerEventKind, PointerId};
    pub use crate::Point;
}
