//! Drag gesture sampler.
//!
//! Tracks one pointer from press to release. The drag begins once the pointer
//! leaves the touch slop; translations are always measured from the press
//! position so the card does not jump by the slop distance when it starts
//! following the finger.

use smallvec::smallvec;

use super::{GestureEvent, GestureEvents, GestureSample, GestureSource};
use crate::gesture_constants::DRAG_THRESHOLD;
use crate::input::{PointerEvent, PointerEventKind, PointerId};
use crate::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Pressed { pointer: PointerId, origin: Point },
    Dragging { pointer: PointerId, origin: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragGestureSampler {
    touch_slop: f32,
    state: DragState,
}

impl Default for DragGestureSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl DragGestureSampler {
    pub fn new() -> Self {
        Self::with_touch_slop(DRAG_THRESHOLD)
    }

    pub fn with_touch_slop(touch_slop: f32) -> Self {
        Self {
            touch_slop: touch_slop.max(0.0),
            state: DragState::Idle,
        }
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    fn tracked(&self) -> Option<(PointerId, Point)> {
        match self.state {
            DragState::Idle => None,
            DragState::Pressed { pointer, origin } | DragState::Dragging { pointer, origin } => {
                Some((pointer, origin))
            }
        }
    }
}

fn sample(origin: Point, position: Point) -> GestureSample {
    let delta = position - origin;
    GestureSample::new(delta.x, delta.y)
}

impl GestureSource for DragGestureSampler {
    fn on_pointer_event(&mut self, event: &PointerEvent) -> GestureEvents {
        if event.kind == PointerEventKind::Down {
            if self.state == DragState::Idle && !event.is_consumed() {
                self.state = DragState::Pressed {
                    pointer: event.id,
                    origin: event.position,
                };
            } else {
                log::trace!("ignoring extra pointer {} while tracking a press", event.id);
            }
            return GestureEvents::new();
        }

        let Some((pointer, origin)) = self.tracked() else {
            return GestureEvents::new();
        };
        if event.id != pointer {
            return GestureEvents::new();
        }

        let dragging = matches!(self.state, DragState::Dragging { .. });
        match event.kind {
            PointerEventKind::Down => GestureEvents::new(),
            PointerEventKind::Move if dragging => {
                event.consume();
                smallvec![GestureEvent::Update(sample(origin, event.position))]
            }
            PointerEventKind::Move => {
                if origin.distance_to(event.position) > self.touch_slop {
                    self.state = DragState::Dragging { pointer, origin };
                    event.consume();
                    smallvec![
                        GestureEvent::Begin,
                        GestureEvent::Update(sample(origin, event.position))
                    ]
                } else {
                    GestureEvents::new()
                }
            }
            PointerEventKind::Up => {
                self.state = DragState::Idle;
                if dragging {
                    event.consume();
                    smallvec![GestureEvent::End(sample(origin, event.position))]
                } else {
                    GestureEvents::new()
                }
            }
            PointerEventKind::Cancel => {
                self.state = DragState::Idle;
                if dragging {
                    smallvec![GestureEvent::Cancel]
                } else {
                    GestureEvents::new()
                }
            }
        }
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}
