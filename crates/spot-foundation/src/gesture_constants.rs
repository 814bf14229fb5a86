//! Shared gesture constants for touch/pointer handling.
//!
//! Values are in logical pixels. Hosts on very dense screens may scale them
//! by the device's density factor before handing them to a sampler.

/// Touch slop in logical pixels.
///
/// A press only becomes a drag once the pointer has moved strictly further
/// than this from where it went down. Smaller movements are finger jitter and
/// a release inside the slop is a tap, not a swipe.
pub const DRAG_THRESHOLD: f32 = 8.0;
