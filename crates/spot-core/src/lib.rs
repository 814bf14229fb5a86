//! Core runtime for Spot.
//!
//! Hosts the frame-callback queue that animations and deferred calls hang
//! off. Everything here is single-threaded: handles are `Rc`/`Weak` based and
//! callbacks run on the thread that drains frames.

pub mod collections;
mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{DeferredCall, FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

/// Identifier handed out for each registered frame callback.
pub type FrameCallbackId = u64;

/// Nanoseconds per millisecond, used when converting animation durations.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
