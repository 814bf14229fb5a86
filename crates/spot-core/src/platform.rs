//! Platform abstraction traits for the Spot runtime.
//!
//! The host decides when frames run and what time it is; the runtime only
//! asks for a frame when it has callbacks waiting.

/// Receives frame requests from the runtime.
///
/// Implementations typically wake the host event loop. They must be safe to
/// call from any thread even though the runtime itself is single-threaded.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host drain frame callbacks soon.
    fn schedule_frame(&self);
}

/// Provides timing information to the host loop.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
