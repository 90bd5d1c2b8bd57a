/// Receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// "Run this on the next display frame", with at most one frame pending.
pub trait FrameScheduler {
    /// Replaces any pending callback.
    fn schedule_next(&mut self, callback: FrameCallback);

    /// Drops the pending callback, if any, so it never runs.
    fn cancel(&mut self);

    fn is_pending(&self) -> bool;
}

#[cfg(test)]
pub use manual::ManualScheduler;
