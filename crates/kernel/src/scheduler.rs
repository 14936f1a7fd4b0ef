use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Source of frame callbacks.
///
/// A windowed app implements `request_frame` by asking the platform for a
/// redraw and is then driven by its redraw events. Headless drivers pull
/// frames with `next_frame` instead.
pub trait FrameScheduler {
    /// Ask to be invoked again on the next display refresh.
    fn request_frame(&mut self);

    /// Block until the next frame is due. Returns `false` when no frame is
    /// pending and none will arrive.
    fn next_frame(&mut self) -> bool;
}

/// Scheduler that grants exactly `n` frames, then stops.
#[derive(Debug, Clone)]
pub struct FixedTicks {
    remaining: u64,
    pending: bool,
    requests: u64,
}

impl FixedTicks {
    pub fn new(frames: u64) -> Self {
        Self {
            remaining: frames,
            // the first frame is the bootstrap call, not a request
            pending: true,
            requests: 0,
        }
    }

    /// Times `request_frame` has been called.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for FixedTicks {
    fn request_frame(&mut self) {
        self.requests += 1;
        self.pending = true;
    }

    fn next_frame(&mut self) -> bool {
        if !self.pending || self.remaining == 0 {
            return false;
        }
        self.pending = false;
        self.remaining -= 1;
        true
    }
}

/// Shared flag that stops a running loop before its next frame.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ticks_needs_a_request_between_frames() {
        let mut s = FixedTicks::new(3);
        assert!(s.next_frame());
        assert!(!s.next_frame());
        s.request_frame();
        assert!(s.next_frame());
        s.request_frame();
        assert!(s.next_frame());
        s.request_frame();
        assert!(!s.next_frame());
    }

    #[test]
    fn fixed_ticks_runs_out() {
        let mut s = FixedTicks::new(1);
        assert!(s.next_frame());
        s.request_frame();
        assert!(!s.next_frame());
        assert_eq!(s.requests(), 1);
    }

    #[test]
    fn zero_ticks_never_fires() {
        let mut s = FixedTicks::new(0);
        assert!(!s.next_frame());
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!token.is_cancelled());
        other.cancel();
        assert!(token.is_cancelled());
    }
}
