//! Leading-plus-trailing rate limiting for cursor broadcasts.
//!
//! DESIGN
//! ======
//! A hybrid of throttle and debounce: a call arriving a full window after
//! the last executed call runs immediately; anything sooner is deferred to a
//! trailing slot one window after the call, and each newer call replaces the
//! pending one (only the newest arguments survive). A burst therefore
//! collapses to at most one leading and one trailing execution per window.
//!
//! The struct only makes timing decisions; the caller owns the deferred
//! arguments and the timer, and reports the timer firing via
//! [`ThrottleDebounce::commit_trailing`]. The last-execution timestamp for a
//! trailing run is the *call* time, not the fire time, matching the closure
//! capture in the page this client replaces.

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod rate_limit_test;

use std::time::{Duration, Instant};

/// What the caller should do with the call it just recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run it now.
    Execute,
    /// Hold it until the deadline, replacing any previously deferred call.
    Deferred(Instant),
}

/// Throttle+debounce gate over a fixed window.
#[derive(Debug)]
pub struct ThrottleDebounce {
    window: Duration,
    last_execution: Option<Instant>,
    /// Call time of the deferred call, if one is pending.
    pending: Option<Instant>,
}

impl ThrottleDebounce {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_execution: None,
            pending: None,
        }
    }

    /// Record a call and decide whether it runs now or trails.
    pub fn record_call(&mut self) -> Decision {
        self.record_call_at(Instant::now())
    }

    /// Internal: decide with an explicit timestamp (for testing).
    fn record_call_at(&mut self, now: Instant) -> Decision {
        let window_elapsed = self
            .last_execution
            .is_none_or(|last| now.duration_since(last) >= self.window);

        if window_elapsed {
            // An immediate run cancels any pending trailing call.
            self.pending = None;
            self.last_execution = Some(now);
            Decision::Execute
        } else {
            self.pending = Some(now);
            Decision::Deferred(now + self.window)
        }
    }

    /// The trailing timer fired: commit the deferred call, stamping the
    /// last execution with its original call time. Returns `false` if the
    /// deferred call was cancelled by a later immediate execution.
    pub fn commit_trailing(&mut self) -> bool {
        let Some(call_time) = self.pending.take() else {
            return false;
        };
        self.last_execution = Some(call_time);
        true
    }
}
