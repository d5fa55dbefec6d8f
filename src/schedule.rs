//! Throttle-and-debounce scheduling for high-frequency events.
//!
//! Scroll events arrive far faster than the active-section scan should run.
//! A plain throttle leaves the marker one frame behind the final scroll
//! position; a plain debounce starves updates during continuous scrolling.
//! This combines both: a leading run when the window is clear, and one
//! trailing run a full window after the latest event, re-armed by every
//! event in between. Time is an explicit `u64` tick supplied by the caller,
//! so a single-threaded host loop (or a test) drives deadlines by polling.

/// Combined leading-throttle / trailing-debounce schedule over caller ticks.
pub struct ThrottleDebounce {
    window: u64,
    throttle_until: Option<u64>,
    pending: Option<u64>,
}

impl ThrottleDebounce {
    #[must_use]
    /// Creates a schedule with the given minimum-gap / settle window.
    pub fn new(window: u64) -> Self {
        Self {
            window,
            throttle_until: None,
            pending: None,
        }
    }

    /// Records an event at `now`. Returns `true` when the caller should run
    /// the scheduled work immediately (leading edge).
    ///
    /// Inside the throttle window the event instead re-arms the trailing
    /// run, cancelling any previously pending one, so the eventual trailing
    /// run always reflects the latest event.
    pub fn on_event(&mut self, now: u64) -> bool {
        self.pending = None;
        match self.throttle_until {
            Some(until) if now < until => {
                self.pending = Some(now + self.window);
                false
            }
            _ => {
                self.throttle_until = Some(now + self.window);
                true
            }
        }
    }

    /// Arms an immediate pending run, due at the next poll.
    ///
    /// Used for the deferred initial computation after mount: the work runs
    /// on the next turn of the host loop rather than inline.
    pub fn force(&mut self, now: u64) {
        self.pending = Some(now);
    }

    /// Checks the trailing deadline at `now`. Returns `true` exactly once
    /// per armed deadline, when it has elapsed.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending trailing run without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    /// Whether a trailing run is currently armed.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "tests/schedule.rs"]
mod tests;
