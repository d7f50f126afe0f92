//! Time-based poll deadline
//!
//! [`PollBudget`](strato_hal::PollBudget) counts iterations, which ties the
//! real timeout to CPU speed. [`DelayDeadline`] instead sleeps a fixed step
//! between polls and expires after a wall-clock timeout.

use embedded_hal::delay::DelayNs;
use strato_hal::poll::PollDeadline;

/// Deadline measured with an `embedded-hal` delay provider
pub struct DelayDeadline<D> {
    delay: D,
    step_us: u32,
    timeout_us: u32,
    elapsed_us: u32,
}

impl<D: DelayNs> DelayDeadline<D> {
    /// Poll every `step_us`, giving up after `timeout_us`
    ///
    /// A zero step is treated as one microsecond.
    pub fn new(delay: D, step_us: u32, timeout_us: u32) -> Self {
        Self {
            delay,
            step_us: step_us.max(1),
            timeout_us,
            elapsed_us: 0,
        }
    }

    /// Time spent in the current wait
    pub fn elapsed_us(&self) -> u32 {
        self.elapsed_us
    }

    /// Give back the delay provider
    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> PollDeadline for DelayDeadline<D> {
    fn restart(&mut self) {
        self.elapsed_us = 0;
    }

    fn expired(&mut self) -> bool {
        if self.elapsed_us >= self.timeout_us {
            return true;
        }
        self.delay.delay_us(self.step_us);
        self.elapsed_us = self.elapsed_us.saturating_add(self.step_us);
        false
    }
}
