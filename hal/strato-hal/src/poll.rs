//! Bounded busy-wait
//!
//! Peripherals signal completion through a flag that software polls. A
//! [`PollDeadline`] bounds each of those loops so a stuck line turns into an
//! error instead of a hang.

/// Deadline for one busy-wait loop
pub trait PollDeadline {
    /// Arm the deadline for a new wait
    fn restart(&mut self);

    /// Called once per unsuccessful poll; returns true once the wait has
    /// run out of time
    fn expired(&mut self) -> bool;
}

/// Deadline counted in poll iterations
///
/// Deterministic and clock-free, which makes it the natural choice for
/// host tests and for targets without a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollBudget {
    limit: u32,
    remaining: u32,
}

impl PollBudget {
    /// Create a budget allowing `limit` unsuccessful polls per wait
    pub const fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    /// Configured polls per wait
    pub const fn limit(&self) -> u32 {
        self.limit
    }
}

impl PollDeadline for PollBudget {
    fn restart(&mut self) {
        self.remaining = self.limit;
    }

    fn expired(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

impl<T: PollDeadline + ?Sized> PollDeadline for &mut T {
    fn restart(&mut self) {
        T::restart(self)
    }

    fn expired(&mut self) -> bool {
        T::expired(self)
    }
}
