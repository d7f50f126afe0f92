//! Two-wire bus configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default CPU clock (16 MHz)
pub const DEFAULT_CPU_HZ: u32 = 16_000_000;

/// Default number of unsuccessful polls before a bus wait times out
///
/// At 400 kHz a byte takes ~23 µs on the wire; at 16 MHz a poll iteration
/// is well under a microsecond, so this leaves a wide margin.
pub const DEFAULT_POLL_LIMIT: u32 = 10_000;

/// Two-wire bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TwiConfig {
    /// Peripheral clock feeding the bit-rate generator (Hz)
    pub cpu_hz: u32,
    /// Target SCL frequency (Hz)
    pub bus_hz: u32,
    /// Unsuccessful polls allowed per blocking wait
    pub poll_limit: u32,
}

impl Default for TwiConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl TwiConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        cpu_hz: DEFAULT_CPU_HZ,
        bus_hz: 100_000,
        poll_limit: DEFAULT_POLL_LIMIT,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        cpu_hz: DEFAULT_CPU_HZ,
        bus_hz: 400_000,
        poll_limit: DEFAULT_POLL_LIMIT,
    };

    /// Same bus speed with a different CPU clock
    pub const fn with_cpu_hz(mut self, cpu_hz: u32) -> Self {
        self.cpu_hz = cpu_hz;
        self
    }

    /// Same settings with a different poll limit
    pub const fn with_poll_limit(mut self, poll_limit: u32) -> Self {
        self.poll_limit = poll_limit;
        self
    }

    /// Divisor for a given prescaler factor, or `None` if it overflows 8 bits
    ///
    /// SCL = cpu / (16 + 2 * divisor * prescaler), solved for divisor and
    /// truncated. Bus speeds the clock cannot reach clamp to divisor 0.
    pub const fn divisor_for(&self, prescaler: u32) -> Option<u8> {
        if self.bus_hz == 0 || prescaler == 0 {
            return None;
        }
        let ratio = self.cpu_hz / self.bus_hz;
        let divisor = ratio.saturating_sub(16) / (2 * prescaler);
        if divisor > u8::MAX as u32 {
            None
        } else {
            Some(divisor as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_mode_divisor() {
        // 16 MHz / 400 kHz = 40; (40 - 16) / 2 = 12
        assert_eq!(TwiConfig::FAST.divisor_for(1), Some(12));
    }

    #[test]
    fn test_standard_mode_divisor() {
        // 16 MHz / 100 kHz = 160; (160 - 16) / 2 = 72
        assert_eq!(TwiConfig::STANDARD.divisor_for(1), Some(72));
    }

    #[test]
    fn test_slow_bus_needs_prescaler() {
        let config = TwiConfig {
            bus_hz: 10_000,
            ..TwiConfig::FAST
        };
        // 1600 - 16 = 1584; /2 = 792 does not fit, /8 = 198 does
        assert_eq!(config.divisor_for(1), None);
        assert_eq!(config.divisor_for(4), Some(198));
    }

    #[test]
    fn test_unreachable_speed_clamps_to_zero() {
        let config = TwiConfig {
            bus_hz: 4_000_000,
            ..TwiConfig::FAST
        };
        assert_eq!(config.divisor_for(1), Some(0));
    }

    #[test]
    fn test_zero_bus_speed_rejected() {
        let config = TwiConfig {
            bus_hz: 0,
            ..TwiConfig::FAST
        };
        assert_eq!(config.divisor_for(1), None);
    }
}
