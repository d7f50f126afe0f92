//! Compensated measurement pair

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One compensated temperature/pressure reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Temperature in centi-degrees Celsius
    ///
    /// Signed rather than unsigned 32-bit so readings below 0 °C stay
    /// representable.
    pub temperature: i32,
    /// Pressure in Pa
    pub pressure: u32,
}

impl Reading {
    pub const fn new(temperature: i32, pressure: u32) -> Self {
        Self {
            temperature,
            pressure,
        }
    }

    /// Exponential smoothing step: each field moves halfway to `sample`
    ///
    /// This is `(old + new) / 2` truncated toward zero, not a running mean;
    /// repeated application converges on a constant input geometrically.
    pub fn smoothed(self, sample: Reading) -> Reading {
        Reading {
            temperature: ((self.temperature as i64 + sample.temperature as i64) / 2) as i32,
            pressure: ((self.pressure as u64 + sample.pressure as u64) / 2) as u32,
        }
    }

    /// Temperature in whole degrees Celsius
    pub fn temperature_celsius(&self) -> i32 {
        self.temperature / 100
    }
}
