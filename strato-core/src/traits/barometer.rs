//! Barometric sensor trait

use crate::bme280::Reading;

/// Trait for combined temperature/pressure sensors
///
/// Implementations own their calibration and bus access.
pub trait BarometricSensor {
    /// Error type for sensor operations
    type Error;

    /// Take one compensated reading
    ///
    /// Takes `&mut self` because a reading requires bus transactions.
    fn read(&mut self) -> Result<Reading, Self::Error>;

    /// Read the current temperature in centi-degrees Celsius
    fn read_temperature(&mut self) -> Result<i32, Self::Error> {
        self.read().map(|r| r.temperature)
    }

    /// Read the current pressure in Pa
    fn read_pressure(&mut self) -> Result<u32, Self::Error> {
        self.read().map(|r| r.pressure)
    }
}
