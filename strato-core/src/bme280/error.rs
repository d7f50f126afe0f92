//! Sensor driver errors

/// Errors reported by the pressure/temperature sensor driver
///
/// `E` is the error type of the underlying register bus. Nothing here is
/// retried by the driver; the caller decides whether to repeat the whole
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// The calibration block read failed; no coefficients were stored
    CalibrationReadFailed(E),
    /// No calibration has been loaded yet
    CalibrationUnavailable,
    /// Writing the measurement trigger failed
    MeasurementRequestFailed(E),
    /// Reading the raw temperature registers failed
    TemperatureReadFailed(E),
    /// Reading the raw pressure registers failed
    PressureReadFailed(E),
    /// Reading the chip ID register failed
    ChipIdReadFailed(E),
    /// Writing the reset command failed
    ResetFailed(E),
}

impl<E> SensorError<E> {
    /// Underlying bus error, if the failure came from the bus
    pub fn bus_error(&self) -> Option<&E> {
        match self {
            SensorError::CalibrationReadFailed(e)
            | SensorError::MeasurementRequestFailed(e)
            | SensorError::TemperatureReadFailed(e)
            | SensorError::PressureReadFailed(e)
            | SensorError::ChipIdReadFailed(e)
            | SensorError::ResetFailed(e) => Some(e),
            SensorError::CalibrationUnavailable => None,
        }
    }
}
