//! Pressure/temperature sensor domain logic
//!
//! Everything here is hardware-free: the register map, calibration block
//! decoding, the fixed-point compensation formulas and reading smoothing.
//! The bus-facing driver lives in `strato-drivers`.

pub mod calibration;
pub mod compensation;
pub mod error;
pub mod reading;
pub mod registers;

pub use calibration::{CalibrationParameters, CALIBRATION_LEN};
pub use compensation::{
    compensate_pressure, compensate_pressure_checked, compensate_temperature, TFine, Temperature,
};
pub use error::SensorError;
pub use reading::Reading;
