//! Pressure/temperature sensor configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Warm-up cycles run by sensor initialization
pub const DEFAULT_WARMUP_CYCLES: u8 = 10;

/// Oversampling setting for one measurement channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Oversampling {
    /// Channel disabled; the raw register reads 0x80000
    Skipped,
    #[default]
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl Oversampling {
    /// Three-bit register field value
    pub const fn bits(self) -> u8 {
        match self {
            Oversampling::Skipped => 0b000,
            Oversampling::X1 => 0b001,
            Oversampling::X2 => 0b010,
            Oversampling::X4 => 0b011,
            Oversampling::X8 => 0b100,
            Oversampling::X16 => 0b101,
        }
    }
}

/// Sensor power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorMode {
    Sleep,
    /// One conversion, then back to sleep
    #[default]
    Forced,
    Normal,
}

impl SensorMode {
    /// Two-bit register field value
    pub const fn bits(self) -> u8 {
        match self {
            SensorMode::Sleep => 0b00,
            SensorMode::Forced => 0b01,
            SensorMode::Normal => 0b11,
        }
    }
}

/// Measurement control register contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementControl {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub mode: SensorMode,
}

impl MeasurementControl {
    /// Packed register value: `osrs_t[7:5] | osrs_p[4:2] | mode[1:0]`
    pub const fn register_value(&self) -> u8 {
        (self.temperature_oversampling.bits() << 5)
            | (self.pressure_oversampling.bits() << 2)
            | self.mode.bits()
    }
}

/// Sensor driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Value written to trigger each measurement
    pub control: MeasurementControl,
    /// Smoothing cycles run by initialization
    pub warmup_cycles: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            control: MeasurementControl::default(),
            warmup_cycles: DEFAULT_WARMUP_CYCLES,
        }
    }
}
