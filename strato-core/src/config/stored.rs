//! Persisted driver configuration
//!
//! Stores bus and sensor settings with a header for data validation.
//! With the `serde` feature the record round-trips through postcard so it
//! can live in EEPROM or flash.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bus::TwiConfig;
use super::sensor::SensorConfig;

/// Magic number to identify a valid configuration record
pub const CONFIG_MAGIC: u32 = 0x5354_5241; // "STRA"

/// Current configuration record version
pub const CONFIG_VERSION: u8 = 1;

/// Errors loading or storing a configuration record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Record failed to serialize (buffer too small)
    Serialize,
    /// Bytes did not decode as a record
    Deserialize,
    /// Record decoded but magic or version do not match
    Invalid,
}

/// Complete driver configuration record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Bus settings
    pub bus: TwiConfig,
    /// Sensor settings
    pub sensor: SensorConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new(TwiConfig::default(), SensorConfig::default())
    }
}

impl DriverConfig {
    /// Create a record with the current header
    pub const fn new(bus: TwiConfig, sensor: SensorConfig) -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            bus,
            sensor,
        }
    }

    /// Check if the record is valid (magic and version match)
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.version == CONFIG_VERSION
    }

    /// Serialize into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize and validate a record
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if !config.is_valid() {
            return Err(ConfigError::Invalid);
        }
        Ok(config)
    }
}
