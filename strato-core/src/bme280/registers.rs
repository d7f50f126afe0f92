//! Device register map

/// Default bus address (SDO pulled high)
pub const ADDRESS_PRIMARY: u8 = 0x77;
/// Alternate bus address (SDO tied to ground)
pub const ADDRESS_SECONDARY: u8 = 0x76;

/// Start of the 24-byte temperature/pressure calibration block
pub const CALIBRATION: u8 = 0x88;
/// Chip identification
pub const CHIP_ID: u8 = 0xD0;
/// Soft reset
pub const RESET: u8 = 0xE0;
/// Measurement control (oversampling and mode)
pub const CTRL_MEAS: u8 = 0xF4;
/// Raw pressure, MSB first (3 bytes)
pub const PRESS_MSB: u8 = 0xF7;
/// Raw temperature, MSB first (3 bytes)
pub const TEMP_MSB: u8 = 0xFA;

/// Value written to [`RESET`] to reset the device
pub const RESET_COMMAND: u8 = 0xB6;

/// Chip ID reported by the humidity-capable part
pub const CHIP_ID_BME280: u8 = 0x60;
/// Chip ID reported by the pressure-only part
pub const CHIP_ID_BMP280: u8 = 0x58;

/// Length of one raw measurement field
pub const RAW_SAMPLE_LEN: usize = 3;

/// Unpack a 20-bit raw ADC code from its 24-bit register field
///
/// The code is MSB-first with the lowest nibble of the last byte unused.
pub const fn raw_sample(bytes: [u8; RAW_SAMPLE_LEN]) -> u32 {
    (((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | bytes[2] as u32) >> 4
}
