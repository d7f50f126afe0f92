//! Pressure/temperature sensor driver
//!
//! Drives a BME280 (or the register-compatible BMP280) in forced mode:
//! every measurement writes the control register to trigger one
//! conversion, then reads the raw temperature and pressure codes and
//! compensates them with the factory calibration.
//!
//! The calibration belongs to the driver instance. Until
//! [`load_calibration`](Bme280::load_calibration) succeeds no compensated
//! value is produced.

use strato_core::bme280::registers::{self, raw_sample, RAW_SAMPLE_LEN};
use strato_core::bme280::{
    compensate_pressure_checked, compensate_temperature, CalibrationParameters, Reading,
    SensorError, CALIBRATION_LEN,
};
use strato_core::config::SensorConfig;
use strato_core::traits::BarometricSensor;
use strato_hal::i2c::RegisterBus;

/// BME280 driver
pub struct Bme280<B> {
    bus: B,
    address: u8,
    config: SensorConfig,
    calibration: Option<CalibrationParameters>,
    last: Option<Reading>,
}

impl<B: RegisterBus> Bme280<B> {
    /// Create a driver with the default measurement settings
    pub fn new(bus: B, address: u8) -> Self {
        Self::with_config(bus, address, SensorConfig::default())
    }

    pub fn with_config(bus: B, address: u8, config: SensorConfig) -> Self {
        Self {
            bus,
            address,
            config,
            calibration: None,
            last: None,
        }
    }

    /// Device bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Calibration loaded from the device, if any
    pub fn calibration(&self) -> Option<&CalibrationParameters> {
        self.calibration.as_ref()
    }

    /// Most recent successful reading
    pub fn last_reading(&self) -> Option<Reading> {
        self.last
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Read the chip identification register
    pub fn chip_id(&mut self) -> Result<u8, SensorError<B::Error>> {
        self.bus
            .read_register(self.address, registers::CHIP_ID)
            .map_err(SensorError::ChipIdReadFailed)
    }

    /// Issue a soft reset
    ///
    /// The device needs a few milliseconds before it answers again.
    /// Calibration lives in non-volatile memory, so a loaded copy stays valid.
    pub fn soft_reset(&mut self) -> Result<(), SensorError<B::Error>> {
        self.bus
            .write_register(self.address, registers::RESET, registers::RESET_COMMAND)
            .map_err(SensorError::ResetFailed)
    }

    /// Read and decode the factory calibration block
    ///
    /// On failure the previously stored calibration (if any) is kept.
    pub fn load_calibration(&mut self) -> Result<CalibrationParameters, SensorError<B::Error>> {
        let mut raw = [0u8; CALIBRATION_LEN];
        if let Err(e) = self
            .bus
            .read_registers(self.address, registers::CALIBRATION, &mut raw)
        {
            warn!("bme280: calibration read failed at {=u8:#x}", self.address);
            return Err(SensorError::CalibrationReadFailed(e));
        }

        let calibration = CalibrationParameters::from_bytes(&raw);
        self.calibration = Some(calibration);
        debug!("bme280: calibration loaded {}", calibration);
        Ok(calibration)
    }

    /// Trigger one conversion
    ///
    /// Returns once the control register write has been acknowledged.
    pub fn request_measurement(&mut self) -> Result<(), SensorError<B::Error>> {
        self.bus
            .write_register(
                self.address,
                registers::CTRL_MEAS,
                self.config.control.register_value(),
            )
            .map_err(SensorError::MeasurementRequestFailed)
    }

    /// Raw 20-bit temperature code
    pub fn read_raw_temperature(&mut self) -> Result<u32, SensorError<B::Error>> {
        self.read_raw(registers::TEMP_MSB)
            .map_err(SensorError::TemperatureReadFailed)
    }

    /// Raw 20-bit pressure code
    pub fn read_raw_pressure(&mut self) -> Result<u32, SensorError<B::Error>> {
        self.read_raw(registers::PRESS_MSB)
            .map_err(SensorError::PressureReadFailed)
    }

    /// Load calibration and settle a reading by repeated smoothing
    ///
    /// Starting from `seed`, each of `warmup_cycles` measurements moves the
    /// accumulated reading halfway towards the new sample. Any failure
    /// returns the error and leaves the last reading untouched.
    pub fn initialize(&mut self, seed: Reading) -> Result<Reading, SensorError<B::Error>> {
        let calibration = self.load_calibration()?;

        let mut reading = seed;
        for _ in 0..self.config.warmup_cycles {
            let sample = self.measure(&calibration)?;
            reading = reading.smoothed(sample);
        }

        self.last = Some(reading);
        info!(
            "bme280: initialized, {} cC {} Pa",
            reading.temperature,
            reading.pressure
        );
        Ok(reading)
    }

    /// Take one measurement without smoothing
    pub fn read(&mut self) -> Result<Reading, SensorError<B::Error>> {
        let calibration = self
            .calibration
            .ok_or(SensorError::CalibrationUnavailable)?;
        let reading = self.measure(&calibration)?;
        self.last = Some(reading);
        Ok(reading)
    }

    /// Trigger, read and compensate one temperature/pressure pair
    ///
    /// Pressure is compensated with the fine temperature of the same cycle.
    fn measure(
        &mut self,
        calibration: &CalibrationParameters,
    ) -> Result<Reading, SensorError<B::Error>> {
        self.request_measurement()?;

        let raw_temperature = self.read_raw_temperature()?;
        let temperature = compensate_temperature(raw_temperature, calibration);

        let raw_pressure = self.read_raw_pressure()?;
        let pressure =
            compensate_pressure_checked(raw_pressure, temperature.t_fine, calibration)
                .unwrap_or_else(|| {
                    warn!("bme280: pressure divisor is zero, reporting 0 Pa");
                    0
                });

        Ok(Reading::new(temperature.centi_celsius, pressure))
    }

    fn read_raw(&mut self, register: u8) -> Result<u32, B::Error> {
        let mut bytes = [0u8; RAW_SAMPLE_LEN];
        self.bus.read_registers(self.address, register, &mut bytes)?;
        Ok(raw_sample(bytes))
    }
}

impl<B: RegisterBus> BarometricSensor for Bme280<B> {
    type Error = SensorError<B::Error>;

    fn read(&mut self) -> Result<Reading, Self::Error> {
        Bme280::read(self)
    }
}
