//! Sensor drivers
//!
//! Drivers here talk to devices through [`RegisterBus`](strato_hal::RegisterBus),
//! so the same driver runs on the native two-wire master, a shared handle
//! or any `embedded-hal` I2C implementation via [`I2cRegisterBus`].

pub mod bme280;
pub mod bus;

pub use bme280::Bme280;
pub use bus::I2cRegisterBus;
