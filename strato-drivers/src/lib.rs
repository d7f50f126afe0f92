//! Hardware driver implementations
//!
//! This crate provides concrete drivers built on the traits defined in
//! strato-hal and the domain logic in strato-core:
//!
//! - Two-wire bus master (start/stop sequencing, status checking, register
//!   access, embedded-hal `I2c`)
//! - Pressure/temperature sensor (calibration, compensated readings)
//! - Register-level ADC
//! - Poll deadlines backed by an `embedded-hal` delay

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod adc;
pub mod poll;
pub mod sensor;
pub mod twi;

#[cfg(test)]
pub(crate) mod sim;
