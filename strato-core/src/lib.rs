//! Board-agnostic core logic for the Strato sensor stack
//!
//! This crate contains all logic that does not depend on specific hardware:
//!
//! - Sensor traits
//! - Pressure/temperature sensor register map and calibration decoding
//! - Fixed-point compensation formulas
//! - Reading smoothing
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bme280;
pub mod config;
pub mod traits;
