//! Strato Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific register blocks. The drivers in `strato-drivers` are
//! written only against these traits, so the same bus and sensor logic runs
//! on the target and against a simulated controller on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  strato-drivers (sensor, bus, adc)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  strato-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Chip register blocks                   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`twi::TwiController`] - Two-wire serial controller registers
//! - [`i2c::RegisterBus`], [`i2c::I2cBus`] - Device-level bus operations
//! - [`adc::AdcReader`], [`adc::AdcRegisters`] - Analog-to-digital conversion
//! - [`poll::PollDeadline`] - Bounded busy-wait

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod i2c;
pub mod poll;
pub mod twi;

// Re-export key traits at crate root for convenience
pub use adc::{AdcChannel, AdcReader, AdcRegisters};
pub use i2c::{I2cBus, RegisterBus};
pub use poll::{PollBudget, PollDeadline};
pub use twi::{BitRate, Prescaler, TwiCommand, TwiController};
