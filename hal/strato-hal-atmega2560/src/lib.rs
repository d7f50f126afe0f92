//! ATmega2560 implementations of the Strato HAL traits
//!
//! Thin wrappers that own a peripheral from the device crate and expose
//! its registers through the `strato-hal` traits:
//!
//! - [`Twi`] implements [`TwiController`](strato_hal::TwiController)
//! - [`Adc`] implements [`AdcRegisters`](strato_hal::AdcRegisters)
//!
//! ```ignore
//! let dp = avr_device::atmega2560::Peripherals::take().unwrap();
//! let mut bus = TwiMaster::new(Twi::new(dp.TWI), TwiConfig::default());
//! bus.initialize();
//! let mut adc = RegisterAdc::new(Adc::new(dp.ADC));
//! adc.configure();
//! ```

#![no_std]

pub mod adc;
pub mod twi;

pub use adc::Adc;
pub use twi::Twi;
