//! Register-level ADC driver
//!
//! Single-conversion mode on a 10-bit successive-approximation converter
//! with AVcc as reference. The conversion start bit doubles as the busy
//! flag: hardware clears it once the result is ready.

use strato_hal::adc::{AdcChannel, AdcReader, AdcRegisters};
use strato_hal::poll::{PollBudget, PollDeadline};

/// Multiplexer: AVcc reference, channel bits cleared
const MUX_REFERENCE_AVCC: u8 = 0b0100_0000;
/// Multiplexer bits kept when switching channel (reference + alignment)
const MUX_KEEP: u8 = 0b1110_0000;
/// Control A: enable, prescaler 128
const CONTROL_A_ENABLE: u8 = 0b1000_0111;
/// Control A: start conversion, reads 1 while converting
const CONTROL_A_START: u8 = 0b0100_0000;
/// Control B: upper channel bank
const CONTROL_B_HIGH_BANK: u8 = 0b0000_1000;

/// Polls allowed for one conversion when no deadline is supplied
pub const DEFAULT_CONVERSION_POLLS: u32 = 10_000;

/// ADC driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Conversion did not finish before the deadline
    Timeout { channel: AdcChannel },
}

/// ADC driven through its register block
pub struct RegisterAdc<R, D = PollBudget> {
    registers: R,
    deadline: D,
}

impl<R: AdcRegisters> RegisterAdc<R, PollBudget> {
    pub fn new(registers: R) -> Self {
        Self::with_deadline(registers, PollBudget::new(DEFAULT_CONVERSION_POLLS))
    }
}

impl<R: AdcRegisters, D: PollDeadline> RegisterAdc<R, D> {
    pub fn with_deadline(registers: R, deadline: D) -> Self {
        Self {
            registers,
            deadline,
        }
    }

    /// Give back the register block and deadline
    pub fn release(self) -> (R, D) {
        (self.registers, self.deadline)
    }

    fn select(&mut self, channel: AdcChannel) {
        let control_b = self.registers.control_b();
        let control_b = if channel.high_bank() {
            control_b | CONTROL_B_HIGH_BANK
        } else {
            control_b & !CONTROL_B_HIGH_BANK
        };
        self.registers.set_control_b(control_b);

        let mux = (self.registers.mux() & MUX_KEEP) | channel.mux_bits();
        self.registers.set_mux(mux);
    }
}

impl<R: AdcRegisters, D: PollDeadline> AdcReader for RegisterAdc<R, D> {
    type Error = AdcError;

    fn configure(&mut self) {
        self.registers.set_mux(MUX_REFERENCE_AVCC);
        self.registers.set_control_a(CONTROL_A_ENABLE);
        self.registers.set_control_b(0);
    }

    fn read(&mut self, channel: AdcChannel) -> Result<u16, AdcError> {
        self.select(channel);

        let control_a = self.registers.control_a();
        self.registers.set_control_a(control_a | CONTROL_A_START);

        self.deadline.restart();
        while self.registers.control_a() & CONTROL_A_START != 0 {
            if self.deadline.expired() {
                warn!("adc: conversion timeout on channel {}", channel.index());
                return Err(AdcError::Timeout { channel });
            }
        }

        Ok(self.registers.result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Register block whose conversions finish after `busy_polls` reads
    #[derive(Default)]
    struct FakeRegisters {
        mux: u8,
        control_a: Cell<u8>,
        control_b: u8,
        busy_polls: Cell<u32>,
        sample: u16,
        converted_mux: Cell<u8>,
    }

    impl AdcRegisters for FakeRegisters {
        fn mux(&self) -> u8 {
            self.mux
        }

        fn set_mux(&mut self, value: u8) {
            self.mux = value;
        }

        fn control_a(&self) -> u8 {
            let value = self.control_a.get();
            if value & CONTROL_A_START != 0 {
                match self.busy_polls.get() {
                    0 => {
                        self.converted_mux.set(self.mux);
                        self.control_a.set(value & !CONTROL_A_START);
                    }
                    n => self.busy_polls.set(n - 1),
                }
            }
            value
        }

        fn set_control_a(&mut self, value: u8) {
            self.control_a.set(value);
        }

        fn control_b(&self) -> u8 {
            self.control_b
        }

        fn set_control_b(&mut self, value: u8) {
            self.control_b = value;
        }

        fn result(&self) -> u16 {
            self.sample
        }
    }

    fn channel(index: u8) -> AdcChannel {
        AdcChannel::new(index).unwrap()
    }

    #[test]
    fn test_configure_sets_reference_and_prescaler() {
        let mut adc = RegisterAdc::new(FakeRegisters {
            control_b: 0xFF,
            ..Default::default()
        });
        adc.configure();

        let (regs, _) = adc.release();
        assert_eq!(regs.mux, 0x40);
        assert_eq!(regs.control_a.get(), 0x87);
        assert_eq!(regs.control_b, 0x00);
    }

    #[test]
    fn test_low_channel_conversion() {
        let mut adc = RegisterAdc::new(FakeRegisters {
            busy_polls: Cell::new(3),
            sample: 0x2A5,
            ..Default::default()
        });
        adc.configure();

        assert_eq!(adc.read(channel(5)), Ok(0x2A5));
        let (regs, _) = adc.release();
        assert_eq!(regs.converted_mux.get(), 0x45);
        assert_eq!(regs.control_b & CONTROL_B_HIGH_BANK, 0);
        assert_eq!(regs.control_a.get(), 0x87);
    }

    #[test]
    fn test_high_bank_channel_sets_control_b() {
        let mut adc = RegisterAdc::new(FakeRegisters::default());
        adc.configure();

        adc.read(channel(13)).unwrap();
        let (regs, budget) = adc.release();
        assert_eq!(regs.converted_mux.get(), 0x45);
        assert_ne!(regs.control_b & CONTROL_B_HIGH_BANK, 0);

        // back to the low bank
        let mut adc = RegisterAdc::with_deadline(regs, budget);
        adc.read(channel(2)).unwrap();
        let (regs, _) = adc.release();
        assert_eq!(regs.control_b & CONTROL_B_HIGH_BANK, 0);
        assert_eq!(regs.converted_mux.get(), 0x42);
    }

    #[test]
    fn test_stuck_conversion_times_out() {
        let mut adc = RegisterAdc::with_deadline(
            FakeRegisters {
                busy_polls: Cell::new(u32::MAX),
                ..Default::default()
            },
            PollBudget::new(4),
        );
        adc.configure();

        assert_eq!(
            adc.read(channel(1)),
            Err(AdcError::Timeout {
                channel: channel(1)
            })
        );
    }
}
