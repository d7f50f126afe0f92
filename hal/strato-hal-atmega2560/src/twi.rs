//! Two-wire serial interface (TWBR/TWCR/TWSR/TWDR)

use avr_device::atmega2560::TWI;
use strato_hal::twi::{control, BitRate, TwiCommand, TwiController};

/// Two-wire controller register block
pub struct Twi {
    twi: TWI,
}

impl Twi {
    pub fn new(twi: TWI) -> Self {
        Self { twi }
    }

    /// Give back the peripheral
    pub fn release(self) -> TWI {
        self.twi
    }
}

impl TwiController for Twi {
    fn configure(&mut self, bit_rate: BitRate) {
        // Only TWPS1:0 are writable in TWSR
        self.twi
            .twsr
            .write(|w| unsafe { w.bits(bit_rate.prescaler.bits()) });
        self.twi.twbr.write(|w| unsafe { w.bits(bit_rate.divisor) });
    }

    fn enable(&mut self) {
        self.twi.twcr.write(|w| unsafe { w.bits(control::ENABLE) });
    }

    fn issue(&mut self, command: TwiCommand) {
        self.twi
            .twcr
            .write(|w| unsafe { w.bits(command.control_bits()) });
    }

    fn is_complete(&self) -> bool {
        self.twi.twcr.read().bits() & control::INT != 0
    }

    fn stop_pending(&self) -> bool {
        self.twi.twcr.read().bits() & control::STOP != 0
    }

    fn load_data(&mut self, byte: u8) {
        self.twi.twdr.write(|w| unsafe { w.bits(byte) });
    }

    fn data(&self) -> u8 {
        self.twi.twdr.read().bits()
    }

    fn raw_status(&self) -> u8 {
        self.twi.twsr.read().bits()
    }
}
