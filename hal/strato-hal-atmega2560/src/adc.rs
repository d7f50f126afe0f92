//! Analog-to-digital converter (ADMUX/ADCSRA/ADCSRB/ADC)

use avr_device::atmega2560::ADC;
use strato_hal::adc::AdcRegisters;

/// ADC register block
pub struct Adc {
    adc: ADC,
}

impl Adc {
    pub fn new(adc: ADC) -> Self {
        Self { adc }
    }

    /// Give back the peripheral
    pub fn release(self) -> ADC {
        self.adc
    }
}

impl AdcRegisters for Adc {
    fn mux(&self) -> u8 {
        self.adc.admux.read().bits()
    }

    fn set_mux(&mut self, value: u8) {
        self.adc.admux.write(|w| unsafe { w.bits(value) });
    }

    fn control_a(&self) -> u8 {
        self.adc.adcsra.read().bits()
    }

    fn set_control_a(&mut self, value: u8) {
        self.adc.adcsra.write(|w| unsafe { w.bits(value) });
    }

    fn control_b(&self) -> u8 {
        self.adc.adcsrb.read().bits()
    }

    fn set_control_b(&mut self, value: u8) {
        self.adc.adcsrb.write(|w| unsafe { w.bits(value) });
    }

    fn result(&self) -> u16 {
        // 16-bit access reads ADCL first, which latches ADCH
        self.adc.adc.read().bits()
    }
}
