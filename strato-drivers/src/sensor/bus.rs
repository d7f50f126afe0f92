//! Register access over an `embedded-hal` I2C bus

use embedded_hal::i2c::I2c;
use strato_hal::i2c::RegisterBus;

/// Adapts any [`I2c`] implementation to [`RegisterBus`]
///
/// Register reads are a pointer write followed by a repeated-start read,
/// which is what `write_read` does.
pub struct I2cRegisterBus<I> {
    i2c: I,
}

impl<I: I2c> I2cRegisterBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give back the wrapped bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cRegisterBus<I> {
    type Error = I::Error;

    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(address, &[register, value])
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], buf)
    }
}
