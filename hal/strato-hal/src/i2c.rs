//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by bus drivers and consumed by device drivers.

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Register-oriented device access
///
/// The shape most sensors expose: a register pointer followed by one or
/// more data bytes. Device drivers only talk to the bus through this trait
/// and never see the underlying protocol.
pub trait RegisterBus {
    /// Error type for register operations
    type Error;

    /// Write a single byte to a device register
    ///
    /// Either the whole write is acknowledged or an error is returned;
    /// a partially transferred write is never reported as success.
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Read `buf.len()` consecutive bytes starting at `register`
    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Read a single register
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut byte = [0u8; 1];
        self.read_registers(address, register, &mut byte)?;
        Ok(byte[0])
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        T::write_register(self, address, register, value)
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::read_registers(self, address, register, buf)
    }

    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        T::read_register(self, address, register)
    }
}
