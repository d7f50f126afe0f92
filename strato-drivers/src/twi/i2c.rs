//! Bus trait implementations for the master
//!
//! The same protocol building blocks back three interfaces: the
//! register-oriented [`RegisterBus`] used by device drivers, the generic
//! [`I2cBus`], and `embedded-hal`'s [`I2c`] so third-party drivers can run
//! on this master too.

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use strato_hal::i2c::{I2cBus, RegisterBus};
use strato_hal::poll::PollDeadline;
use strato_hal::twi::TwiController;

use super::error::TwiError;
use super::master::{check_address, TwiMaster};
use super::status::Direction;

fn direction_of(operation: &Operation<'_>) -> Direction {
    match operation {
        Operation::Read(_) => Direction::Read,
        Operation::Write(_) => Direction::Write,
    }
}

fn is_empty_read(operation: &Operation<'_>) -> bool {
    matches!(operation, Operation::Read(buf) if buf.is_empty())
}

impl<C: TwiController, D: PollDeadline> ErrorType for TwiMaster<C, D> {
    type Error = TwiError;
}

impl<C: TwiController, D: PollDeadline> I2c<SevenBitAddress> for TwiMaster<C, D> {
    /// Run `operations` as one transaction
    ///
    /// A start opens the transaction, a repeated start separates runs of
    /// different direction, the last byte of each read run is NACKed and a
    /// stop closes it.
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        check_address(address)?;
        if operations.iter().all(is_empty_read) {
            return Ok(());
        }

        self.with_transaction(|bus| {
            let mut previous: Option<Direction> = None;
            for index in 0..operations.len() {
                // a zero-length read has no byte to carry the NACK
                if is_empty_read(&operations[index]) {
                    continue;
                }
                let direction = direction_of(&operations[index]);
                let run_continues = operations[index + 1..]
                    .iter()
                    .find(|op| !is_empty_read(op))
                    .map(direction_of)
                    == Some(direction);

                if previous != Some(direction) {
                    bus.open(address, direction, previous.is_some())?;
                }
                match &mut operations[index] {
                    Operation::Write(bytes) => bus.transmit_all(*bytes)?,
                    Operation::Read(buf) => bus.receive_into(buf, !run_continues)?,
                }
                previous = Some(direction);
            }
            Ok(())
        })
    }
}

impl<C: TwiController, D: PollDeadline> I2cBus for TwiMaster<C, D> {
    type Error = TwiError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        I2c::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        I2c::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        I2c::write_read(self, address, write_data, read_buf)
    }
}

impl<C: TwiController, D: PollDeadline> RegisterBus for TwiMaster<C, D> {
    type Error = TwiError;

    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        TwiMaster::write_register(self, address, register, value)
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.read_into(address, register, buf)
    }

    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        TwiMaster::read_register(self, address, register)
    }
}
