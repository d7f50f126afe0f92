//! Shared bus handle
//!
//! Several device drivers can sit on one physical bus, but two interleaved
//! transactions would corrupt the framing. [`SharedTwi`] serializes access
//! by holding a mutex for the whole of each device-level operation.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use strato_hal::i2c::RegisterBus;
use strato_hal::poll::PollDeadline;
use strato_hal::twi::TwiController;

use super::error::TwiError;
use super::master::TwiMaster;

/// Per-device handle to a mutex-guarded [`TwiMaster`]
///
/// # Example
///
/// ```ignore
/// use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
/// use embassy_sync::blocking_mutex::Mutex;
///
/// let bus: Mutex<CriticalSectionRawMutex, _> = Mutex::new(RefCell::new(master));
/// let mut barometer = Bme280::new(SharedTwi::new(&bus), 0x77);
/// let mut other = SomeDriver::new(SharedTwi::new(&bus));
/// ```
pub struct SharedTwi<'a, M: RawMutex, C, D> {
    bus: &'a Mutex<M, RefCell<TwiMaster<C, D>>>,
}

impl<'a, M: RawMutex, C, D> SharedTwi<'a, M, C, D> {
    /// Create a new handle
    #[inline]
    pub const fn new(bus: &'a Mutex<M, RefCell<TwiMaster<C, D>>>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, C: TwiController, D: PollDeadline> SharedTwi<'_, M, C, D> {
    fn with_bus<R>(&mut self, f: impl FnOnce(&mut TwiMaster<C, D>) -> R) -> R {
        self.bus.lock(|cell| f(&mut *cell.borrow_mut()))
    }
}

impl<M: RawMutex, C: TwiController, D: PollDeadline> RegisterBus for SharedTwi<'_, M, C, D> {
    type Error = TwiError;

    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.with_bus(|bus| bus.write_register(address, register, value))
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.with_bus(|bus| bus.read_into(address, register, buf))
    }

    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        self.with_bus(|bus| bus.read_register(address, register))
    }
}

impl<M: RawMutex, C: TwiController, D: PollDeadline> ErrorType for SharedTwi<'_, M, C, D> {
    type Error = TwiError;
}

impl<M: RawMutex, C: TwiController, D: PollDeadline> I2c<SevenBitAddress>
    for SharedTwi<'_, M, C, D>
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.with_bus(|bus| I2c::transaction(bus, address, operations))
    }
}
