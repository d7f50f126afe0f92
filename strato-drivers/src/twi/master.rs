//! Blocking two-wire master

use heapless::Vec;
use strato_core::config::TwiConfig;
use strato_hal::poll::{PollBudget, PollDeadline};
use strato_hal::twi::{BitRate, Prescaler, TwiCommand, TwiController, STATUS_MASK};

use super::error::TwiError;
use super::status::{BusPhase, Direction, Status};

/// Clock generator settings for a bus configuration
///
/// Picks the smallest prescaler whose divisor fits in eight bits. A bus
/// speed no prescaler can reach falls back to the slowest setting.
pub fn bit_rate(config: &TwiConfig) -> BitRate {
    for prescaler in Prescaler::ALL {
        if let Some(divisor) = config.divisor_for(prescaler.factor()) {
            return BitRate { prescaler, divisor };
        }
    }
    BitRate {
        prescaler: Prescaler::Div64,
        divisor: u8::MAX,
    }
}

/// Two-wire bus master
///
/// Owns the controller, so all access to the physical bus goes through one
/// handle. Use [`SharedTwi`](super::SharedTwi) to hand the bus to several
/// device drivers.
pub struct TwiMaster<C, D = PollBudget> {
    controller: C,
    deadline: D,
    config: TwiConfig,
    phase: BusPhase,
    initialized: bool,
}

impl<C: TwiController> TwiMaster<C, PollBudget> {
    /// Create a master whose waits are bounded by `config.poll_limit` polls
    pub fn new(controller: C, config: TwiConfig) -> Self {
        let deadline = PollBudget::new(config.poll_limit);
        Self::with_deadline(controller, deadline, config)
    }
}

impl<C: TwiController, D: PollDeadline> TwiMaster<C, D> {
    /// Create a master with a custom wait deadline
    pub fn with_deadline(controller: C, deadline: D, config: TwiConfig) -> Self {
        Self {
            controller,
            deadline,
            config,
            phase: BusPhase::Idle,
            initialized: false,
        }
    }

    /// Current transaction phase
    pub fn phase(&self) -> BusPhase {
        self.phase
    }

    /// Bus configuration
    pub fn config(&self) -> &TwiConfig {
        &self.config
    }

    /// Whether [`initialize`](Self::initialize) has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Give back the controller and deadline
    pub fn release(self) -> (C, D) {
        (self.controller, self.deadline)
    }

    /// Program the clock generator and enable the peripheral
    ///
    /// Must run before any other operation. Calling it again reprograms the
    /// same values.
    pub fn initialize(&mut self) {
        let rate = bit_rate(&self.config);
        self.controller.configure(rate);
        self.controller.enable();
        self.phase = BusPhase::Idle;
        self.initialized = true;
        debug!(
            "twi: {} Hz, prescaler {}, divisor {}",
            self.config.bus_hz,
            rate.prescaler.factor(),
            rate.divisor
        );
    }

    // ========================================================================
    // Protocol primitives
    // ========================================================================

    /// Issue a start condition and wait for it to complete
    pub fn begin_transaction(&mut self) -> Result<(), TwiError> {
        self.ensure_initialized()?;
        if self.phase.in_transaction() {
            return Err(TwiError::OutOfSequence { phase: self.phase });
        }
        self.phase = BusPhase::Started;
        self.launch(TwiCommand::Start)
    }

    /// Issue a repeated start inside an open transaction
    pub fn begin_repeated(&mut self) -> Result<(), TwiError> {
        self.ensure_initialized()?;
        if !matches!(self.phase, BusPhase::AddressSent | BusPhase::DataPhase) {
            return Err(TwiError::OutOfSequence { phase: self.phase });
        }
        self.phase = BusPhase::Started;
        self.launch(TwiCommand::Start)
    }

    /// Issue a stop condition and wait until it is on the bus
    pub fn end_transaction(&mut self) -> Result<(), TwiError> {
        self.ensure_initialized()?;
        self.phase = BusPhase::Stopped;
        self.controller.issue(TwiCommand::Stop);
        self.wait_until(|c: &C| !c.stop_pending())
    }

    /// Transmit one byte (address or data) and wait for completion
    pub fn write_byte(&mut self, byte: u8) -> Result<(), TwiError> {
        self.ensure_initialized()?;
        self.phase = match self.phase {
            BusPhase::Started => BusPhase::AddressSent,
            BusPhase::AddressSent | BusPhase::DataPhase => BusPhase::DataPhase,
            phase => return Err(TwiError::OutOfSequence { phase }),
        };
        self.controller.load_data(byte);
        self.launch(TwiCommand::Transmit)
    }

    /// Receive one byte, acknowledging it if `ack` is set
    pub fn read_byte(&mut self, ack: bool) -> Result<u8, TwiError> {
        self.ensure_initialized()?;
        if !matches!(self.phase, BusPhase::AddressSent | BusPhase::DataPhase) {
            return Err(TwiError::OutOfSequence { phase: self.phase });
        }
        self.phase = BusPhase::DataPhase;
        let command = if ack {
            TwiCommand::ReceiveAck
        } else {
            TwiCommand::ReceiveNack
        };
        self.launch(command)?;
        Ok(self.controller.data())
    }

    /// Current protocol status, prescaler bits masked off
    pub fn status(&self) -> Status {
        Status::from_code(self.controller.raw_status() & STATUS_MASK)
    }

    // ========================================================================
    // Device-level operations
    // ========================================================================

    /// Write one byte to a device register
    pub fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), TwiError> {
        check_address(address)?;
        self.with_transaction(|bus| {
            bus.select_register(address, register)?;
            bus.transmit_all(&[value])
        })
    }

    /// Read one byte from a device register
    pub fn read_register(&mut self, address: u8, register: u8) -> Result<u8, TwiError> {
        check_address(address)?;
        self.with_transaction(|bus| {
            bus.select_register(address, register)?;
            bus.open(address, Direction::Read, true)?;
            let byte = bus.read_byte(false)?;
            bus.expect(Status::DataReadNack)?;
            Ok(byte)
        })
    }

    /// Read consecutive registers into `buf`
    ///
    /// Every byte but the last is acknowledged.
    pub fn read_into(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), TwiError> {
        check_address(address)?;
        self.with_transaction(|bus| {
            bus.select_register(address, register)?;
            bus.open(address, Direction::Read, true)?;
            bus.receive_into(buf, true)
        })
    }

    /// Read `count` consecutive registers
    pub fn read_burst<const N: usize>(
        &mut self,
        address: u8,
        register: u8,
        count: usize,
    ) -> Result<Vec<u8, N>, TwiError> {
        if count > N {
            return Err(TwiError::BurstTooLong {
                requested: count,
                capacity: N,
            });
        }
        let mut bytes = Vec::new();
        bytes
            .resize(count, 0)
            .map_err(|_| TwiError::BurstTooLong {
                requested: count,
                capacity: N,
            })?;
        self.read_into(address, register, &mut bytes[..])?;
        Ok(bytes)
    }

    // ========================================================================
    // Building blocks
    // ========================================================================

    /// Run `body` as one transaction, issuing a stop on every exit path
    ///
    /// An abort error takes precedence over a failure of the closing stop.
    pub(crate) fn with_transaction<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, TwiError>,
    ) -> Result<T, TwiError> {
        self.ensure_initialized()?;
        let outcome = body(self);
        let stopped = self.end_transaction();
        match (outcome, stopped) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(stop_error)) => {
                error!("twi: stop after abort failed: {}", stop_error);
                Err(e)
            }
        }
    }

    /// Start (or restart) and address a device
    pub(crate) fn open(
        &mut self,
        address: u8,
        direction: Direction,
        repeated: bool,
    ) -> Result<(), TwiError> {
        if repeated {
            self.begin_repeated()?;
            self.expect(Status::RepeatedStart)?;
        } else {
            self.begin_transaction()?;
            self.expect(Status::Start)?;
        }
        self.write_byte(direction.header(address))?;
        match direction {
            Direction::Write => self.expect(Status::AddressWriteAck),
            Direction::Read => self.expect(Status::AddressReadAck),
        }
    }

    /// Open a write to `address` and send the register pointer
    fn select_register(&mut self, address: u8, register: u8) -> Result<(), TwiError> {
        self.open(address, Direction::Write, false)?;
        self.transmit_all(&[register])
    }

    /// Send data bytes, each of which must be acknowledged
    pub(crate) fn transmit_all(&mut self, bytes: &[u8]) -> Result<(), TwiError> {
        for &byte in bytes {
            self.write_byte(byte)?;
            self.expect(Status::DataWriteAck)?;
        }
        Ok(())
    }

    /// Receive into `buf`; the final byte is NACKed when `nack_last` is set
    pub(crate) fn receive_into(&mut self, buf: &mut [u8], nack_last: bool) -> Result<(), TwiError> {
        let last = buf.len().saturating_sub(1);
        for (index, slot) in buf.iter_mut().enumerate() {
            let ack = !(nack_last && index == last);
            *slot = self.read_byte(ack)?;
            if ack {
                self.expect(Status::DataReadAck)?;
            } else {
                self.expect(Status::DataReadNack)?;
            }
        }
        Ok(())
    }

    /// Compare the current status with the one the protocol step requires
    fn expect(&self, expected: Status) -> Result<(), TwiError> {
        let got = self.status();
        if got == expected {
            return Ok(());
        }
        warn!(
            "twi: expected {} got {} in {}",
            expected.code(),
            got.code(),
            self.phase
        );
        Err(TwiError::UnexpectedStatus {
            expected,
            got,
            phase: self.phase,
        })
    }

    fn ensure_initialized(&self) -> Result<(), TwiError> {
        if self.initialized {
            Ok(())
        } else {
            Err(TwiError::NotInitialized)
        }
    }

    /// Launch an action and wait for its completion flag
    fn launch(&mut self, command: TwiCommand) -> Result<(), TwiError> {
        trace!("twi: {} in {}", command, self.phase);
        self.controller.issue(command);
        self.wait_until(C::is_complete)
    }

    fn wait_until(&mut self, done: fn(&C) -> bool) -> Result<(), TwiError> {
        self.deadline.restart();
        while !done(&self.controller) {
            if self.deadline.expired() {
                warn!("twi: timeout in {}", self.phase);
                return Err(TwiError::BusTimeout { phase: self.phase });
            }
        }
        Ok(())
    }
}

pub(crate) fn check_address(address: u8) -> Result<(), TwiError> {
    if address > 0x7F {
        return Err(TwiError::InvalidAddress(address));
    }
    Ok(())
}
