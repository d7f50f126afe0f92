//! Two-wire serial interface controller
//!
//! Register-level view of a byte-oriented two-wire master peripheral: a
//! control register that launches one bus action at a time, a completion
//! flag, a data register and a status register whose upper five bits carry
//! the protocol status code.

/// Control register bits
pub mod control {
    /// Interrupt flag: written 1 to launch an action, reads 1 once it completes
    pub const INT: u8 = 0b1000_0000;
    /// Acknowledge the next received byte
    pub const ACK: u8 = 0b0100_0000;
    /// Generate a start (or repeated start) condition
    pub const START: u8 = 0b0010_0000;
    /// Generate a stop condition; reads 1 until the stop is on the bus
    pub const STOP: u8 = 0b0001_0000;
    /// Peripheral enable
    pub const ENABLE: u8 = 0b0000_0100;
}

/// Mask selecting the status code from the status register
pub const STATUS_MASK: u8 = 0b1111_1000;

/// One bus action launched through the control register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiCommand {
    /// Start or repeated start condition
    Start,
    /// Stop condition
    Stop,
    /// Transmit the byte held in the data register
    Transmit,
    /// Receive a byte and acknowledge it
    ReceiveAck,
    /// Receive a byte without acknowledging it (last byte of a read)
    ReceiveNack,
}

impl TwiCommand {
    /// Raw control register value for this action
    pub const fn control_bits(self) -> u8 {
        use control::*;
        match self {
            TwiCommand::Start => INT | START | ENABLE,
            TwiCommand::Stop => INT | STOP | ENABLE,
            TwiCommand::Transmit | TwiCommand::ReceiveNack => INT | ENABLE,
            TwiCommand::ReceiveAck => INT | ACK | ENABLE,
        }
    }
}

/// Bit-rate prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    #[default]
    Div1,
    Div4,
    Div16,
    Div64,
}

impl Prescaler {
    /// All prescalers, smallest first
    pub const ALL: [Prescaler; 4] = [
        Prescaler::Div1,
        Prescaler::Div4,
        Prescaler::Div16,
        Prescaler::Div64,
    ];

    /// Value of the prescaler bits in the status register
    pub const fn bits(self) -> u8 {
        match self {
            Prescaler::Div1 => 0b00,
            Prescaler::Div4 => 0b01,
            Prescaler::Div16 => 0b10,
            Prescaler::Div64 => 0b11,
        }
    }

    /// Division factor
    pub const fn factor(self) -> u32 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div4 => 4,
            Prescaler::Div16 => 16,
            Prescaler::Div64 => 64,
        }
    }
}

/// Clock generator settings
///
/// SCL frequency = CPU clock / (16 + 2 * divisor * prescaler)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitRate {
    pub prescaler: Prescaler,
    pub divisor: u8,
}

/// Two-wire controller register block
///
/// Every action is asynchronous at the hardware level: [`issue`] only
/// launches it, and completion must be observed through [`is_complete`]
/// (or [`stop_pending`] for stop conditions).
///
/// [`issue`]: TwiController::issue
/// [`is_complete`]: TwiController::is_complete
/// [`stop_pending`]: TwiController::stop_pending
pub trait TwiController {
    /// Program the clock generator
    fn configure(&mut self, bit_rate: BitRate);

    /// Enable the peripheral
    fn enable(&mut self);

    /// Launch a bus action
    fn issue(&mut self, command: TwiCommand);

    /// Check whether the last launched action has completed
    fn is_complete(&self) -> bool;

    /// Check whether a stop condition is still waiting to be asserted
    fn stop_pending(&self) -> bool;

    /// Load the data register for the next transmit
    fn load_data(&mut self, byte: u8);

    /// Read the data register (last received byte)
    fn data(&self) -> u8;

    /// Raw status register, including prescaler bits
    fn raw_status(&self) -> u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_bits_match_controller_layout() {
        assert_eq!(TwiCommand::Start.control_bits(), 0b1010_0100);
        assert_eq!(TwiCommand::Stop.control_bits(), 0b1001_0100);
        assert_eq!(TwiCommand::Transmit.control_bits(), 0b1000_0100);
        assert_eq!(TwiCommand::ReceiveAck.control_bits(), 0b1100_0100);
        assert_eq!(TwiCommand::ReceiveNack.control_bits(), 0b1000_0100);
    }

    #[test]
    fn test_register_values_for_default_bus() {
        // Enable alone, no action launched
        assert_eq!(control::ENABLE, 0x04);
        // Prescaler 1 leaves TWPS cleared
        assert_eq!(Prescaler::Div1.bits(), 0x00);
        assert_eq!(Prescaler::Div64.bits(), 0b11);
    }

    #[test]
    fn test_prescaler_bits_fit_under_status_mask() {
        for prescaler in Prescaler::ALL {
            assert_eq!(prescaler.bits() & STATUS_MASK, 0);
        }
    }
}
