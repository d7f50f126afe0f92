//! ADC channel management
//!
//! The converter multiplexes 16 single-ended inputs. Channel selection is
//! split across two registers: the low three bits live in the multiplexer
//! register, the fourth selects the upper bank in control register B.

/// Number of single-ended input channels
pub const CHANNEL_COUNT: u8 = 16;

/// ADC channel identifier (0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcChannel(u8);

impl AdcChannel {
    /// Create a channel, rejecting indices above 15
    pub const fn new(index: u8) -> Option<Self> {
        if index < CHANNEL_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Channel index
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Low multiplexer bits (MUX2:0)
    pub const fn mux_bits(self) -> u8 {
        self.0 & 0b0000_0111
    }

    /// Whether the channel sits in the upper bank (8-15)
    pub const fn high_bank(self) -> bool {
        self.0 & 0b0000_1000 != 0
    }
}

/// Blocking ADC collaborator
pub trait AdcReader {
    /// Error type for conversions
    type Error;

    /// Set reference, clock prescaler and enable the converter
    fn configure(&mut self);

    /// Run one conversion and return the right-aligned sample
    fn read(&mut self, channel: AdcChannel) -> Result<u16, Self::Error>;
}

/// ADC register block
pub trait AdcRegisters {
    /// Multiplexer selection register (reference + MUX bits)
    fn mux(&self) -> u8;
    fn set_mux(&mut self, value: u8);

    /// Control and status register A (enable, start, prescaler)
    fn control_a(&self) -> u8;
    fn set_control_a(&mut self, value: u8);

    /// Control and status register B (upper bank select)
    fn control_b(&self) -> u8;
    fn set_control_b(&mut self, value: u8);

    /// Conversion result; implementations must read the low byte first
    fn result(&self) -> u16;
}
