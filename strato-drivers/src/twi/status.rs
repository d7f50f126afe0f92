//! Protocol status codes and bus phases

/// Status code reported by the controller after each bus action
///
/// Values are the upper five bits of the status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Illegal start or stop condition (0x00)
    BusError,
    /// Start condition transmitted (0x08)
    Start,
    /// Repeated start condition transmitted (0x10)
    RepeatedStart,
    /// Address + write sent, ACK received (0x18)
    AddressWriteAck,
    /// Address + write sent, NACK received (0x20)
    AddressWriteNack,
    /// Data byte sent, ACK received (0x28)
    DataWriteAck,
    /// Data byte sent, NACK received (0x30)
    DataWriteNack,
    /// Arbitration lost to another master (0x38)
    ArbitrationLost,
    /// Address + read sent, ACK received (0x40)
    AddressReadAck,
    /// Address + read sent, NACK received (0x48)
    AddressReadNack,
    /// Data byte received, ACK returned (0x50)
    DataReadAck,
    /// Data byte received, NACK returned (0x58)
    DataReadNack,
    /// No relevant state information (0xF8)
    NoInfo,
    /// Any other code
    Unknown(u8),
}

impl Status {
    /// Decode a masked status code
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x00 => Status::BusError,
            0x08 => Status::Start,
            0x10 => Status::RepeatedStart,
            0x18 => Status::AddressWriteAck,
            0x20 => Status::AddressWriteNack,
            0x28 => Status::DataWriteAck,
            0x30 => Status::DataWriteNack,
            0x38 => Status::ArbitrationLost,
            0x40 => Status::AddressReadAck,
            0x48 => Status::AddressReadNack,
            0x50 => Status::DataReadAck,
            0x58 => Status::DataReadNack,
            0xF8 => Status::NoInfo,
            other => Status::Unknown(other),
        }
    }

    /// Raw status code
    pub const fn code(self) -> u8 {
        match self {
            Status::BusError => 0x00,
            Status::Start => 0x08,
            Status::RepeatedStart => 0x10,
            Status::AddressWriteAck => 0x18,
            Status::AddressWriteNack => 0x20,
            Status::DataWriteAck => 0x28,
            Status::DataWriteNack => 0x30,
            Status::ArbitrationLost => 0x38,
            Status::AddressReadAck => 0x40,
            Status::AddressReadNack => 0x48,
            Status::DataReadAck => 0x50,
            Status::DataReadNack => 0x58,
            Status::NoInfo => 0xF8,
            Status::Unknown(code) => code,
        }
    }
}

/// Where the master is within a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusPhase {
    /// No transaction since initialization
    #[default]
    Idle,
    /// Start or repeated start issued
    Started,
    /// Address byte sent
    AddressSent,
    /// Data bytes flowing
    DataPhase,
    /// Stop issued
    Stopped,
}

impl BusPhase {
    /// Whether a transaction is open on the bus
    pub const fn in_transaction(self) -> bool {
        matches!(
            self,
            BusPhase::Started | BusPhase::AddressSent | BusPhase::DataPhase
        )
    }
}

/// Transfer direction encoded in the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Write,
    Read,
}

impl Direction {
    /// Address byte for a 7-bit address in this direction
    pub const fn header(self, address: u8) -> u8 {
        match self {
            Direction::Write => address << 1,
            Direction::Read => (address << 1) | 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for code in [
            0x00, 0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0x40, 0x48, 0x50, 0x58, 0xF8,
        ] {
            let status = Status::from_code(code);
            assert!(!matches!(status, Status::Unknown(_)));
            assert_eq!(status.code(), code);
        }
        assert_eq!(Status::from_code(0x60), Status::Unknown(0x60));
    }

    #[test]
    fn test_address_headers() {
        assert_eq!(Direction::Write.header(0x77), 0xEE);
        assert_eq!(Direction::Read.header(0x77), 0xEF);
    }
}
