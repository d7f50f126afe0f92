//! Bus errors

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use super::status::{BusPhase, Status};

/// Errors from two-wire bus operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiError {
    /// The controller reported a status other than the one the protocol
    /// step requires; the operation was aborted at that step
    UnexpectedStatus {
        expected: Status,
        got: Status,
        phase: BusPhase,
    },
    /// A completion flag did not come up before the deadline
    BusTimeout { phase: BusPhase },
    /// A primitive was called in a phase where it cannot apply
    OutOfSequence { phase: BusPhase },
    /// `initialize()` has not been called
    NotInitialized,
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
    /// Burst length exceeds the result buffer
    BurstTooLong { requested: usize, capacity: usize },
}

impl TwiError {
    /// Whether another master won arbitration
    pub fn is_arbitration_lost(&self) -> bool {
        matches!(
            self,
            TwiError::UnexpectedStatus {
                got: Status::ArbitrationLost,
                ..
            }
        )
    }

    /// Whether the addressed device did not acknowledge
    pub fn is_nack(&self) -> bool {
        matches!(
            self,
            TwiError::UnexpectedStatus {
                got: Status::AddressWriteNack | Status::AddressReadNack | Status::DataWriteNack,
                ..
            }
        )
    }
}

impl embedded_hal::i2c::Error for TwiError {
    fn kind(&self) -> ErrorKind {
        match self {
            TwiError::UnexpectedStatus { got, .. } => match got {
                Status::AddressWriteNack | Status::AddressReadNack => {
                    ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
                }
                Status::DataWriteNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
                Status::ArbitrationLost => ErrorKind::ArbitrationLoss,
                Status::BusError => ErrorKind::Bus,
                _ => ErrorKind::Other,
            },
            _ => ErrorKind::Other,
        }
    }
}
