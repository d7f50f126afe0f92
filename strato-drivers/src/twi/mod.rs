//! Two-wire bus master
//!
//! A blocking master for a register-level two-wire controller. Every bus
//! action is a round trip: launch it, wait (bounded) for the completion
//! flag, then compare the status code with the one the protocol step
//! requires. The first mismatch aborts the whole operation.
//!
//! ```text
//! Idle ─► Started ─► AddressSent ─► DataPhase ─┬─► Stopped
//!           ▲                          │  ▲    │
//!           └──── repeated start ◄─────┘  └────┘
//! ```
//!
//! Device-level operations ([`TwiMaster::write_register`],
//! [`TwiMaster::read_register`], [`TwiMaster::read_burst`]) always end with
//! a stop condition, including when they abort.

mod error;
mod i2c;
mod master;
mod shared;
mod status;

pub use error::TwiError;
pub use master::{bit_rate, TwiMaster};
pub use shared::SharedTwi;
pub use status::{BusPhase, Direction, Status};
