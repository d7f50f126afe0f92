//! Configuration types
//!
//! Board-agnostic configuration structures, optionally stored as postcard
//! binary data.

pub mod bus;
pub mod sensor;
pub mod stored;

pub use bus::*;
pub use sensor::*;
pub use stored::*;
