//! Register map
//!
//! The address-indexed table of accessors that exposes device state over
//! the I2C protocol. Every address in `0x00..=0xFF` resolves either to a
//! [`Register`] or to the unimplemented default (reads `0xFF`, writes are
//! ignored).

pub mod addr;
pub mod map;

pub use addr::{Access, Register, UNIMPLEMENTED};
pub use map::{RegisterFile, RegisterMap};
