//! I2C slave protocol
//!
//! Bus bring-up and the per-transaction state machine for the single-byte,
//! register-addressed protocol:
//!
//! ```text
//! read:  START, ADDR+W, REG, RESTART, ADDR+R, DATA, NACK, STOP
//! write: START, ADDR+W, REG, DATA, STOP
//! ```
//!
//! Exactly one data byte moves per transaction. There is no register
//! auto-increment and no burst transfer.

pub mod address;
pub mod init;
pub mod transaction;
pub mod wait;

#[cfg(test)]
pub(crate) mod sim;

pub use address::{AddressError, SlaveAddress};
pub use init::{initialize, BusParts, I2C_ALTERNATE_FUNCTION};
pub use transaction::{transact, BusEvent, Phase, Transaction};
pub use wait::{poll_until, SpinBudget, SpinForever, Stalled, WaitPolicy};
