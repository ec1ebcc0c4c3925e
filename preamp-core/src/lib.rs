//! Board-agnostic core logic for the preamp register firmware
//!
//! This crate contains everything that does not depend on a specific chip:
//!
//! - Device state and the bit-packed views over it
//! - The register address table and register map
//! - The control-layer trait register writes are dispatched to
//! - Slave bus initialization and the per-transaction state machine
//! - Firmware identity bytes

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;
pub mod registers;
pub mod state;
pub mod traits;
pub mod version;

pub use i2c::{initialize, SlaveAddress, Transaction};
pub use registers::{Register, RegisterFile, RegisterMap};
pub use state::DeviceState;
pub use version::FirmwareVersion;
