//! Device state
//!
//! The single record the register map reads and writes. It is owned by the
//! firmware control loop and lent to the transaction state machine for the
//! duration of one transaction.

pub mod bits;
pub mod device;

pub use bits::{ExpansionLines, PowerStatus};
pub use device::{DeviceState, InputKind, SensorReadings, NUM_CHANNELS, NUM_SOURCES};
