//! Embassy async tasks
//!
//! The I2C task serves the host; the sensor task keeps telemetry fresh.
//! They share the device state through [`crate::state::DEVICE_STATE`].

pub mod i2c;
pub mod sensors;

pub use i2c::i2c_task;
pub use sensors::{sensor_task, SensorInputs};
