//! Shared device state
//!
//! The I2C task and the sensor task both touch the device state. The I2C
//! task holds the lock for a whole transaction, so every register read in
//! it sees the result of exactly one sensor refresh.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

use preamp_core::DeviceState;

/// Device state shared between the I2C and sensor tasks
pub static DEVICE_STATE: Mutex<CriticalSectionRawMutex, DeviceState> =
    Mutex::new(DeviceState::new());
