//! Board configuration
//!
//! Constants compiled from `preamp.toml` and the build environment by
//! `build.rs`. Edit preamp.toml and rebuild to change them.

use preamp_core::{FirmwareVersion, SlaveAddress};

include!(concat!(env!("OUT_DIR"), "/config.rs"));

mod build {
    include!(concat!(env!("OUT_DIR"), "/version.rs"));
}

/// Identity reported through the version and hash registers
pub const FIRMWARE_VERSION: FirmwareVersion = FirmwareVersion::new(
    build::VERSION_MAJOR,
    build::VERSION_MINOR,
    build::GIT_HASH,
    build::GIT_DIRTY,
);

/// Own address on the controller bus
pub const SLAVE_ADDRESS: SlaveAddress = match SlaveAddress::from_7bit(SLAVE_ADDRESS_7BIT) {
    Ok(address) => address,
    Err(_) => panic!("i2c.address is not a 7-bit address"),
};
