//! Slave bus bring-up

use preamp_hal::gpio::AlternateConfig;
use preamp_hal::i2c::SlaveConfig;
use preamp_hal::{AlternatePin, I2cSlave, PeripheralClock};

use super::address::SlaveAddress;

/// Alternate function routing I2C1 onto its bus pins
pub const I2C_ALTERNATE_FUNCTION: u8 = 1;

/// Hardware needed to bring up the slave bus
pub struct BusParts<K, Scl, Sda, S> {
    /// Peripheral clock gate
    pub clock: K,
    /// Clock line
    pub scl: Scl,
    /// Data line
    pub sda: Sda,
    /// The I2C peripheral itself
    pub slave: S,
}

/// Slave-mode configuration for the controller bus
pub const fn slave_config(address: SlaveAddress) -> SlaveConfig {
    SlaveConfig {
        own_address: address.shifted(),
        analog_filter: true,
        digital_filter: 0,
        acknowledge: true,
        // Address and data flags are serviced by polling; the clock stretch
        // is what holds the master until the firmware gets there.
        clock_stretching: true,
    }
}

/// Configure the I2C peripheral as a slave at `address` and enable it
///
/// Enables the peripheral clock, muxes both lines as open-drain with no
/// pull resistors (the bus has external pull-ups), applies the slave
/// configuration and turns the peripheral on. Register writes cannot fail,
/// so neither can this; a wiring fault only shows up as transactions that
/// never arrive.
pub fn initialize<K, Scl, Sda, S>(parts: BusParts<K, Scl, Sda, S>, address: SlaveAddress) -> S
where
    K: PeripheralClock,
    Scl: AlternatePin,
    Sda: AlternatePin,
    S: I2cSlave,
{
    let BusParts {
        mut clock,
        mut scl,
        mut sda,
        mut slave,
    } = parts;

    clock.enable();

    let line = AlternateConfig::i2c_line(I2C_ALTERNATE_FUNCTION);
    scl.set_alternate(line);
    sda.set_alternate(line);

    slave.configure(&slave_config(address));
    slave.enable();

    #[cfg(feature = "defmt")]
    defmt::info!("I2C slave listening at 0x{=u8:02x}", address.seven_bit());

    slave
}
