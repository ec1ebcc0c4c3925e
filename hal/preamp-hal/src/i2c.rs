//! I2C slave abstractions
//!
//! The register firmware drives the I2C peripheral directly from its
//! status flags, one byte at a time. This trait exposes exactly that
//! surface: a status snapshot, the address-match acknowledge, and the two
//! data registers.

/// Transfer direction as seen from the bus master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master transmits, slave receives
    Write,
    /// Master receives, slave transmits
    Read,
}

/// Snapshot of the slave status flags taken from a single register read
///
/// Every field comes from the same read so that a caller testing several
/// flags never mixes two hardware states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlaveStatus {
    /// Own address was matched (ADDR). Clock is stretched until cleared.
    pub address_matched: bool,
    /// A received byte is waiting in the receive register (RXNE)
    pub rx_not_empty: bool,
    /// The transmit register can accept a byte (TXE)
    pub tx_empty: bool,
    /// Direction of the transfer latched at the last address match (DIR)
    pub direction: Direction,
}

impl SlaveStatus {
    /// Status of an idle, enabled peripheral
    pub const IDLE: Self = Self {
        address_matched: false,
        rx_not_empty: false,
        tx_empty: true,
        direction: Direction::Write,
    };
}

/// Slave-mode configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlaveConfig {
    /// Own 7-bit address, already shifted into bits 7:1
    pub own_address: u8,
    /// Analog noise filter on SCL/SDA
    pub analog_filter: bool,
    /// Digital filter length in peripheral clock cycles (0 = off)
    pub digital_filter: u8,
    /// Acknowledge own address and received bytes
    pub acknowledge: bool,
    /// Allow the peripheral to stretch SCL while flags are pending
    pub clock_stretching: bool,
}

/// I2C peripheral operating in slave mode
pub trait I2cSlave {
    /// Apply slave-mode configuration. The peripheral must be disabled.
    fn configure(&mut self, config: &SlaveConfig);

    /// Enable the peripheral on the bus
    fn enable(&mut self);

    /// Read all status flags at once
    fn status(&self) -> SlaveStatus;

    /// Clear the address-match flag
    ///
    /// This acknowledges the address and releases any clock stretch.
    fn clear_address_match(&mut self);

    /// Pop the received byte (clears RXNE and releases the clock)
    fn read_data(&mut self) -> u8;

    /// Push a byte into the transmit register
    fn write_data(&mut self, byte: u8);

    /// Check for a pending address match
    fn address_matched(&self) -> bool {
        self.status().address_matched
    }
}
