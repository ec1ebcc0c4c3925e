//! Slave address handling

/// Invalid slave address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// 7-bit address above 0x7F
    OutOfRange(u8),
    /// Pre-shifted address with the R/W bit set
    ReadWriteBitSet(u8),
}

/// 7-bit I2C slave address, stored pre-shifted into bits 7:1
///
/// The peripheral's own-address register and the host tooling both use the
/// shifted form (`0bXXXXXXX0`), so that is what this type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlaveAddress(u8);

impl SlaveAddress {
    /// Build from a plain 7-bit address
    pub const fn from_7bit(addr: u8) -> Result<Self, AddressError> {
        if addr > 0x7F {
            return Err(AddressError::OutOfRange(addr));
        }
        Ok(Self(addr << 1))
    }

    /// Build from an address already shifted left by one
    pub const fn from_shifted(addr: u8) -> Result<Self, AddressError> {
        if addr & 1 != 0 {
            return Err(AddressError::ReadWriteBitSet(addr));
        }
        Ok(Self(addr))
    }

    /// Shifted form, as written to the own-address register
    pub const fn shifted(self) -> u8 {
        self.0
    }

    /// Plain 7-bit form
    pub const fn seven_bit(self) -> u8 {
        self.0 >> 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_7bit() {
        let addr = SlaveAddress::from_7bit(0x08).unwrap();
        assert_eq!(addr.shifted(), 0x10);
        assert_eq!(addr.seven_bit(), 0x08);
        assert_eq!(
            SlaveAddress::from_7bit(0x80),
            Err(AddressError::OutOfRange(0x80))
        );
    }

    #[test]
    fn test_from_shifted() {
        assert_eq!(SlaveAddress::from_shifted(0x10).unwrap().seven_bit(), 0x08);
        assert_eq!(
            SlaveAddress::from_shifted(0x11),
            Err(AddressError::ReadWriteBitSet(0x11))
        );
    }
}
