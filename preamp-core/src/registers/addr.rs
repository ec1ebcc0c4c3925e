//! Register addresses

/// Value read back from an address with no register behind it
pub const UNIMPLEMENTED: u8 = 0xFF;

/// Register access rights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// Preamp register addresses
///
/// The numbering is the wire contract with the host and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Source input types, one bit per source (1 = digital)
    SrcAd = 0x00,
    /// Source routing for channels 1-3, two bits each
    Ch321 = 0x01,
    /// Source routing for channels 4-6, two bits each
    Ch654 = 0x02,
    /// Mute bitmap, one bit per channel
    Mute = 0x03,
    /// Amplifier power: 0 = standby
    Standby = 0x04,
    VolCh1 = 0x05,
    VolCh2 = 0x06,
    VolCh3 = 0x07,
    VolCh4 = 0x08,
    VolCh5 = 0x09,
    VolCh6 = 0x0A,
    /// Packed power supply flags
    PowerStatus = 0x0B,
    /// Fan override
    FanCtrl = 0x0C,
    /// Front panel LED override
    LedCtrl = 0x0D,
    /// Front panel LED value
    LedVal = 0x0E,
    /// Expansion connector lines
    Expansion = 0x0F,
    Hv1Voltage = 0x10,
    Hv1Temp = 0x11,
    Amp1Temp = 0x12,
    Amp2Temp = 0x13,
    VersionMajor = 0xFA,
    VersionMinor = 0xFB,
    GitHash65 = 0xFC,
    GitHash43 = 0xFD,
    GitHash21 = 0xFE,
    /// Last hash nibble plus the dirty flag in bit 0
    GitHash0D = 0xFF,
}

impl Register {
    /// Every register, in address order
    pub const ALL: [Register; 26] = [
        Register::SrcAd,
        Register::Ch321,
        Register::Ch654,
        Register::Mute,
        Register::Standby,
        Register::VolCh1,
        Register::VolCh2,
        Register::VolCh3,
        Register::VolCh4,
        Register::VolCh5,
        Register::VolCh6,
        Register::PowerStatus,
        Register::FanCtrl,
        Register::LedCtrl,
        Register::LedVal,
        Register::Expansion,
        Register::Hv1Voltage,
        Register::Hv1Temp,
        Register::Amp1Temp,
        Register::Amp2Temp,
        Register::VersionMajor,
        Register::VersionMinor,
        Register::GitHash65,
        Register::GitHash43,
        Register::GitHash21,
        Register::GitHash0D,
    ];

    /// Look up the register at a bus address
    pub const fn from_addr(addr: u8) -> Option<Self> {
        use Register::*;

        Some(match addr {
            0x00 => SrcAd,
            0x01 => Ch321,
            0x02 => Ch654,
            0x03 => Mute,
            0x04 => Standby,
            0x05 => VolCh1,
            0x06 => VolCh2,
            0x07 => VolCh3,
            0x08 => VolCh4,
            0x09 => VolCh5,
            0x0A => VolCh6,
            0x0B => PowerStatus,
            0x0C => FanCtrl,
            0x0D => LedCtrl,
            0x0E => LedVal,
            0x0F => Expansion,
            0x10 => Hv1Voltage,
            0x11 => Hv1Temp,
            0x12 => Amp1Temp,
            0x13 => Amp2Temp,
            0xFA => VersionMajor,
            0xFB => VersionMinor,
            0xFC => GitHash65,
            0xFD => GitHash43,
            0xFE => GitHash21,
            0xFF => GitHash0D,
            _ => return None,
        })
    }

    /// Bus address of this register
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Channel controlled by a volume register
    pub const fn volume_channel(self) -> Option<usize> {
        let addr = self as u8;
        if addr >= Register::VolCh1 as u8 && addr <= Register::VolCh6 as u8 {
            Some((addr - Register::VolCh1 as u8) as usize)
        } else {
            None
        }
    }

    pub const fn access(self) -> Access {
        use Register::*;

        match self {
            SrcAd | Ch321 | Ch654 | Mute | Standby | VolCh1 | VolCh2 | VolCh3 | VolCh4
            | VolCh5 | VolCh6 | FanCtrl | LedCtrl | LedVal | Expansion => Access::ReadWrite,
            PowerStatus | Hv1Voltage | Hv1Temp | Amp1Temp | Amp2Temp | VersionMajor
            | VersionMinor | GitHash65 | GitHash43 | GitHash21 | GitHash0D => Access::ReadOnly,
        }
    }

    pub const fn is_writable(self) -> bool {
        matches!(self.access(), Access::ReadWrite)
    }
}

impl TryFrom<u8> for Register {
    type Error = u8;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        Register::from_addr(addr).ok_or(addr)
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg.addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_are_unique_and_resolve() {
        for (i, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(Register::from_addr(reg.addr()), Some(*reg));
            for other in &Register::ALL[i + 1..] {
                assert_ne!(reg.addr(), other.addr());
            }
        }
    }

    #[test]
    fn test_address_space_is_total() {
        let known = (0..=u8::MAX)
            .filter(|&a| Register::from_addr(a).is_some())
            .count();
        assert_eq!(known, Register::ALL.len());
        assert_eq!(Register::from_addr(0x14), None);
        assert_eq!(Register::from_addr(0x99), None);
        assert_eq!(Register::try_from(0xF9), Err(0xF9));
    }

    #[test]
    fn test_volume_registers() {
        assert_eq!(Register::VolCh1.volume_channel(), Some(0));
        assert_eq!(Register::VolCh6.volume_channel(), Some(5));
        assert_eq!(Register::VolCh4.volume_channel(), Some(3));
        assert_eq!(Register::Mute.volume_channel(), None);
    }

    #[test]
    fn test_read_only_registers() {
        assert!(!Register::PowerStatus.is_writable());
        assert!(!Register::VersionMajor.is_writable());
        assert!(!Register::Amp2Temp.is_writable());
        assert!(Register::Expansion.is_writable());
        assert!(Register::VolCh1.is_writable());
    }
}
