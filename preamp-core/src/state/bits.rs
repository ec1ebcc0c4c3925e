//! Bit-packed register views
//!
//! Composite registers are never stored as bytes. Each view is built from
//! the underlying fields when a register is read, so a read can never see
//! a packed byte that is older than the fields it encodes.

/// Power supply status flags
///
/// Bit layout of the packed byte:
/// ```text
/// bit 7..4  0
/// bit 3     pg_12v    12V rail power good
/// bit 2     ovr_tmp   over-temperature
/// bit 1     fan_fail  fan failure (developer units only)
/// bit 0     reserved, always 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerStatus {
    /// Fan failure reported by the fan controller
    pub fan_fail: bool,
    /// Over-temperature reported by the thermal monitor
    pub ovr_tmp: bool,
    /// 12V supply is up and stable
    pub pg_12v: bool,
}

impl PowerStatus {
    pub const FAN_FAIL: u8 = 1 << 1;
    pub const OVR_TMP: u8 = 1 << 2;
    pub const PG_12V: u8 = 1 << 3;

    /// Pack into the register byte
    pub const fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.fan_fail {
            byte |= Self::FAN_FAIL;
        }
        if self.ovr_tmp {
            byte |= Self::OVR_TMP;
        }
        if self.pg_12v {
            byte |= Self::PG_12V;
        }
        byte
    }

    /// Unpack a register byte. Reserved and unused bits are ignored.
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            fan_fail: byte & Self::FAN_FAIL != 0,
            ovr_tmp: byte & Self::OVR_TMP != 0,
            pg_12v: byte & Self::PG_12V != 0,
        }
    }
}

/// Expansion connector control lines
///
/// ```text
/// bit 0  nrst              expansion unit reset line level
/// bit 1  boot0             expansion unit boot-mode line level
/// bit 2  uart_passthrough  forward host UART traffic to expansion units
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExpansionLines {
    pub nrst: bool,
    pub boot0: bool,
    pub uart_passthrough: bool,
}

impl ExpansionLines {
    pub const NRST: u8 = 1 << 0;
    pub const BOOT0: u8 = 1 << 1;
    pub const UART_PASSTHROUGH: u8 = 1 << 2;

    pub const fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.nrst {
            byte |= Self::NRST;
        }
        if self.boot0 {
            byte |= Self::BOOT0;
        }
        if self.uart_passthrough {
            byte |= Self::UART_PASSTHROUGH;
        }
        byte
    }

    pub const fn from_byte(byte: u8) -> Self {
        Self {
            nrst: byte & Self::NRST != 0,
            boot0: byte & Self::BOOT0 != 0,
            uart_passthrough: byte & Self::UART_PASSTHROUGH != 0,
        }
    }
}

/// Width of one channel's source selector in a routing byte
const SOURCE_BITS: u32 = 2;
const SOURCE_MASK: u8 = (1 << SOURCE_BITS) - 1;

/// Channels carried by one routing byte
pub const CHANNELS_PER_ROUTE_BYTE: usize = 3;

/// Unpack a routing byte into three source selectors, least significant
/// group first
pub fn unpack_sources(byte: u8) -> [u8; CHANNELS_PER_ROUTE_BYTE] {
    let mut sources = [0; CHANNELS_PER_ROUTE_BYTE];
    for (i, source) in sources.iter_mut().enumerate() {
        *source = (byte >> (i as u32 * SOURCE_BITS)) & SOURCE_MASK;
    }
    sources
}

/// Pack three source selectors into a routing byte. Selectors are masked to
/// two bits; the top two bits of the byte are always 0.
pub fn pack_sources(sources: &[u8]) -> u8 {
    sources
        .iter()
        .take(CHANNELS_PER_ROUTE_BYTE)
        .enumerate()
        .fold(0, |byte, (i, &src)| {
            byte | ((src & SOURCE_MASK) << (i as u32 * SOURCE_BITS))
        })
}

/// Pack one flag per bit, least significant bit first
pub fn pack_flags(flags: &[bool]) -> u8 {
    flags
        .iter()
        .take(8)
        .enumerate()
        .fold(0, |byte, (i, &set)| if set { byte | (1 << i) } else { byte })
}

/// Test flag `index` of a byte packed least significant bit first
pub const fn flag(byte: u8, index: usize) -> bool {
    index < 8 && byte & (1 << index) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_power_status_layout() {
        let status = PowerStatus {
            fan_fail: true,
            ovr_tmp: false,
            pg_12v: true,
        };
        assert_eq!(status.to_byte(), 0b0000_1010);
    }

    #[test]
    fn test_power_status_all_combinations() {
        for bits in 0u8..8 {
            let status = PowerStatus {
                fan_fail: bits & 0b001 != 0,
                ovr_tmp: bits & 0b010 != 0,
                pg_12v: bits & 0b100 != 0,
            };
            let byte = status.to_byte();
            // Reserved bit and upper nibble stay clear
            assert_eq!(byte & 0b1111_0001, 0);
            assert_eq!(byte, bits << 1);
            assert_eq!(PowerStatus::from_byte(byte), status);
        }
    }

    #[test]
    fn test_expansion_lines_layout() {
        let lines = ExpansionLines {
            nrst: true,
            boot0: false,
            uart_passthrough: true,
        };
        assert_eq!(lines.to_byte(), 0b101);
        assert_eq!(ExpansionLines::from_byte(0b1111_1010).to_byte(), 0b010);
    }

    #[test]
    fn test_unpack_sources_lsb_group_first() {
        // ch0 = 3, ch1 = 0, ch2 = 2
        assert_eq!(unpack_sources(0b10_00_11), [3, 0, 2]);
        // Top two bits carry no channel
        assert_eq!(unpack_sources(0b1100_0000), [0, 0, 0]);
    }

    #[test]
    fn test_pack_flags_lsb_first() {
        let muted = [true, false, true, false, false, false];
        assert_eq!(pack_flags(&muted), 0b0000_0101);
        assert!(flag(0b101, 0));
        assert!(!flag(0b101, 1));
        assert!(flag(0b101, 2));
        assert!(!flag(0xFF, 8));
    }

    proptest! {
        #[test]
        fn prop_power_status_ignores_unused_bits(byte in any::<u8>()) {
            let status = PowerStatus::from_byte(byte);
            prop_assert_eq!(status.to_byte(), byte & 0b0000_1110);
        }

        #[test]
        fn prop_sources_repack(byte in 0u8..0x40) {
            prop_assert_eq!(pack_sources(&unpack_sources(byte)), byte);
        }

        #[test]
        fn prop_flags_repack(byte in any::<u8>()) {
            let mut flags = [false; 8];
            for (i, f) in flags.iter_mut().enumerate() {
                *f = flag(byte, i);
            }
            prop_assert_eq!(pack_flags(&flags), byte);
        }
    }
}
