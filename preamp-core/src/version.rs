//! Firmware identity
//!
//! Version and truncated git hash, injected at build time and exposed
//! read-only through the top six registers.

/// Build identity of the running firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    /// First 7 hex digits of the commit hash (28 bits)
    pub git_hash: u32,
    /// Working tree had uncommitted changes at build time
    pub dirty: bool,
}

impl FirmwareVersion {
    /// Mask of the 7 hash nibbles that fit the four hash registers
    pub const HASH_MASK: u32 = 0x0FFF_FFFF;

    pub const fn new(major: u8, minor: u8, git_hash: u32, dirty: bool) -> Self {
        Self {
            major,
            minor,
            git_hash: git_hash & Self::HASH_MASK,
            dirty,
        }
    }

    /// Hash register bytes, most significant first
    ///
    /// Nibbles 6..1 fill the first three bytes. The last byte carries
    /// nibble 0 in its high half and the dirty flag in bit 0.
    pub const fn hash_bytes(&self) -> [u8; 4] {
        let shifted = (self.git_hash & Self::HASH_MASK) << 4;
        let [b0, b1, b2, b3] = shifted.to_be_bytes();
        [b0, b1, b2, (b3 & 0xF0) | self.dirty as u8]
    }
}
