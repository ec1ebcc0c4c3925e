//! Control layer sink for register writes

use crate::state::InputKind;

/// Channel and amplifier control layer
///
/// The register map updates [`DeviceState`](crate::state::DeviceState) and
/// then calls into this trait so the change takes effect in hardware. It is
/// only called when a value actually changes.
///
/// Channel indices are `0..NUM_CHANNELS` and source indices are
/// `0..NUM_SOURCES`; implementations may assume both are in range.
pub trait PreampControl {
    /// Switch a source between its analog and digital input
    fn configure_input(&mut self, source: usize, kind: InputKind);

    /// Route a source onto an output channel
    fn connect_channel(&mut self, source: u8, channel: usize);

    /// Mute or unmute a channel
    fn set_mute(&mut self, channel: usize, muted: bool);

    /// Put the amplifiers in or out of standby
    fn set_standby(&mut self, standby: bool);

    /// Set a channel's volume level
    fn set_volume(&mut self, channel: usize, volume: u8);

    /// Force the fan to full speed, or hand it back to thermal control
    fn set_fan_override(&mut self, on: bool);

    /// Give the host control of the front panel LEDs
    fn set_led_override(&mut self, on: bool);

    /// Drive the front panel LEDs (only called while overridden)
    fn set_leds(&mut self, leds: u8);

    /// Drive the expansion unit reset line
    fn set_expansion_reset(&mut self, high: bool);

    /// Drive the expansion unit boot-mode line
    fn set_expansion_boot0(&mut self, high: bool);

    /// Forward expansion unit UART traffic to the host
    ///
    /// Implementations enable the UART receive interrupt and its interrupt
    /// controller line together, and disable them together.
    fn set_uart_passthrough(&mut self, enabled: bool);
}
