//! Board control layer
//!
//! Executes register writes on the preamp board hardware.

use defmt::*;
use preamp_core::state::InputKind;
use preamp_core::traits::PreampControl;
use preamp_hal::{InterruptLine, OutputPin};

/// Output lines owned by the control layer
pub struct ControlPins<P> {
    /// Amplifier standby (high = standby)
    pub standby: P,
    /// Fan full-speed override
    pub fan_on: P,
    /// Expansion unit reset (active low)
    pub exp_nrst: P,
    /// Expansion unit boot mode select
    pub exp_boot0: P,
}

/// Control layer for the preamp board
///
/// Standby, fan and expansion lines are GPIOs. Channel routing, volume and
/// the front panel sit behind the board's internal I2C bus.
pub struct BoardControl<P, I> {
    pins: ControlPins<P>,
    passthrough_irq: I,
}

impl<P: OutputPin, I: InterruptLine> BoardControl<P, I> {
    pub fn new(pins: ControlPins<P>, passthrough_irq: I) -> Self {
        Self {
            pins,
            passthrough_irq,
        }
    }
}

// Source mux, volume controller and front panel expander sit on the internal
// I2C2 bus, which this board revision does not drive; those writes are logged
// and kept in the device state only.
impl<P: OutputPin, I: InterruptLine> PreampControl for BoardControl<P, I> {
    fn configure_input(&mut self, source: usize, kind: InputKind) {
        debug!("source {} input {:?}", source, kind);
    }

    fn connect_channel(&mut self, source: u8, channel: usize) {
        debug!("channel {} <- source {}", channel, source);
    }

    fn set_mute(&mut self, channel: usize, muted: bool) {
        debug!("channel {} mute {}", channel, muted);
    }

    fn set_standby(&mut self, standby: bool) {
        info!("amplifiers {}", if standby { "standby" } else { "on" });
        self.pins.standby.set_state(standby);
    }

    fn set_volume(&mut self, channel: usize, volume: u8) {
        debug!("channel {} volume {}", channel, volume);
    }

    fn set_fan_override(&mut self, on: bool) {
        self.pins.fan_on.set_state(on);
    }

    fn set_led_override(&mut self, on: bool) {
        debug!("front panel override {}", on);
    }

    fn set_leds(&mut self, leds: u8) {
        debug!("front panel leds 0x{=u8:02x}", leds);
    }

    fn set_expansion_reset(&mut self, high: bool) {
        self.pins.exp_nrst.set_state(high);
    }

    fn set_expansion_boot0(&mut self, high: bool) {
        self.pins.exp_boot0.set_state(high);
    }

    fn set_uart_passthrough(&mut self, enabled: bool) {
        info!("expansion uart passthrough {}", enabled);
        if enabled {
            self.passthrough_irq.enable();
        } else {
            self.passthrough_irq.disable();
        }
    }
}
