//! Device state record

use super::bits::{ExpansionLines, PowerStatus};

/// Number of amplifier output channels
pub const NUM_CHANNELS: usize = 6;

/// Number of selectable audio sources
pub const NUM_SOURCES: usize = 4;

/// Signal type of an audio source input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputKind {
    /// Analog line-level input
    #[default]
    Analog,
    /// Digital input
    Digital,
}

impl InputKind {
    /// Decode a source-type bit (1 = digital)
    pub const fn from_bit(set: bool) -> Self {
        if set {
            InputKind::Digital
        } else {
            InputKind::Analog
        }
    }

    pub const fn is_digital(self) -> bool {
        matches!(self, InputKind::Digital)
    }
}

/// Raw sensor codes, refreshed by the sensor task
///
/// Values are opaque 8-bit codes; conversion to volts and degrees is done
/// by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReadings {
    /// High-voltage rail 1
    pub hv1: u8,
    /// High-voltage supply 1 temperature
    pub hv1_temp: u8,
    /// Amplifier heatsink 1 temperature
    pub amp1_temp: u8,
    /// Amplifier heatsink 2 temperature
    pub amp2_temp: u8,
}

/// Live operating state exposed through the register map
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    /// Input type per source
    pub inputs: [InputKind; NUM_SOURCES],
    /// Source selector (0..NUM_SOURCES) routed to each channel
    pub channel_source: [u8; NUM_CHANNELS],
    /// Mute flag per channel
    pub muted: [bool; NUM_CHANNELS],
    /// Volume level per channel
    pub volume: [u8; NUM_CHANNELS],
    /// Global amplifier standby
    pub standby: bool,
    /// Power supply status inputs
    pub power: PowerStatus,
    /// Fan forced to full speed
    pub fan_override: bool,
    /// Front panel LEDs driven by the host instead of the firmware
    pub led_override: bool,
    /// Front panel LED byte
    pub leds: u8,
    /// Expansion connector lines
    pub expansion: ExpansionLines,
    /// Analog sensor codes
    pub sensors: SensorReadings,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    /// Create a zeroed state, as at power-on
    pub const fn new() -> Self {
        Self {
            inputs: [InputKind::Analog; NUM_SOURCES],
            channel_source: [0; NUM_CHANNELS],
            muted: [false; NUM_CHANNELS],
            volume: [0; NUM_CHANNELS],
            standby: false,
            power: PowerStatus::from_byte(0),
            fan_override: false,
            led_override: false,
            leds: 0,
            expansion: ExpansionLines::from_byte(0),
            sensors: SensorReadings {
                hv1: 0,
                hv1_temp: 0,
                amp1_temp: 0,
                amp2_temp: 0,
            },
        }
    }

    /// Apply a sensor refresh in one step
    ///
    /// The control loop calls this between transactions so a register read
    /// never sees status bits from two different refresh cycles.
    pub fn refresh(&mut self, power: PowerStatus, sensors: SensorReadings) {
        self.power = power;
        self.sensors = sensors;
    }
}
