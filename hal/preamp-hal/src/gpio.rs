//! GPIO pin abstractions
//!
//! Provides traits for digital pins and for handing a pin over to an
//! on-chip peripheral.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Output driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    /// Push-pull output
    PushPull,
    /// Open-drain output (required for I2C lines)
    OpenDrain,
}

/// Internal pull resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// No internal pull resistor
    None,
    /// Pull-up resistor enabled
    Up,
    /// Pull-down resistor enabled
    Down,
}

/// Output slew rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// ~2 MHz
    Low,
    /// ~10 MHz
    Medium,
    /// ~50 MHz
    High,
}

/// Electrical configuration applied when a pin is muxed to a peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlternateConfig {
    /// Alternate function number (chip specific)
    pub function: u8,
    /// Output driver type
    pub output: OutputType,
    /// Pull resistor
    pub pull: Pull,
    /// Slew rate
    pub speed: Speed,
}

impl AlternateConfig {
    /// Open-drain, no pull, low speed: the shape of an I2C bus line with
    /// external pull-ups
    pub const fn i2c_line(function: u8) -> Self {
        Self {
            function,
            output: OutputType::OpenDrain,
            pull: Pull::None,
            speed: Speed::Low,
        }
    }
}

/// Pin that can be handed over to an on-chip peripheral
pub trait AlternatePin {
    /// Mux the pin to an alternate function with the given electrical setup
    fn set_alternate(&mut self, config: AlternateConfig);
}
