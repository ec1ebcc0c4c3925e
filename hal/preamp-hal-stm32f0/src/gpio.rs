//! GPIO for STM32F0
//!
//! Pin muxing for the I2C lines, plus adapters from embassy's GPIO drivers
//! to the `preamp-hal` pin traits.

use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::pac;
use embassy_stm32::pac::gpio::vals;
use preamp_hal::gpio::{AlternateConfig, OutputType, Pull, Speed};
use preamp_hal::{AlternatePin, InputPin, OutputPin};

/// A pin muxed through the raw port registers
///
/// Used for pins whose peripheral is driven at register level, where the
/// embassy driver would otherwise own the pin.
#[derive(Debug)]
pub struct AfPin {
    port: pac::gpio::Gpio,
    pin: usize,
}

impl AfPin {
    /// I2C1 SCL on the controller bus
    pub const fn i2c1_scl() -> Self {
        Self {
            port: pac::GPIOB,
            pin: 6,
        }
    }

    /// I2C1 SDA on the controller bus
    pub const fn i2c1_sda() -> Self {
        Self {
            port: pac::GPIOB,
            pin: 7,
        }
    }
}

impl AlternatePin for AfPin {
    fn set_alternate(&mut self, config: AlternateConfig) {
        let pin = self.pin;

        // Select the function before switching the mode so the pin never
        // drives the bus as the wrong peripheral
        self.port
            .afr(pin / 8)
            .modify(|w| w.set_afr(pin % 8, config.function));
        self.port.otyper().modify(|w| {
            w.set_ot(
                pin,
                match config.output {
                    OutputType::PushPull => vals::Ot::PUSHPULL,
                    OutputType::OpenDrain => vals::Ot::OPENDRAIN,
                },
            )
        });
        self.port.pupdr().modify(|w| {
            w.set_pupdr(
                pin,
                match config.pull {
                    Pull::None => vals::Pupdr::FLOATING,
                    Pull::Up => vals::Pupdr::PULLUP,
                    Pull::Down => vals::Pupdr::PULLDOWN,
                },
            )
        });
        self.port.ospeedr().modify(|w| {
            w.set_ospeedr(
                pin,
                match config.speed {
                    Speed::Low => vals::Ospeedr::LOWSPEED,
                    Speed::Medium => vals::Ospeedr::MEDIUMSPEED,
                    Speed::High => vals::Ospeedr::VERYHIGHSPEED,
                },
            )
        });
        self.port
            .moder()
            .modify(|w| w.set_moder(pin, vals::Moder::ALTERNATE));
    }
}

/// Output pin backed by an embassy GPIO driver
pub struct Level<'d>(pub Output<'d>);

impl OutputPin for Level<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// Input pin backed by an embassy GPIO driver
pub struct Sense<'d>(pub Input<'d>);

impl InputPin for Sense<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
