//! Peripheral clock gates

use embassy_stm32::pac;
use preamp_hal::PeripheralClock;

/// APB1 clock gate for I2C1
#[derive(Debug, Default)]
pub struct I2c1Clock;

impl PeripheralClock for I2c1Clock {
    fn enable(&mut self) {
        pac::RCC.apb1enr().modify(|w| w.set_i2c1en(true));
    }

    fn disable(&mut self) {
        pac::RCC.apb1enr().modify(|w| w.set_i2c1en(false));
    }
}
