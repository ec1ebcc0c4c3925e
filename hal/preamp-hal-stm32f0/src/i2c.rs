//! I2C1 in slave mode for STM32F0
//!
//! Register-level access to the I2C v2 peripheral (ISR/ICR/RXDR/TXDR).

use embassy_stm32::pac;
use embassy_stm32::pac::i2c::vals;
use preamp_hal::i2c::{Direction, SlaveConfig, SlaveStatus};
use preamp_hal::I2cSlave;

/// Largest digital filter the peripheral supports, in I2CCLK cycles
pub const MAX_DIGITAL_FILTER: u8 = 15;

/// I2C1 driven as a polled slave
#[derive(Debug)]
pub struct I2c1Slave {
    regs: pac::i2c::I2c,
}

impl Default for I2c1Slave {
    fn default() -> Self {
        Self::new()
    }
}

impl I2c1Slave {
    pub const fn new() -> Self {
        Self { regs: pac::I2C1 }
    }
}

impl I2cSlave for I2c1Slave {
    fn configure(&mut self, config: &SlaveConfig) {
        // Filters and own address can only change with PE cleared
        self.regs.cr1().modify(|w| w.set_pe(false));

        self.regs.cr1().modify(|w| {
            w.set_anfoff(!config.analog_filter);
            w.set_dnf(vals::Dnf::from_bits(
                config.digital_filter.min(MAX_DIGITAL_FILTER),
            ));
            w.set_nostretch(!config.clock_stretching);
        });

        // Clocks are generated by the master; timing only sets data setup
        // and hold, and zero matches the controller bus.
        self.regs.timingr().write(|w| *w = pac::i2c::regs::Timingr(0));

        self.regs.oar1().write(|w| w.set_oa1en(false));
        self.regs.oar1().write(|w| {
            w.set_oa1(u16::from(config.own_address));
            w.set_oa1mode(vals::Addmode::BIT7);
            w.set_oa1en(true);
        });

        self.regs.cr2().modify(|w| w.set_nack(!config.acknowledge));
    }

    fn enable(&mut self) {
        self.regs.cr1().modify(|w| w.set_pe(true));
    }

    fn status(&self) -> SlaveStatus {
        let isr = self.regs.isr().read();
        SlaveStatus {
            address_matched: isr.addr(),
            rx_not_empty: isr.rxne(),
            tx_empty: isr.txe(),
            direction: match isr.dir() {
                vals::Dir::READ => Direction::Read,
                _ => Direction::Write,
            },
        }
    }

    fn clear_address_match(&mut self) {
        self.regs.icr().write(|w| w.set_addrcf(true));
    }

    fn read_data(&mut self) -> u8 {
        self.regs.rxdr().read().rxdata()
    }

    fn write_data(&mut self, byte: u8) {
        self.regs.txdr().write(|w| w.set_txdata(byte));
    }
}
