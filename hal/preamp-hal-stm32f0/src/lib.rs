//! STM32F0-specific HAL for the preamp firmware
//!
//! Implements the `preamp-hal` traits on STM32F0 parts by driving the
//! peripheral registers through embassy-stm32's PAC. Supported chips:
//!
//! - STM32F030R8 (preamp board)
//!
//! # Features
//!
//! - `stm32f030r8` - Enable support for STM32F030R8T6
//! - `defmt` - Enable debug formatting support
//!
//! The I2C1 slave is driven register-by-register rather than through
//! embassy's async I2C driver: the protocol depends on polling ADDR, RXNE
//! and TXE in a fixed order with clock stretching holding the master.

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod interrupt;
pub mod rcc;

pub use gpio::{AfPin, Level, Sense};
pub use i2c::I2c1Slave;
pub use interrupt::Usart2RxInterrupt;
pub use rcc::I2c1Clock;
