//! Preamp Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the register firmware is written
//! against. Chip-specific crates implement them; host tests implement them
//! with mocks and scripted peripherals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  preamp-firmware (control loop, tasks)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  preamp-core (register map, protocol)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  preamp-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  preamp-hal-  │
//!             │   stm32f0     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::AlternatePin`] - Pin muxing onto a peripheral
//! - [`clock::PeripheralClock`] - Peripheral clock gating
//! - [`interrupt::InterruptLine`] - Interrupt source enable/disable
//! - [`i2c::I2cSlave`] - I2C peripheral in slave mode

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod i2c;
pub mod interrupt;

// Re-export key traits at crate root for convenience
pub use clock::PeripheralClock;
pub use gpio::{AlternatePin, InputPin, OutputPin};
pub use i2c::I2cSlave;
pub use interrupt::InterruptLine;
