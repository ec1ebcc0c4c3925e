//! Collaborator traits
//!
//! These traits define the interface between the register map and the
//! code that actually drives the amplifier hardware.

pub mod control;

pub use control::PreampControl;
