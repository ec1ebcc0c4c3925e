//! Peripheral clock gating

/// Clock gate for a single peripheral
///
/// Register writes to a peripheral are ignored while its clock is gated,
/// so the clock must be enabled before any other configuration.
pub trait PeripheralClock {
    /// Enable the peripheral clock
    fn enable(&mut self);

    /// Disable the peripheral clock
    fn disable(&mut self);
}
