//! Interrupt source abstractions

/// A single maskable interrupt source
///
/// Enabling covers both the peripheral-side interrupt enable bit and the
/// interrupt controller line, so a disabled source can never fire.
pub trait InterruptLine {
    /// Unmask the interrupt source
    fn enable(&mut self);

    /// Mask the interrupt source
    fn disable(&mut self);
}
