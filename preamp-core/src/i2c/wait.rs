//! Blocking wait on hardware flags
//!
//! The protocol busy-polls peripheral status flags. How long it is willing
//! to wait is a policy: the firmware waits forever, like the hardware
//! protocol expects, while tests and watchdog-fed builds can bound it.

use core::convert::Infallible;

/// A bounded wait ran out before the flag was seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stalled;

/// Called between unsuccessful polls
pub trait WaitPolicy {
    /// Error returned when the policy gives up
    type Error;

    /// Wait before the next poll, or give up
    fn spin(&mut self) -> Result<(), Self::Error>;

    /// Called once a poll succeeds
    fn reset(&mut self) {}
}

/// Wait indefinitely
///
/// A master that stops mid-transaction holds the slave here until the bus
/// is reset externally. Recovery belongs to a watchdog, not this loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinForever;

impl WaitPolicy for SpinForever {
    type Error = Infallible;

    #[inline]
    fn spin(&mut self) -> Result<(), Infallible> {
        core::hint::spin_loop();
        Ok(())
    }
}

/// Give up after a fixed number of unsuccessful polls per wait
///
/// The budget is restored after every successful poll, so it bounds each
/// individual wait rather than the whole transaction.
#[derive(Debug, Clone, Copy)]
pub struct SpinBudget {
    limit: u32,
    remaining: u32,
}

impl SpinBudget {
    pub const fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }
}

impl WaitPolicy for SpinBudget {
    type Error = Stalled;

    fn spin(&mut self) -> Result<(), Stalled> {
        if self.remaining == 0 {
            return Err(Stalled);
        }
        self.remaining -= 1;
        core::hint::spin_loop();
        Ok(())
    }

    fn reset(&mut self) {
        self.remaining = self.limit;
    }
}

/// Poll `probe` until it yields a value, spinning per `policy` in between
pub fn poll_until<P, T, F>(policy: &mut P, mut probe: F) -> Result<T, P::Error>
where
    P: WaitPolicy,
    F: FnMut() -> Option<T>,
{
    loop {
        if let Some(value) = probe() {
            policy.reset();
            return Ok(value);
        }
        policy.spin()?;
    }
}
