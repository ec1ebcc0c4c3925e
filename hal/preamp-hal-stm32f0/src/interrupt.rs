//! Interrupt sources used by the register firmware

use embassy_stm32::interrupt::{self, InterruptExt};
use embassy_stm32::pac;
use preamp_hal::InterruptLine;

/// USART2 receive interrupt (expansion UART passthrough)
///
/// Enabling sets RXNEIE and unmasks the NVIC line; disabling clears both,
/// always as a pair.
#[derive(Debug, Default)]
pub struct Usart2RxInterrupt;

impl InterruptLine for Usart2RxInterrupt {
    fn enable(&mut self) {
        pac::USART2.cr1().modify(|w| w.set_rxneie(true));
        // SAFETY: the USART2 handler is defined by the firmware and only
        // touches the USART data registers.
        unsafe { interrupt::USART2.enable() };
    }

    fn disable(&mut self) {
        pac::USART2.cr1().modify(|w| w.set_rxneie(false));
        interrupt::USART2.disable();
    }
}
