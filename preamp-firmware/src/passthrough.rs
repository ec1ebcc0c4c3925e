//! Expansion UART passthrough
//!
//! While enabled by the expansion register, every byte an expansion unit
//! sends on USART2 is forwarded to the host on USART1. Both UARTs are set
//! up by `main`; this handler only moves data.

use embassy_stm32::interrupt;
use embassy_stm32::pac;

#[interrupt]
fn USART2() {
    let rx = pac::USART2;
    let tx = pac::USART1;

    let isr = rx.isr().read();
    if isr.ore() {
        rx.icr().write(|w| w.set_orecf(true));
    }
    if isr.rxne() {
        let byte = rx.rdr().read().0 as u8;
        while !tx.isr().read().txe() {}
        tx.tdr().write(|w| w.0 = u32::from(byte));
    }
}
