//! Controller bus task
//!
//! Waits for the host to address this preamp and serves one register
//! transaction per address match.

use defmt::*;
use embassy_futures::yield_now;
use preamp_core::i2c::{transact, SpinBudget, SpinForever, WaitPolicy};
use preamp_core::RegisterMap;
use preamp_hal::I2cSlave;
use preamp_hal_stm32f0::{I2c1Slave, Level, Usart2RxInterrupt};

use crate::config::{FIRMWARE_VERSION, POLL_BUDGET};
use crate::control::BoardControl;
use crate::state::DEVICE_STATE;

/// Board control layer as wired on the preamp
pub type Control = BoardControl<Level<'static>, Usart2RxInterrupt>;

/// I2C slave task
#[embassy_executor::task]
pub async fn i2c_task(bus: I2c1Slave, mut control: Control) {
    info!("I2C task started");

    // Bring the hardware in line with the power-on state
    {
        let mut state = DEVICE_STATE.lock().await;
        RegisterMap::new(&mut state, &mut control, FIRMWARE_VERSION).sync();
    }

    if POLL_BUDGET == 0 {
        serve(bus, control, SpinForever).await
    } else {
        warn!("bus waits bounded to {} spins", POLL_BUDGET);
        serve(bus, control, SpinBudget::new(POLL_BUDGET)).await
    }
}

async fn serve<P: WaitPolicy>(mut bus: I2c1Slave, mut control: Control, mut policy: P) -> ! {
    loop {
        if !bus.address_matched() {
            yield_now().await;
            continue;
        }

        // Held for the whole transaction so reads see one sensor refresh
        let mut state = DEVICE_STATE.lock().await;
        let mut map = RegisterMap::new(&mut state, &mut control, FIRMWARE_VERSION);
        if transact(&mut bus, &mut map, &mut policy).is_err() {
            warn!("I2C transaction stalled, dropped");
        }
    }
}

