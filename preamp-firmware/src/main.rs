//! Preamp firmware
//!
//! Register interface for one preamp board in an amplifier stack. The host
//! (or the preamp above this one) reads and writes single-byte registers
//! over I2C1; this firmware applies the writes to the board and serves
//! status, telemetry and version information on reads.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::{self, Adc, AdcChannel};
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{self, Input, Output, Pull, Speed};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::usart::{self, Uart};
use {defmt_rtt as _, panic_probe as _};

use preamp_core::i2c::{initialize, BusParts};
use preamp_hal_stm32f0::{AfPin, I2c1Clock, I2c1Slave, Level, Sense, Usart2RxInterrupt};

use crate::config::{FIRMWARE_VERSION, SLAVE_ADDRESS};
use crate::control::{BoardControl, ControlPins};
use crate::tasks::{i2c_task, sensor_task, SensorInputs};

mod config;
mod control;
mod passthrough;
mod state;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC1 => adc::InterruptHandler<ADC1>;
});

/// Baud rate of the host and expansion UARTs
const UART_BAUDRATE: u32 = 9600;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!(
        "Preamp firmware {}.{} starting (git {=u32:07x}{})",
        FIRMWARE_VERSION.major,
        FIRMWARE_VERSION.minor,
        FIRMWARE_VERSION.git_hash,
        if FIRMWARE_VERSION.dirty { "-dirty" } else { "" }
    );

    let p = embassy_stm32::init(Default::default());

    // Host UART (PA9=TX, PA10=RX) and expansion UART (PA2=TX, PA3=RX).
    // Bytes only move between them in the USART2 handler, which is gated
    // by the expansion register.
    let mut uart_config = usart::Config::default();
    uart_config.baudrate = UART_BAUDRATE;

    let host_uart = unwrap!(Uart::new_blocking(p.USART1, p.PA10, p.PA9, uart_config));
    let expansion_uart = unwrap!(Uart::new_blocking(p.USART2, p.PA3, p.PA2, uart_config));
    // The passthrough handler drives both peripherals directly from here on;
    // dropping the drivers would gate their clocks.
    core::mem::forget(host_uart);
    core::mem::forget(expansion_uart);

    // Board outputs. Power-on levels match the zeroed device state: amps
    // active, fan automatic, expansion unit held in reset.
    let pins = ControlPins {
        standby: Level(Output::new(p.PC3, gpio::Level::Low, Speed::Low)),
        fan_on: Level(Output::new(p.PC4, gpio::Level::Low, Speed::Low)),
        exp_nrst: Level(Output::new(p.PB12, gpio::Level::Low, Speed::Low)),
        exp_boot0: Level(Output::new(p.PB13, gpio::Level::Low, Speed::Low)),
    };
    let control = BoardControl::new(pins, Usart2RxInterrupt::default());

    // Controller bus: I2C1 on PB6=SCL, PB7=SDA
    let bus = initialize(
        BusParts {
            clock: I2c1Clock,
            scl: AfPin::i2c1_scl(),
            sda: AfPin::i2c1_sda(),
            slave: I2c1Slave::new(),
        },
        SLAVE_ADDRESS,
    );

    let adc = Adc::new(p.ADC1, Irqs);
    let sensors = SensorInputs {
        pg_12v: Sense(Input::new(p.PC0, Pull::None)),
        ovr_tmp: Sense(Input::new(p.PC1, Pull::Up)),
        fan_fail: Sense(Input::new(p.PC2, Pull::Up)),
        hv1: p.PA0.degrade_adc(),
        hv1_temp: p.PA1.degrade_adc(),
        amp1_temp: p.PA4.degrade_adc(),
        amp2_temp: p.PA5.degrade_adc(),
    };

    spawner.spawn(i2c_task(bus, control)).unwrap();
    spawner.spawn(sensor_task(adc, sensors)).unwrap();

    info!("All tasks spawned");
}
