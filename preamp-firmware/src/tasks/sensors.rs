//! Sensor refresh task
//!
//! Samples the power supply status lines and the analog monitors, then
//! stores them in the device state in one locked update.

use defmt::*;
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::peripherals::ADC1;
use embassy_time::{Duration, Ticker};
use preamp_core::state::{PowerStatus, SensorReadings};
use preamp_hal::InputPin;
use preamp_hal_stm32f0::Sense;

use crate::config::SENSOR_REFRESH_MS;
use crate::state::DEVICE_STATE;

/// Status inputs and analog channels sampled by the sensor task
pub struct SensorInputs {
    /// 12V power good (high = good)
    pub pg_12v: Sense<'static>,
    /// Over-temperature alert (low = alert)
    pub ovr_tmp: Sense<'static>,
    /// Fan failure (low = failed)
    pub fan_fail: Sense<'static>,
    pub hv1: AnyAdcChannel<ADC1>,
    pub hv1_temp: AnyAdcChannel<ADC1>,
    pub amp1_temp: AnyAdcChannel<ADC1>,
    pub amp2_temp: AnyAdcChannel<ADC1>,
}

impl SensorInputs {
    fn power(&self) -> PowerStatus {
        PowerStatus {
            fan_fail: self.fan_fail.is_low(),
            ovr_tmp: self.ovr_tmp.is_low(),
            pg_12v: self.pg_12v.is_high(),
        }
    }
}

/// Reduce a 12-bit conversion to the 8-bit register code
fn code(raw: u16) -> u8 {
    (raw.min(0x0FFF) >> 4) as u8
}

/// Sensor refresh task
#[embassy_executor::task]
pub async fn sensor_task(mut adc: Adc<'static, ADC1>, mut inputs: SensorInputs) {
    info!("Sensor task started ({}ms)", SENSOR_REFRESH_MS);

    let mut ticker = Ticker::every(Duration::from_millis(SENSOR_REFRESH_MS));
    let mut last_power = PowerStatus::default();

    loop {
        ticker.next().await;

        // Sample everything before taking the lock so the update is atomic
        // from the I2C task's point of view
        let power = inputs.power();
        let sensors = SensorReadings {
            hv1: code(adc.read(&mut inputs.hv1).await),
            hv1_temp: code(adc.read(&mut inputs.hv1_temp).await),
            amp1_temp: code(adc.read(&mut inputs.amp1_temp).await),
            amp2_temp: code(adc.read(&mut inputs.amp2_temp).await),
        };

        if power != last_power {
            if power.ovr_tmp {
                warn!("Over-temperature reported");
            }
            if power.fan_fail {
                warn!("Fan failure reported");
            }
            if !power.pg_12v {
                warn!("12V supply not good");
            }
            last_power = power;
        }

        DEVICE_STATE.lock().await.refresh(power, sensors);
    }
}

