//! Climate and Flame Sampling
//!
//! Reads the AHT10 and the flame detector once per second and publishes the
//! results into the shared state.
//!
//! # Sampling Policy
//! - A failed climate read keeps the previous temperature/humidity values;
//!   staleness is preferred over gaps and the failure is only logged.
//! - The flame detector is read every cycle regardless of the climate
//!   outcome. It is wired active-low, so detection is the inverted pin level.
//! - The alarm condition is derived here, in the same cycle that produces the
//!   flame state.
//!
//! A sensor that fails to initialize is reported once; the task keeps running
//! and the climate fields simply stay stale.

use defmt::{info, warn};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_time::Timer;
use flamewatch::state::Reading;

use crate::sensors::aht10::Aht10;
use crate::system::{
    config,
    resources::{Irqs, SensorResources},
    state::SYSTEM_STATE,
};

/// Sampler task feeding the shared state on a fixed cadence
#[embassy_executor::task]
pub async fn sensor_read(r: SensorResources) {
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 100_000;
    let bus = I2c::new_async(r.i2c, r.scl_pin, r.sda_pin, Irqs, i2c_config);
    let mut aht10 = Aht10::new(bus);

    // Active-low detector output, pulled up so an unplugged sensor reads
    // "no flame" rather than floating.
    let flame_input = Input::new(r.flame_pin, Pull::Up);

    if let Err(e) = aht10.init().await {
        warn!("[sensor] AHT10 init failed: {}, climate values will stay stale", e);
    }

    loop {
        let reading = match aht10.read().await {
            Ok(measurement) => Some(Reading {
                temperature: measurement.temperature,
                humidity: measurement.humidity,
            }),
            Err(e) => {
                warn!("[sensor] AHT10 read failed: {}", e);
                None
            }
        };

        let flame_detected = flame_input.is_low();
        SYSTEM_STATE.record_sample(reading, flame_detected);

        let snapshot = SYSTEM_STATE.snapshot();
        info!(
            "[sensor] T: {}, H: {}, F: {}",
            snapshot.temperature, snapshot.humidity, snapshot.flame_detected
        );

        Timer::after(config::SAMPLE_INTERVAL).await;
    }
}
