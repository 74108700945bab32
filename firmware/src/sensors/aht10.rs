//! AHT10 Temperature/Humidity Sensor
//!
//! Minimal async driver for the AHT10 in triggered-measurement mode.
//!
//! # Protocol
//! - Initialization loads the factory calibration (`0xE1 0x08 0x00`); the
//!   status byte must report the calibration bit afterwards.
//! - Each measurement is triggered with `0xAC 0x33 0x00`, takes up to 75 ms,
//!   and is read back as one status byte plus 20-bit raw humidity and
//!   temperature values packed into five data bytes.
//!
//! # Conversion
//! ```text
//! humidity    = raw / 2^20 * 100      (% RH)
//! temperature = raw / 2^20 * 200 - 50 (°C)
//! ```

use defmt::Format;
use embassy_rp::i2c::{self, Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};

/// Fixed I2C address of the AHT10
const ADDRESS: u8 = 0x38;

/// Calibration-load command
const CMD_INIT: [u8; 3] = [0xE1, 0x08, 0x00];

/// Triggered-measurement command
const CMD_MEASURE: [u8; 3] = [0xAC, 0x33, 0x00];

/// Status bit: measurement still running
const STATUS_BUSY: u8 = 0x80;

/// Status bit: calibration loaded
const STATUS_CALIBRATED: u8 = 0x08;

/// Power-on settle time before the sensor accepts commands
const POWER_ON_DELAY: Duration = Duration::from_millis(40);

/// Settle time after the calibration-load command
const INIT_DELAY: Duration = Duration::from_millis(10);

/// Worst-case measurement time per datasheet, with margin
const MEASUREMENT_DELAY: Duration = Duration::from_millis(80);

/// Driver errors
#[derive(Debug, Format)]
pub enum Error {
    /// I2C transfer failed
    Bus(i2c::Error),
    /// Calibration bit never came up after initialization
    NotCalibrated,
    /// Sensor still reported busy after the measurement delay
    Busy,
}

impl From<i2c::Error> for Error {
    fn from(err: i2c::Error) -> Self {
        Error::Bus(err)
    }
}

/// One converted measurement
#[derive(Debug, Clone, Copy, Format)]
pub struct Measurement {
    /// Degrees Celsius
    pub temperature: f32,
    /// Relative humidity percent
    pub humidity: f32,
}

/// AHT10 driver owning its I2C bus
pub struct Aht10 {
    bus: I2c<'static, I2C0, Async>,
}

impl Aht10 {
    /// Wraps an already-configured I2C bus.
    pub fn new(bus: I2c<'static, I2C0, Async>) -> Self {
        Self { bus }
    }

    /// Loads the factory calibration. Readings are invalid until this has
    /// succeeded once.
    pub async fn init(&mut self) -> Result<(), Error> {
        Timer::after(POWER_ON_DELAY).await;
        self.bus.write_async(ADDRESS, CMD_INIT).await?;
        Timer::after(INIT_DELAY).await;

        if self.status().await? & STATUS_CALIBRATED == 0 {
            return Err(Error::NotCalibrated);
        }
        Ok(())
    }

    /// Triggers one measurement and converts the raw 20-bit values.
    pub async fn read(&mut self) -> Result<Measurement, Error> {
        self.bus.write_async(ADDRESS, CMD_MEASURE).await?;
        Timer::after(MEASUREMENT_DELAY).await;

        let mut raw = [0u8; 6];
        self.bus.read_async(ADDRESS, &mut raw).await?;
        if raw[0] & STATUS_BUSY != 0 {
            return Err(Error::Busy);
        }

        let humidity_raw = (u32::from(raw[1]) << 12) | (u32::from(raw[2]) << 4) | (u32::from(raw[3]) >> 4);
        let temperature_raw = ((u32::from(raw[3]) & 0x0F) << 16) | (u32::from(raw[4]) << 8) | u32::from(raw[5]);

        Ok(Measurement {
            humidity: humidity_raw as f32 / 1_048_576.0 * 100.0,
            temperature: temperature_raw as f32 / 1_048_576.0 * 200.0 - 50.0,
        })
    }

    async fn status(&mut self) -> Result<u8, Error> {
        let mut status = [0u8; 1];
        self.bus.read_async(ADDRESS, &mut status).await?;
        Ok(status[0])
    }
}
