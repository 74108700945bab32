//! Hardware Resource Management
//!
//! Splits the Pico W's pins and peripherals into per-task ownership groups so
//! every task receives exactly the hardware it drives and nothing else.
//!
//! # Resource Groups
//! - Sensor: AHT10 I2C bus plus the flame detector input
//! - Annunciator: buzzer output (the onboard LED is reached through the CYW43
//!   radio, so it has no pin here)
//! - Wifi: CYW43 control/SPI pins, PIO block and DMA channel

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::{self, I2C0, PIO0};
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;

assign_resources! {
    /// AHT10 climate sensor bus and flame detector input
    sensor: SensorResources {
        i2c: I2C0,
        sda_pin: PIN_4,
        scl_pin: PIN_5,
        flame_pin: PIN_16,
    },
    /// Buzzer output
    annunciator: AnnunciatorResources {
        buzzer_pin: PIN_14,
    },
    /// CYW43 radio pins
    wifi: WifiResources {
        pwr_pin: PIN_23,
        cs_pin: PIN_25,
        dio_pin: PIN_24,
        clk_pin: PIN_29,
        pio: PIO0,
        dma: DMA_CH0,
    },
}

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
