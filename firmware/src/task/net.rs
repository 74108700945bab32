//! Radio and Network Stack Runners
//!
//! Background drivers required by the network path: the CYW43 chip's event
//! loop and the embassy-net stack's processing loop. Both run for the
//! lifetime of the node.

use cyw43_pio::PioSpi;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{DMA_CH0, PIO0};

/// CYW43 driver event loop
#[embassy_executor::task]
pub async fn wifi_runner(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

/// Network stack processing loop
#[embassy_executor::task]
pub async fn net_runner(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
