//! Monitoring node firmware entry point
//!
//! Initializes hardware, brings up the network and spawns the monitoring
//! tasks.

#![no_std]
#![no_main]

use crate::task::{
    annunciate::annunciate,
    net::{net_runner, wifi_runner},
    report::{report, upload},
    sensor_read::sensor_read,
};
use cyw43::{Control, JoinOptions};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_net::{Stack, StackResources};
use embassy_rp::config::Config;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pio::Pio;
use embassy_time::{with_timeout, Timer};
use static_cell::StaticCell;
use system::config;
use system::resources::{
    AnnunciatorResources, AssignedResources, Irqs, SensorResources, WifiResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Sensor drivers
mod sensors;
/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups, one per task.
    let r = split_resources!(p);

    // CYW43 radio bring-up. The chip also owns the onboard LED, so the
    // control handle ends up with the annunciator task once the network
    // association is done.
    let wifi = r.wifi;
    let pwr = Output::new(wifi.pwr_pin, Level::Low);
    let cs = Output::new(wifi.cs_pin, Level::High);
    let mut pio = Pio::new(wifi.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        wifi.dio_pin,
        wifi.clk_pin,
        wifi.dma,
    );

    static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) =
        cyw43::new(state, pwr, spi, cyw43_firmware::CYW43_43439A0).await;
    spawner.spawn(wifi_runner(runner)).unwrap();

    control.init(cyw43_firmware::CYW43_43439A0_CLM).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    // Network stack with DHCP
    static NET_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        embassy_net::Config::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        config::NET_STACK_SEED,
    );
    spawner.spawn(net_runner(runner)).unwrap();

    join_network(&mut control, stack).await;

    // Finally spawn the monitoring tasks
    spawner.spawn(sensor_read(r.sensor)).unwrap();
    spawner.spawn(report(stack)).unwrap();
    spawner.spawn(upload(stack)).unwrap();
    spawner.spawn(annunciate(control, r.annunciator)).unwrap();
}

/// Associates with the configured network and waits for an address, bounded
/// by [`config::WIFI_JOIN_TIMEOUT`]. Failure is tolerated: the node keeps
/// sensing and annunciating, and the reporter defers its cycles until the
/// link comes up.
async fn join_network(control: &mut Control<'static>, stack: Stack<'static>) {
    if config::WIFI_SSID.is_empty() {
        warn!("No network credentials configured, running offline");
        return;
    }

    info!("Joining wireless network {}", config::WIFI_SSID);
    let join = async {
        loop {
            match control
                .join(
                    config::WIFI_SSID,
                    JoinOptions::new(config::WIFI_PASSWORD.as_bytes()),
                )
                .await
            {
                Ok(()) => break,
                Err(err) => {
                    warn!("Join failed with status {}", err.status);
                    Timer::after_secs(1).await;
                }
            }
        }
        stack.wait_config_up().await;
    };

    match with_timeout(config::WIFI_JOIN_TIMEOUT, join).await {
        Ok(()) => {
            if let Some(cfg) = stack.config_v4() {
                info!("Network up, address {}", cfg.address);
            }
        }
        Err(_) => warn!("No network after the join timeout, uploads deferred until the link comes up"),
    }
}
