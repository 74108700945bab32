//! Telemetry Reporting
//!
//! Two cooperating tasks deliver the latest snapshot to the collector every
//! reporting period without ever blocking sampling or alarm response:
//!
//! - `report` is the periodic tick. It checks connectivity, claims the
//!   in-flight guard and hands a snapshot to the upload driver, then goes
//!   straight back to sleep without waiting for the network.
//! - `upload` owns the socket buffers and drives one attempt at a time
//!   through the connect → send → sent → close lifecycle, advancing the
//!   [`UploadState`] machine as each step completes.
//!
//! At most one attempt is ever outstanding: a tick that finds the guard
//! claimed skips its cycle instead of stacking a second connection. Every
//! network failure is absorbed here: logged, attempt abandoned, next try no
//! sooner than the next period.

use core::net::{Ipv4Addr, SocketAddrV4};

use defmt::{info, warn};
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpEndpoint, Stack};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;
use embedded_io_async::Write;
use flamewatch::payload;
use flamewatch::report::{cycle_decision, CycleDecision};
use flamewatch::state::Snapshot;
use flamewatch::upload::{InFlight, UploadEvent, UploadState};

use crate::system::{config, state::SYSTEM_STATE};

/// Snapshot handed from the reporter tick to the upload driver
static UPLOAD_REQUESTS: Channel<CriticalSectionRawMutex, Snapshot, 1> = Channel::new();

/// Guard enforcing a single outstanding upload attempt
static UPLOAD_IN_FLIGHT: InFlight = InFlight::new();

/// Periodic reporter tick
#[embassy_executor::task]
pub async fn report(stack: Stack<'static>) {
    loop {
        let link_ready = stack.is_link_up() && stack.config_v4().is_some();
        match cycle_decision(link_ready, &UPLOAD_IN_FLIGHT) {
            CycleDecision::SkipLinkDown => {
                info!("[report] network not connected, deferring this cycle");
            }
            CycleDecision::SkipBusy => {
                warn!("[report] previous upload still outstanding, skipping this cycle");
            }
            CycleDecision::Upload => {
                UPLOAD_REQUESTS.send(SYSTEM_STATE.snapshot()).await;
            }
        }

        Timer::after(config::REPORT_INTERVAL).await;
    }
}

/// Upload driver owning the socket buffers
#[embassy_executor::task]
pub async fn upload(stack: Stack<'static>) -> ! {
    let mut rx_buffer = [0u8; 512];
    let mut tx_buffer = [0u8; payload::REQUEST_CAPACITY];

    loop {
        let snapshot = UPLOAD_REQUESTS.receive().await;
        run_attempt(stack, &snapshot, &mut rx_buffer, &mut tx_buffer).await;
        UPLOAD_IN_FLIGHT.release();
    }
}

/// Drives one attempt through its lifecycle. Any terminal state returns.
async fn run_attempt(
    stack: Stack<'static>,
    snapshot: &Snapshot,
    rx_buffer: &mut [u8],
    tx_buffer: &mut [u8],
) {
    let collector: Ipv4Addr = match config::COLLECTOR_IP.parse() {
        Ok(address) => address,
        Err(_) => {
            warn!(
                "[report] collector address {} is not a valid IPv4 address, dropping snapshot",
                config::COLLECTOR_IP
            );
            return;
        }
    };

    let request = match payload::http_request(config::COLLECTOR_IP, snapshot, config::DEVICE_ID) {
        Ok(request) => request,
        Err(e) => {
            warn!("[report] request assembly failed: {}", e);
            return;
        }
    };

    let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
    let endpoint = IpEndpoint::from(SocketAddrV4::new(collector, config::COLLECTOR_PORT));

    info!(
        "[report] connecting to {}:{}",
        config::COLLECTOR_IP,
        config::COLLECTOR_PORT
    );

    let mut state = UploadState::Connecting;

    state = match socket.connect(endpoint).await {
        Ok(()) => state.step(UploadEvent::ConnectOk),
        Err(e) => {
            warn!("[report] connect failed: {}", e);
            socket.abort();
            state.step(UploadEvent::ConnectFailed)
        }
    };

    if state == UploadState::Sending {
        state = match socket.write_all(request.as_bytes()).await {
            Ok(()) => state.step(UploadEvent::WriteOk),
            Err(e) => {
                warn!("[report] write failed: {}", e);
                socket.abort();
                state.step(UploadEvent::WriteFailed)
            }
        };
    }

    if state == UploadState::AwaitingSentConfirmation {
        // flush() resolves once the transmit buffer has drained into the
        // stack; the payload counts as delivered at that point and no
        // response is read.
        state = match socket.flush().await {
            Ok(()) => state.step(UploadEvent::Sent),
            Err(e) => {
                warn!("[report] send confirmation failed: {}", e);
                socket.abort();
                state.step(UploadEvent::SendFailed)
            }
        };
    }

    if state == UploadState::Closed {
        socket.close();
        info!("[report] payload delivered");
    }
}
