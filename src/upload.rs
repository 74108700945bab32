//! Upload attempt lifecycle.
//!
//! An upload attempt walks a fixed path over the collector connection:
//! connect, write the whole request, wait for the transmit buffer to drain,
//! close. The path is modeled as an explicit state machine advanced by
//! [`UploadEvent`]s, so the driver that owns the socket stays a flat sequence
//! of steps and every failure funnels into a single terminal state.
//!
//! [`InFlight`] is the guard that keeps at most one attempt outstanding: the
//! reporter claims it before handing a snapshot to the driver, and the driver
//! releases it when the attempt reaches a terminal state.

use portable_atomic::{AtomicBool, Ordering};

/// Phase of the current upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UploadState {
    /// Outbound connection has been initiated.
    Connecting,
    /// Connection established, request being written.
    Sending,
    /// Request handed to the stack, waiting for the transmit buffer to drain.
    AwaitingSentConfirmation,
    /// All bytes left the local transport; the connection was closed. The
    /// payload counts as delivered regardless of any remote response.
    Closed,
    /// The attempt was abandoned; the connection is left to the stack's
    /// cleanup.
    Failed,
}

/// Connection lifecycle events fed into [`UploadState::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UploadEvent {
    /// Non-blocking connect completed successfully.
    ConnectOk,
    /// Connect completed with an error or could not be initiated.
    ConnectFailed,
    /// The full request was accepted by the stack.
    WriteOk,
    /// The write was rejected or short.
    WriteFailed,
    /// The transmit buffer drained; all bytes are out.
    Sent,
    /// The drain wait failed (reset, abort).
    SendFailed,
}

impl UploadState {
    /// Advances the attempt by one event.
    ///
    /// Terminal states absorb every further event, which is what makes the
    /// close idempotent: `Closed` is entered exactly once, on the `Sent`
    /// transition. Any event that is out of order for the current phase
    /// fails the attempt.
    #[must_use]
    pub fn step(self, event: UploadEvent) -> UploadState {
        if self.is_terminal() {
            return self;
        }
        match (self, event) {
            (UploadState::Connecting, UploadEvent::ConnectOk) => UploadState::Sending,
            (UploadState::Sending, UploadEvent::WriteOk) => UploadState::AwaitingSentConfirmation,
            (UploadState::AwaitingSentConfirmation, UploadEvent::Sent) => UploadState::Closed,
            _ => UploadState::Failed,
        }
    }

    /// Whether the attempt has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadState::Closed | UploadState::Failed)
    }
}

/// Atomic guard enforcing a single outstanding upload attempt.
pub struct InFlight(AtomicBool);

impl InFlight {
    /// Creates a released guard.
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Claims the guard. Returns `false` if an attempt is already
    /// outstanding.
    pub fn try_claim(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    /// Releases the guard once the attempt reaches a terminal state.
    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Whether an attempt is currently outstanding.
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for InFlight {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    #[test]
    fn successful_attempt_walks_connect_send_sent_close() {
        let state = UploadState::Connecting
            .step(UploadEvent::ConnectOk)
            .step(UploadEvent::WriteOk)
            .step(UploadEvent::Sent);
        assert_eq!(state, UploadState::Closed);
    }

    #[test]
    fn every_failure_event_is_terminal() {
        assert_eq!(
            UploadState::Connecting.step(UploadEvent::ConnectFailed),
            UploadState::Failed
        );
        assert_eq!(
            UploadState::Sending.step(UploadEvent::WriteFailed),
            UploadState::Failed
        );
        assert_eq!(
            UploadState::AwaitingSentConfirmation.step(UploadEvent::SendFailed),
            UploadState::Failed
        );
    }

    #[test]
    fn out_of_order_events_fail_the_attempt() {
        assert_eq!(
            UploadState::Connecting.step(UploadEvent::Sent),
            UploadState::Failed
        );
        assert_eq!(
            UploadState::Sending.step(UploadEvent::ConnectOk),
            UploadState::Failed
        );
    }

    #[test]
    fn terminal_states_absorb_further_events() {
        let closed = UploadState::Closed;
        assert_eq!(closed.step(UploadEvent::Sent), UploadState::Closed);
        assert_eq!(closed.step(UploadEvent::ConnectFailed), UploadState::Closed);

        let failed = UploadState::Failed;
        assert_eq!(failed.step(UploadEvent::ConnectOk), UploadState::Failed);
    }

    #[test]
    fn guard_admits_one_claimant_until_released() {
        let guard = InFlight::new();
        assert!(guard.try_claim());
        assert!(!guard.try_claim());
        assert!(guard.is_active());

        guard.release();
        assert!(!guard.is_active());
        assert!(guard.try_claim());
    }

    #[test]
    fn concurrent_claims_admit_exactly_one() {
        let guard = Arc::new(InFlight::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = Arc::clone(&guard);
                thread::spawn(move || guard.try_claim())
            })
            .collect();

        let claimed = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|claimed| *claimed)
            .count();
        assert_eq!(claimed, 1);
    }
}
