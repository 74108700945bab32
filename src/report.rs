//! Reporter cycle policy.
//!
//! Decides, once per reporting period, whether a snapshot should be uploaded.
//! A cycle is skipped when the link is down (an expected deferral, not an
//! error) or when the previous attempt is still outstanding. The node never
//! force-aborts a stale attempt, it just waits for the next period.

use crate::upload::InFlight;

/// Outcome of one reporter tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleDecision {
    /// Snapshot and upload; the in-flight guard has been claimed for this
    /// attempt.
    Upload,
    /// Network not connected; nothing to do this period.
    SkipLinkDown,
    /// A previous attempt is still outstanding; defer to the next period.
    SkipBusy,
}

/// Gates one reporting cycle.
///
/// `link_ready` is the stack's view of connectivity (association plus an
/// address). The guard is only claimed when the cycle actually proceeds, so
/// a skipped cycle touches no connection state at all.
pub fn cycle_decision(link_ready: bool, in_flight: &InFlight) -> CycleDecision {
    if !link_ready {
        return CycleDecision::SkipLinkDown;
    }
    if !in_flight.try_claim() {
        return CycleDecision::SkipBusy;
    }
    CycleDecision::Upload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_down_skips_without_claiming() {
        let guard = InFlight::new();
        assert_eq!(cycle_decision(false, &guard), CycleDecision::SkipLinkDown);
        assert!(!guard.is_active());
    }

    #[test]
    fn link_down_skips_even_when_busy() {
        let guard = InFlight::new();
        assert!(guard.try_claim());
        assert_eq!(cycle_decision(false, &guard), CycleDecision::SkipLinkDown);
    }

    #[test]
    fn outstanding_attempt_defers_the_cycle() {
        let guard = InFlight::new();
        assert_eq!(cycle_decision(true, &guard), CycleDecision::Upload);
        assert_eq!(cycle_decision(true, &guard), CycleDecision::SkipBusy);
    }

    #[test]
    fn released_guard_allows_the_next_cycle() {
        let guard = InFlight::new();
        assert_eq!(cycle_decision(true, &guard), CycleDecision::Upload);
        guard.release();
        assert_eq!(cycle_decision(true, &guard), CycleDecision::Upload);
    }
}
