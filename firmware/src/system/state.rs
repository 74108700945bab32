//! System State Instance
//!
//! The single shared state record coordinating the sampler, reporter and
//! annunciator. The store is lock-free (per-field atomics), so readers never
//! wait on the sampler and no field can be observed half-written.

use flamewatch::state::StateStore;

/// Global system state
///
/// Written by the sampler every cycle; snapshotted by the reporter and polled
/// by the annunciator.
pub static SYSTEM_STATE: StateStore = StateStore::new();
