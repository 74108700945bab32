//! Shared System State
//!
//! Holds the node's global state: the latest climate reading, the flame
//! detector level and the derived alarm condition.
//!
//! The state is shared between the sampler (writer), the reporter and the
//! annunciator (readers). Every field is an independent atomic, so no reader
//! can ever observe a torn value and no access can block or starve another
//! task. Cross-field consistency is deliberately not promised: a snapshot may
//! combine a climate reading with a flame level from the next sampling cycle,
//! which is acceptable because the reporter tolerates one period of skew.
//!
//! # Write Ownership
//! - `temperature`, `humidity`: sampler only, and only on a successful read
//! - `flame_detected`: sampler only, every cycle
//! - `alarm_active`: sampler only (it owns the alarm derivation)

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// One successful climate measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Degrees Celsius
    pub temperature: f32,
    /// Relative humidity percent
    pub humidity: f32,
}

/// A plain copy of the shared state, taken field-by-field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Last successful temperature reading, degrees Celsius
    pub temperature: f32,
    /// Last successful humidity reading, relative percent
    pub humidity: f32,
    /// Latest flame detector state
    pub flame_detected: bool,
    /// Derived alarm condition
    pub alarm_active: bool,
}

/// Lock-free store for the node's shared state.
///
/// Float fields are stored as their IEEE-754 bit patterns in `AtomicU32`, so
/// a preempted reader can never see half of a write.
pub struct StateStore {
    temperature: AtomicU32,
    humidity: AtomicU32,
    flame_detected: AtomicBool,
    alarm_active: AtomicBool,
}

impl StateStore {
    /// Creates a store with zeroed readings and no alarm.
    pub const fn new() -> Self {
        Self {
            temperature: AtomicU32::new(0),
            humidity: AtomicU32::new(0),
            flame_detected: AtomicBool::new(false),
            alarm_active: AtomicBool::new(false),
        }
    }

    /// Overwrites both climate fields with a fresh reading.
    pub fn set_climate(&self, reading: Reading) {
        self.temperature
            .store(reading.temperature.to_bits(), Ordering::Relaxed);
        self.humidity
            .store(reading.humidity.to_bits(), Ordering::Relaxed);
    }

    /// Updates the flame detector state.
    pub fn set_flame(&self, detected: bool) {
        self.flame_detected.store(detected, Ordering::Relaxed);
    }

    /// Updates the alarm condition.
    pub fn set_alarm(&self, active: bool) {
        self.alarm_active.store(active, Ordering::Relaxed);
    }

    /// Applies the outcome of one full sampling cycle.
    ///
    /// A failed climate read (`None`) keeps the previous values; the flame
    /// state is written unconditionally. The alarm condition tracks the flame
    /// input.
    pub fn record_sample(&self, reading: Option<Reading>, flame_detected: bool) {
        if let Some(reading) = reading {
            self.set_climate(reading);
        }
        self.set_flame(flame_detected);
        self.set_alarm(flame_detected);
    }

    /// Returns the current flame detector state.
    pub fn flame_detected(&self) -> bool {
        self.flame_detected.load(Ordering::Relaxed)
    }

    /// Returns the current alarm condition.
    pub fn alarm_active(&self) -> bool {
        self.alarm_active.load(Ordering::Relaxed)
    }

    /// Copies all four fields out of the store.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            temperature: f32::from_bits(self.temperature.load(Ordering::Relaxed)),
            humidity: f32::from_bits(self.humidity.load(Ordering::Relaxed)),
            flame_detected: self.flame_detected.load(Ordering::Relaxed),
            alarm_active: self.alarm_active.load(Ordering::Relaxed),
        }
    }
}

impl Default for StateStore {
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
    fn snapshot_reflects_recorded_sample() {
        let store = StateStore::new();
        store.record_sample(
            Some(Reading {
                temperature: 23.45,
                humidity: 60.12,
            }),
            true,
        );

        let snapshot = store.snapshot();
        assert_eq!(snapshot.temperature, 23.45);
        assert_eq!(snapshot.humidity, 60.12);
        assert!(snapshot.flame_detected);
        assert!(snapshot.alarm_active);
    }

    #[test]
    fn failed_read_keeps_climate_stale_but_updates_flame() {
        let store = StateStore::new();
        store.record_sample(
            Some(Reading {
                temperature: 21.0,
                humidity: 55.5,
            }),
            false,
        );

        store.record_sample(None, true);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.temperature, 21.0);
        assert_eq!(snapshot.humidity, 55.5);
        assert!(snapshot.flame_detected);
    }

    #[test]
    fn alarm_tracks_flame_input() {
        let store = StateStore::new();

        store.record_sample(None, true);
        assert!(store.alarm_active());

        store.record_sample(None, false);
        assert!(!store.alarm_active());
    }

    #[test]
    fn concurrent_snapshots_never_observe_torn_floats() {
        // Two sentinel bit patterns per field; a torn read would surface as a
        // mix of the two.
        const TEMP_A: u32 = 0x1111_1111;
        const TEMP_B: u32 = 0x2222_2222;
        const HUM_A: u32 = 0x3333_3333;
        const HUM_B: u32 = 0x4444_4444;

        let store = Arc::new(StateStore::new());
        store.set_climate(Reading {
            temperature: f32::from_bits(TEMP_A),
            humidity: f32::from_bits(HUM_A),
        });

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50_000u32 {
                    let (t, h) = if i % 2 == 0 {
                        (TEMP_A, HUM_A)
                    } else {
                        (TEMP_B, HUM_B)
                    };
                    store.set_climate(Reading {
                        temperature: f32::from_bits(t),
                        humidity: f32::from_bits(h),
                    });
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..50_000 {
                        let snapshot = store.snapshot();
                        let t = snapshot.temperature.to_bits();
                        let h = snapshot.humidity.to_bits();
                        assert!(t == TEMP_A || t == TEMP_B, "torn temperature: {t:#x}");
                        assert!(h == HUM_A || h == HUM_B, "torn humidity: {h:#x}");
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
