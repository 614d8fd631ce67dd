//! Generation gate: debounces job-count churn before a batch is released.
//!
//! Job lists can change over several consecutive ticks while the procedural
//! generator is still writing. A batch is only released once the count has
//! been quiet for the debounce window.

use booklet_core::StationId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Gate tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateParams {
    /// Quiet time required after the last count change, in seconds.
    pub debounce_window_secs: f64,
}

impl Default for GateParams {
    fn default() -> Self {
        Self {
            debounce_window_secs: 0.5,
        }
    }
}

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GatePhase {
    /// Nothing to do: busy, out of range, or the last batch was consumed.
    #[default]
    Idle,
    /// The count changed on this poll; debouncing starts now.
    CountChanged,
    /// Waiting for the count to stay quiet.
    Debouncing,
    /// Stable; exactly one batch may be placed, then [`GenerationGate::consume`].
    Ready,
}

/// Gate bookkeeping for one station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateState {
    /// Count seen on the most recent sampling poll; busy polls are not samples.
    pub last_observed_count: usize,
    /// Time of the most recent count change, in seconds.
    pub last_change_secs: f64,
    /// Cleared when a batch is consumed, set again by the next count change.
    pub armed: bool,
    /// Phase reported by the last poll.
    pub phase: GatePhase,
}

impl Default for GateState {
    fn default() -> Self {
        Self {
            last_observed_count: 0,
            last_change_secs: 0.0,
            armed: true,
            phase: GatePhase::Idle,
        }
    }
}

/// Debounce gate keyed by station; entries are created on first poll.
#[derive(Debug, Clone, Default)]
pub struct GenerationGate {
    params: GateParams,
    states: HashMap<StationId, GateState>,
}

impl GenerationGate {
    /// Create a gate with the given tunables.
    pub fn new(params: GateParams) -> Self {
        Self {
            params,
            states: HashMap::new(),
        }
    }

    /// State of `station`, if it was ever polled.
    pub fn state(&self, station: &StationId) -> Option<&GateState> {
        self.states.get(station)
    }

    /// Sample the station's job count at `now_secs`.
    ///
    /// A busy poll is not a sample: it neither records the count nor touches
    /// the timer.
    pub fn poll(
        &mut self,
        station: &StationId,
        current_count: usize,
        busy: bool,
        now_secs: f64,
    ) -> GatePhase {
        let window = self.params.debounce_window_secs;
        let state = self.states.entry(station.clone()).or_default();

        state.phase = if busy {
            GatePhase::Idle
        } else if current_count != state.last_observed_count {
            debug!(
                %station,
                from = state.last_observed_count,
                to = current_count,
                "number of jobs changed"
            );
            state.last_observed_count = current_count;
            state.last_change_secs = now_secs;
            state.armed = true;
            GatePhase::CountChanged
        } else if !state.armed {
            GatePhase::Idle
        } else if now_secs - state.last_change_secs < window {
            debug!(%station, "waiting to generate job booklets");
            GatePhase::Debouncing
        } else {
            GatePhase::Ready
        };
        state.phase
    }

    /// Mark the released batch as placed; the gate idles until the count moves.
    pub fn consume(&mut self, station: &StationId) {
        let state = self.states.entry(station.clone()).or_default();
        state.armed = false;
        state.phase = GatePhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(
        gate: &mut GenerationGate,
        station: &StationId,
        counts: &[usize],
    ) -> Vec<GatePhase> {
        counts
            .iter()
            .enumerate()
            .map(|(i, count)| gate.poll(station, *count, false, i as f64 * 0.1))
            .collect()
    }

    #[test]
    fn steady_count_becomes_ready_after_window() {
        let mut gate = GenerationGate::default();
        let station = StationId::from("HB");
        let phases = samples(&mut gate, &station, &[5, 5, 5, 5, 5, 5, 5]);

        assert_eq!(
            phases,
            vec![
                GatePhase::CountChanged,
                GatePhase::Debouncing,
                GatePhase::Debouncing,
                GatePhase::Debouncing,
                GatePhase::Debouncing,
                GatePhase::Ready,
                GatePhase::Ready,
            ]
        );
    }

    #[test]
    fn count_change_restarts_timer() {
        let mut gate = GenerationGate::default();
        let station = StationId::from("HB");
        let phases = samples(&mut gate, &station, &[5, 5, 5, 6, 6, 6, 6, 6, 6, 6]);

        assert_eq!(phases[3], GatePhase::CountChanged);
        assert!(phases[4..8].iter().all(|p| *p == GatePhase::Debouncing));
        assert_eq!(phases[8], GatePhase::Ready);
        assert_eq!(gate.state(&station).map(|s| s.last_observed_count), Some(6));
    }

    #[test]
    fn busy_holds_gate_idle_without_sampling() {
        let mut gate = GenerationGate::default();
        let station = StationId::from("HB");
        assert_eq!(gate.poll(&station, 4, true, 0.0), GatePhase::Idle);
        assert_eq!(gate.poll(&station, 4, true, 1.0), GatePhase::Idle);
        assert_eq!(gate.state(&station).map(|s| s.last_observed_count), Some(0));

        assert_eq!(gate.poll(&station, 4, false, 2.0), GatePhase::CountChanged);
        assert_eq!(gate.poll(&station, 4, true, 3.0), GatePhase::Idle);
        assert_eq!(gate.poll(&station, 4, false, 3.0), GatePhase::Ready);
    }

    #[test]
    fn consumed_batch_waits_for_next_change() {
        let mut gate = GenerationGate::default();
        let station = StationId::from("HB");
        gate.poll(&station, 3, false, 0.0);
        assert_eq!(gate.poll(&station, 3, false, 1.0), GatePhase::Ready);
        gate.consume(&station);

        assert_eq!(gate.poll(&station, 3, false, 2.0), GatePhase::Idle);
        assert_eq!(gate.poll(&station, 4, false, 3.0), GatePhase::CountChanged);
        assert_eq!(gate.poll(&station, 4, false, 3.6), GatePhase::Ready);
    }

    #[test]
    fn unknown_station_starts_from_defaults() {
        let mut gate = GenerationGate::new(GateParams {
            debounce_window_secs: 0.25,
        });
        let station = StationId::from("SM");
        assert!(gate.state(&station).is_none());
        // Zero jobs matches the default count, so only the window applies.
        assert_eq!(gate.poll(&station, 0, false, 0.1), GatePhase::Debouncing);
        assert_eq!(gate.poll(&station, 0, false, 0.25), GatePhase::Ready);
    }

    #[test]
    fn stations_debounce_independently() {
        let mut gate = GenerationGate::default();
        let a = StationId::from("HB");
        let b = StationId::from("FF");
        gate.poll(&a, 2, false, 0.0);
        gate.poll(&b, 2, false, 0.4);
        assert_eq!(gate.poll(&a, 2, false, 0.5), GatePhase::Ready);
        assert_eq!(gate.poll(&b, 2, false, 0.5), GatePhase::Debouncing);
    }
}
