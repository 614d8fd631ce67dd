//! Tick harness for deterministic, tick-based station tests.
//!
//! Steps a small simulation for a fixed number of ticks and records a
//! snapshot of selected state after each step, so tests can assert on the
//! whole timeline instead of poking at state between manual steps.

use anyhow::Result;
use booklet_core::SimTick;
use serde::Serialize;

/// Configuration for a tick run.
#[derive(Debug, Clone)]
pub struct TickHarnessConfig {
    /// Human-readable name (written into the report).
    pub name: String,
    /// Number of ticks to step (report includes the initial snapshot at tick 0).
    pub ticks: u64,
}

/// Single snapshot frame captured at a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Every frame of a run.
#[derive(Debug, Clone, Serialize)]
pub struct TickRun<S> {
    /// Name from the config.
    pub name: String,
    /// Frames in tick order.
    pub frames: Vec<TickFrame<S>>,
}

impl<S> TickRun<S> {
    /// First frame whose snapshot satisfies `pred`.
    pub fn first_tick_where(&self, mut pred: impl FnMut(&S) -> bool) -> Option<u64> {
        self.frames
            .iter()
            .find(|frame| pred(&frame.snapshot))
            .map(|frame| frame.tick)
    }

    /// Snapshots in tick order.
    pub fn snapshots(&self) -> impl Iterator<Item = &S> {
        self.frames.iter().map(|frame| &frame.snapshot)
    }
}

impl<S: Serialize> TickRun<S> {
    /// Pretty JSON of the whole run, for failure output or CI artifacts.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run `ticks` steps and collect the frames.
///
/// Captures the initial snapshot at tick 0, then steps `config.ticks` times,
/// capturing a snapshot after each step (so the run contains `ticks + 1` frames).
/// `step` receives the tick being simulated; the snapshot after it is labelled
/// with the following tick.
pub fn run_ticks<State, Snapshot, StepFn, SnapFn>(
    config: TickHarnessConfig,
    mut state: State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> TickRun<Snapshot>
where
    StepFn: FnMut(SimTick, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(config.ticks as usize + 1);

    let mut tick = SimTick::ZERO;
    frames.push(TickFrame {
        tick: tick.0,
        snapshot: snapshot(tick, &state),
    });

    for _ in 0..config.ticks {
        step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(TickFrame {
            tick: tick.0,
            snapshot: snapshot(tick, &state),
        });
    }

    TickRun {
        name: config.name,
        frames,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_records_initial_frame_plus_one_per_step() {
        let run = run_ticks(
            TickHarnessConfig {
                name: "counter".into(),
                ticks: 3,
            },
            0u32,
            |_, count| *count += 1,
            |_, count| *count,
        );
        let ticks: Vec<u64> = run.frames.iter().map(|f| f.tick).collect();
        assert_eq!(ticks, vec![0, 1, 2, 3]);
        assert_eq!(run.snapshots().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(run.first_tick_where(|c| *c >= 2), Some(2));
        assert!(run.to_json().expect("json").contains("\"counter\""));
    }
}
