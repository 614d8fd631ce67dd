//! Headless station scenarios.
//!
//! A scenario scripts job arrivals, generator activity and player movement
//! per station; the runner feeds it through a [`StationDriver`] tick by tick.

use anyhow::{Context, Result};
use booklet_core::{Job, JobType, SimTick, StationId};
use booklet_layout::{LayoutParams, PlacementCoordinator};
use booklet_station::{GateParams, StationDriver, ZoneAction};
use booklet_testkit::{FakeYard, JsonlSink, PlacementEvent};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::Path};
use tracing::{debug, info};

use crate::config::Settings;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    pub stations: Vec<StationScript>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationScript {
    pub id: StationId,
    #[serde(default)]
    pub arrivals: Vec<Arrival>,
    /// The generator reports busy for every tick before this one.
    #[serde(default)]
    pub busy_until_tick: u64,
    #[serde(default)]
    pub player_arrives_at_tick: u64,
    #[serde(default)]
    pub player_leaves_at_tick: Option<u64>,
    #[serde(default)]
    pub taken_jobs: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Arrival {
    pub tick: u64,
    pub jobs: Vec<Job>,
}

impl StationScript {
    fn player_present(&self, tick: u64) -> bool {
        tick >= self.player_arrives_at_tick
            && self.player_leaves_at_tick.map_or(true, |leave| tick < leave)
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ScenarioSummary {
    pub ticks: u64,
    pub booklets: usize,
    pub per_station: BTreeMap<StationId, usize>,
    pub generation_starts: usize,
    pub expirations: usize,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Seven jobs (three shunting, four transport) at one station, one late
    /// arrival, and the player leaving near the end.
    pub fn demo() -> Self {
        let jobs = vec![
            Job::new("HB-FH-01", JobType::Transport, "SM"),
            Job::new("HB-SL-02", JobType::ShuntingLoad, "GF"),
            Job::new("HB-FH-03", JobType::Transport, "CSW"),
            Job::new("HB-SU-04", JobType::ShuntingUnload, "FF"),
            Job::new("HB-LH-05", JobType::EmptyHaul, "MF"),
            Job::new("HB-SL-06", JobType::ShuntingLoad, "HB"),
            Job::new("HB-FH-07", JobType::Transport, "OWN"),
        ];
        Scenario {
            stations: vec![StationScript {
                id: StationId::from("HB"),
                arrivals: vec![
                    Arrival { tick: 0, jobs },
                    Arrival {
                        tick: 40,
                        jobs: vec![Job::new("HB-FH-08", JobType::Transport, "FRS")],
                    },
                ],
                busy_until_tick: 5,
                player_arrives_at_tick: 0,
                player_leaves_at_tick: Some(100),
                taken_jobs: 0,
            }],
        }
    }
}

/// Run `scenario` for `ticks` ticks, writing every placement to `sink`.
pub fn run_scenario(
    scenario: &Scenario,
    settings: &Settings,
    ticks: u64,
    seed: u64,
    sink: &mut JsonlSink,
) -> Result<ScenarioSummary> {
    let coordinator = PlacementCoordinator::new(
        LayoutParams::default(),
        settings.placement_options(),
        StdRng::seed_from_u64(seed),
    );
    let mut driver = StationDriver::new(GateParams::default(), coordinator);
    let mut yard = FakeYard::new();
    for script in &scenario.stations {
        yard.station_mut(&script.id).taken = script.taken_jobs;
    }

    let mut summary = ScenarioSummary {
        ticks,
        ..ScenarioSummary::default()
    };
    for t in 0..ticks {
        let tick = SimTick(t);
        for script in &scenario.stations {
            let jobs = script
                .arrivals
                .iter()
                .filter(|arrival| arrival.tick == t)
                .flat_map(|arrival| arrival.jobs.iter().cloned());
            yard.add_jobs(&script.id, jobs);

            let station = yard.station_mut(&script.id);
            station.busy = t < script.busy_until_tick;
            if script.player_present(t) {
                station.player_at_office();
            } else {
                station.player_far_away();
            }

            let report = driver.tick(&script.id, tick, &mut yard);
            debug!(station = %script.id, tick = t, phase = ?report.phase, "station ticked");
            match report.zone_action {
                Some(ZoneAction::StartGeneration) => summary.generation_starts += 1,
                Some(ZoneAction::StopAndExpire) => summary.expirations += 1,
                None => {}
            }
            for record in &report.placed {
                sink.write(&PlacementEvent {
                    tick,
                    station: &script.id,
                    record,
                })?;
            }
            summary.booklets += report.placed.len();
            *summary.per_station.entry(script.id.clone()).or_default() += report.placed.len();
        }
    }

    info!(
        ticks,
        booklets = summary.booklets,
        stations = summary.per_station.len(),
        "scenario finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn sink(name: &str) -> JsonlSink {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("booklet_{name}_{timestamp}.jsonl"));
        JsonlSink::create(path).expect("sink")
    }

    #[test]
    fn demo_places_initial_batch_and_late_arrival() {
        let mut sink = sink("demo");
        let summary = run_scenario(&Scenario::demo(), &Settings::default(), 120, 3, &mut sink)
            .expect("scenario runs");

        assert_eq!(summary.booklets, 8);
        assert_eq!(summary.per_station.get(&StationId::from("HB")), Some(&8));
        assert_eq!(summary.generation_starts, 1);
        assert_eq!(summary.expirations, 1);
        assert_eq!(sink.written(), 8);
    }

    #[test]
    fn player_window_is_half_open() {
        let script = &Scenario::demo().stations[0];
        assert!(script.player_present(0));
        assert!(script.player_present(99));
        assert!(!script.player_present(100));
    }

    #[test]
    fn scenario_parses_short_job_tags() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"stations":[{"id":"FF","arrivals":[{"tick":2,"jobs":[
                {"id":"FF-SL-01","job_type":"SL","destination":"HB"}
            ]}]}]}"#,
        )
        .expect("scenario json");
        let station = &scenario.stations[0];
        assert_eq!(station.busy_until_tick, 0);
        assert_eq!(station.arrivals[0].jobs[0].job_type, JobType::ShuntingLoad);
    }
}
