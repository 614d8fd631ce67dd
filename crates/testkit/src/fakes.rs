//! In-memory station host used by tests and the headless scenario runner.

use booklet_core::{Job, JobId, PlacementRecord, StationId};
use booklet_station::{BookletRenderer, JobGenerator, JobRegistry, ProximitySensor};
use std::collections::{BTreeMap, HashSet};

/// Scriptable state of one fake station.
#[derive(Debug, Clone)]
pub struct FakeStation {
    /// Reported by [`JobRegistry::is_loaded`].
    pub loaded: bool,
    /// Jobs on offer.
    pub available: Vec<Job>,
    /// Jobs the host claims to have spawned already.
    pub processed: HashSet<JobId>,
    /// Jobs taken by the player.
    pub taken: usize,
    /// Reported by [`JobGenerator::is_busy`].
    pub busy: bool,
    /// Player within booklet range.
    pub in_booklet_range: bool,
    /// Player within the generation zone.
    pub in_generation_zone: bool,
    /// Player outside the destroy zone.
    pub out_of_destroy_zone: bool,
    /// Player outside the wider destroy zone used once jobs were taken.
    pub out_of_taken_destroy_zone: bool,
    /// Whether generation is currently running.
    pub generating: bool,
    /// Number of `start_generation` calls.
    pub starts: u32,
    /// Number of `stop_generation` calls.
    pub stops: u32,
    /// Number of `expire_all` calls.
    pub expirations: u32,
    /// Every booklet spawned, in spawn order.
    pub spawned: Vec<PlacementRecord>,
}

impl Default for FakeStation {
    fn default() -> Self {
        Self {
            loaded: true,
            available: Vec::new(),
            processed: HashSet::new(),
            taken: 0,
            busy: false,
            in_booklet_range: true,
            in_generation_zone: false,
            out_of_destroy_zone: false,
            out_of_taken_destroy_zone: false,
            generating: false,
            starts: 0,
            stops: 0,
            expirations: 0,
            spawned: Vec::new(),
        }
    }
}

impl FakeStation {
    /// Put the player at the office (booklet range and generation zone).
    pub fn player_at_office(&mut self) {
        self.in_booklet_range = true;
        self.in_generation_zone = true;
        self.out_of_destroy_zone = false;
        self.out_of_taken_destroy_zone = false;
    }

    /// Move the player far away (outside every zone).
    pub fn player_far_away(&mut self) {
        self.in_booklet_range = false;
        self.in_generation_zone = false;
        self.out_of_destroy_zone = true;
        self.out_of_taken_destroy_zone = true;
    }
}

/// A set of fake stations implementing every host interface.
#[derive(Debug, Clone, Default)]
pub struct FakeYard {
    stations: BTreeMap<StationId, FakeStation>,
}

impl FakeYard {
    /// Empty yard; stations appear on first access.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to `station`, created with defaults if missing.
    pub fn station_mut(&mut self, station: &StationId) -> &mut FakeStation {
        self.stations.entry(station.clone()).or_default()
    }

    /// Read access to `station`.
    pub fn station(&self, station: &StationId) -> Option<&FakeStation> {
        self.stations.get(station)
    }

    /// Offer more jobs at `station`.
    pub fn add_jobs(&mut self, station: &StationId, jobs: impl IntoIterator<Item = Job>) {
        self.station_mut(station).available.extend(jobs);
    }

    /// Booklets spawned at `station` so far.
    pub fn spawned(&self, station: &StationId) -> &[PlacementRecord] {
        self.stations
            .get(station)
            .map(|s| s.spawned.as_slice())
            .unwrap_or(&[])
    }
}

impl JobRegistry for FakeYard {
    fn is_loaded(&self, station: &StationId) -> bool {
        self.stations.get(station).is_some_and(|s| s.loaded)
    }

    fn available_jobs(&self, station: &StationId) -> Vec<Job> {
        self.stations
            .get(station)
            .map(|s| s.available.clone())
            .unwrap_or_default()
    }

    fn processed_jobs(&self, station: &StationId) -> HashSet<JobId> {
        self.stations
            .get(station)
            .map(|s| s.processed.clone())
            .unwrap_or_default()
    }

    fn taken_job_count(&self, station: &StationId) -> usize {
        self.stations.get(station).map_or(0, |s| s.taken)
    }
}

impl JobGenerator for FakeYard {
    fn is_busy(&self, station: &StationId) -> bool {
        self.stations.get(station).is_some_and(|s| s.busy)
    }

    fn start_generation(&mut self, station: &StationId) {
        let s = self.station_mut(station);
        s.generating = true;
        s.starts += 1;
    }

    fn stop_generation(&mut self, station: &StationId) {
        let s = self.station_mut(station);
        s.generating = false;
        s.stops += 1;
    }

    fn expire_all(&mut self, station: &StationId) {
        let s = self.station_mut(station);
        s.available.clear();
        s.expirations += 1;
    }
}

impl ProximitySensor for FakeYard {
    fn is_in_booklet_range(&self, station: &StationId) -> bool {
        self.stations.get(station).is_some_and(|s| s.in_booklet_range)
    }

    fn is_in_generation_zone(&self, station: &StationId) -> bool {
        self.stations
            .get(station)
            .is_some_and(|s| s.in_generation_zone)
    }

    fn is_out_of_destroy_zone(&self, station: &StationId, has_taken_jobs: bool) -> bool {
        self.stations.get(station).is_some_and(|s| {
            if has_taken_jobs {
                s.out_of_taken_destroy_zone
            } else {
                s.out_of_destroy_zone
            }
        })
    }
}

impl BookletRenderer for FakeYard {
    fn spawn_booklet(&mut self, station: &StationId, _job: &Job, record: &PlacementRecord) {
        self.station_mut(station).spawned.push(record.clone());
    }
}
