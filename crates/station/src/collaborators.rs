//! Interfaces the station loop consumes from the host game.

use booklet_core::{Job, JobId, PlacementRecord, StationId};
use std::collections::HashSet;

/// Owner of the jobs offered at each station.
pub trait JobRegistry {
    /// Whether the station and its jobs finished loading.
    fn is_loaded(&self, station: &StationId) -> bool;
    /// Jobs currently offered at the station.
    fn available_jobs(&self, station: &StationId) -> Vec<Job>;
    /// Jobs the host already spawned booklets for by other means.
    fn processed_jobs(&self, station: &StationId) -> HashSet<JobId>;
    /// Jobs the player has taken from this station.
    fn taken_job_count(&self, station: &StationId) -> usize;
}

/// Procedural job generator.
pub trait JobGenerator {
    /// True while a generation pass is still writing jobs.
    fn is_busy(&self, station: &StationId) -> bool;
    /// Kick off job generation.
    fn start_generation(&mut self, station: &StationId);
    /// Stop any running generation.
    fn stop_generation(&mut self, station: &StationId);
    /// Expire every job still available at the station.
    fn expire_all(&mut self, station: &StationId);
}

/// Player distance checks against a station.
pub trait ProximitySensor {
    /// Close enough to the station office for booklets to spawn.
    fn is_in_booklet_range(&self, station: &StationId) -> bool;
    /// Close enough for jobs to be generated.
    fn is_in_generation_zone(&self, station: &StationId) -> bool;
    /// Far enough for jobs to be destroyed; the radius may depend on taken jobs.
    fn is_out_of_destroy_zone(&self, station: &StationId, has_taken_jobs: bool) -> bool;
}

/// Turns placement records into booklets on the spawn surface.
pub trait BookletRenderer {
    /// Spawn the booklet for `job` at `record`.
    fn spawn_booklet(&mut self, station: &StationId, job: &Job, record: &PlacementRecord);
}

/// Everything a [`StationDriver`](crate::StationDriver) talks to.
pub trait StationHost: JobRegistry + JobGenerator + ProximitySensor + BookletRenderer {}

impl<T> StationHost for T where T: JobRegistry + JobGenerator + ProximitySensor + BookletRenderer {}
