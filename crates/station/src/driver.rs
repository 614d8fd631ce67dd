//! Per-tick station update tying the gates to the placement coordinator.

use crate::collaborators::StationHost;
use crate::gate::{GateParams, GatePhase, GenerationGate};
use crate::zone::{ZoneAction, ZoneGate};
use booklet_core::{Job, JobId, PlacementRecord, SimTick, StationId};
use booklet_layout::{PlacementCoordinator, PlacementOptions};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// What happened at one station during one tick.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickReport {
    /// Phase reported by the generation gate.
    pub phase: GatePhase,
    /// Booklets placed this tick.
    pub placed: Vec<PlacementRecord>,
    /// Zone edge fired this tick.
    pub zone_action: Option<ZoneAction>,
}

/// Drives every station's gates and placement from the host's tick.
pub struct StationDriver {
    gate: GenerationGate,
    zones: HashMap<StationId, ZoneGate>,
    coordinator: PlacementCoordinator,
}

impl StationDriver {
    /// Create a driver around an existing coordinator.
    pub fn new(gate_params: GateParams, coordinator: PlacementCoordinator) -> Self {
        Self {
            gate: GenerationGate::new(gate_params),
            zones: HashMap::new(),
            coordinator,
        }
    }

    /// Generation gate (read-only).
    pub fn gate(&self) -> &GenerationGate {
        &self.gate
    }

    /// Placement coordinator (read-only).
    pub fn coordinator(&self) -> &PlacementCoordinator {
        &self.coordinator
    }

    /// Apply edited settings; existing booklets are not moved.
    pub fn set_options(&mut self, options: PlacementOptions) {
        self.coordinator.set_options(options);
    }

    /// Run one update for `station`.
    ///
    /// Nothing happens until the host reports the station loaded. Booklets
    /// are placed only on the tick the gate reports [`GatePhase::Ready`];
    /// zone edges are evaluated every loaded tick.
    pub fn tick<H: StationHost>(
        &mut self,
        station: &StationId,
        tick: SimTick,
        host: &mut H,
    ) -> TickReport {
        if !host.is_loaded(station) {
            return TickReport::default();
        }

        let busy = host.is_busy(station) || !host.is_in_booklet_range(station);
        let available = host.available_jobs(station);
        let phase = self
            .gate
            .poll(station, available.len(), busy, tick.as_seconds());

        let placed = if phase == GatePhase::Ready {
            let placed = self.place_available(station, available, host);
            self.gate.consume(station);
            placed
        } else {
            Vec::new()
        };

        let has_taken_jobs = host.taken_job_count(station) > 0;
        let in_generation_zone = host.is_in_generation_zone(station);
        let out_of_destroy_zone = host.is_out_of_destroy_zone(station, has_taken_jobs);
        let zone_action = self
            .zones
            .entry(station.clone())
            .or_default()
            .update(in_generation_zone, out_of_destroy_zone);
        match zone_action {
            Some(ZoneAction::StartGeneration) => {
                info!(%station, "player entered job generation zone");
                host.start_generation(station);
            }
            Some(ZoneAction::StopAndExpire) => {
                info!(%station, "player left job destroy zone; expiring jobs");
                host.stop_generation(station);
                host.expire_all(station);
            }
            None => {}
        }

        TickReport {
            phase,
            placed,
            zone_action,
        }
    }

    fn place_available<H: StationHost>(
        &mut self,
        station: &StationId,
        available: Vec<Job>,
        host: &mut H,
    ) -> Vec<PlacementRecord> {
        debug!(%station, "generating job booklets");
        let already_processed = host.processed_jobs(station);
        let candidates: Vec<Job> = available
            .into_iter()
            .filter(|job| !already_processed.contains(&job.id))
            .collect();

        let placed = self.coordinator.place_batch(station, &candidates);
        let by_id: HashMap<&JobId, &Job> = candidates.iter().map(|job| (&job.id, job)).collect();
        for record in &placed {
            if let Some(job) = by_id.get(&record.job_id) {
                host.spawn_booklet(station, job, record);
            }
        }
        if !placed.is_empty() {
            info!(%station, booklets = placed.len(), "placed job booklets");
        }
        placed
    }
}
