//! Placement coordinator: per-station bookkeeping around the packer.
//!
//! The first non-empty batch on a surface gets the full packed layout. Later
//! arrivals are dropped at a random spot on the trailing edge instead, since
//! re-packing would move booklets that are already on the table.

use crate::ordering::{order_jobs, OrderingMode};
use crate::packer::{items_per_row, pack_groups, LayoutParams};
use booklet_core::{Job, JobId, PlacementRecord, StationId};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Trailing-edge row used for late arrivals.
const SECONDARY_V: f32 = 1.0;

/// Engine-facing subset of the user settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOptions {
    /// Pack each category separately.
    pub group_by_category: bool,
    /// Emit (and stack) the layout in reverse order.
    pub front_to_back: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            group_by_category: true,
            front_to_back: false,
        }
    }
}

/// What a surface has already received.
#[derive(Debug, Clone, Default)]
pub struct SurfaceSession {
    processed: HashSet<JobId>,
    initial_batch_done: bool,
}

impl SurfaceSession {
    /// Whether a booklet was already emitted for `job`.
    pub fn is_processed(&self, job: &JobId) -> bool {
        self.processed.contains(job)
    }

    /// Number of jobs that received a booklet.
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Whether the packed initial layout has run.
    pub fn initial_batch_done(&self) -> bool {
        self.initial_batch_done
    }
}

/// Hands out placement records for every station surface.
pub struct PlacementCoordinator {
    params: LayoutParams,
    options: PlacementOptions,
    rng: StdRng,
    sessions: HashMap<StationId, SurfaceSession>,
}

impl PlacementCoordinator {
    /// Create a coordinator drawing jitter from `rng`.
    pub fn new(params: LayoutParams, options: PlacementOptions, rng: StdRng) -> Self {
        Self {
            params,
            options,
            rng,
            sessions: HashMap::new(),
        }
    }

    /// Layout tunables in use.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Current engine options.
    pub fn options(&self) -> PlacementOptions {
        self.options
    }

    /// Swap options (e.g. after the settings were edited).
    pub fn set_options(&mut self, options: PlacementOptions) {
        self.options = options;
    }

    /// Session of `station`, if it has seen a batch.
    pub fn session(&self, station: &StationId) -> Option<&SurfaceSession> {
        self.sessions.get(station)
    }

    /// Place every candidate that has not been placed on `station` yet.
    ///
    /// Candidates already processed (or repeated within `candidates`) are
    /// skipped, so a duplicate call emits nothing.
    pub fn place_batch(&mut self, station: &StationId, candidates: &[Job]) -> Vec<PlacementRecord> {
        let session = self.sessions.entry(station.clone()).or_default();

        let mut seen = HashSet::new();
        let mut fresh: Vec<&Job> = Vec::new();
        for job in candidates {
            if !session.processed.contains(&job.id) && seen.insert(&job.id) {
                fresh.push(job);
            }
        }
        if fresh.is_empty() {
            debug!(%station, "no new jobs to place");
            return Vec::new();
        }

        let mut placed: Vec<(&Job, f32, f32)> = if session.initial_batch_done {
            fresh
                .iter()
                .map(|&job| (job, self.rng.gen_range(0.0..=1.0), SECONDARY_V))
                .collect()
        } else {
            session.initial_batch_done = true;
            initial_layout(station, &fresh, &self.params, self.options)
        };

        if self.options.front_to_back {
            placed.reverse();
        }

        let mut records = Vec::with_capacity(placed.len());
        for (elevation, (job, u, v)) in (self.params.elevation_base..).zip(placed) {
            let record = PlacementRecord {
                job_id: job.id.clone(),
                u,
                v,
                jitter_u: symmetric(&mut self.rng, self.params.position_jitter),
                jitter_v: symmetric(&mut self.rng, self.params.position_jitter),
                elevation,
                rotation_degrees: symmetric(&mut self.rng, self.params.rotation_jitter_degrees),
            };
            debug!(
                %station,
                job = %record.job_id,
                destination = %job.destination,
                u = record.u,
                v = record.v,
                elevation = record.elevation,
                "placed booklet"
            );
            session.processed.insert(job.id.clone());
            records.push(record);
        }
        records
    }
}

fn initial_layout<'a>(
    station: &StationId,
    jobs: &[&'a Job],
    params: &LayoutParams,
    options: PlacementOptions,
) -> Vec<(&'a Job, f32, f32)> {
    let mode = OrderingMode::from_group_by_category(options.group_by_category);
    let groups = order_jobs(jobs, mode);
    for group in &groups {
        debug!(
            %station,
            ?mode,
            jobs = group.len(),
            per_row = items_per_row(group.len(), params),
            "packing group"
        );
    }
    pack_groups(&groups, params)
        .into_iter()
        .map(|slot| (slot.job, slot.u, slot.v))
        .collect()
}

/// Uniform draw in `[-half_width, half_width]`; zero when jitter is disabled.
fn symmetric(rng: &mut StdRng, half_width: f32) -> f32 {
    if half_width > 0.0 {
        rng.gen_range(-half_width..=half_width)
    } else {
        0.0
    }
}
