#![warn(missing_docs)]
//! Core primitives shared across the booklet organizer workspace.

pub mod job;
pub mod placement;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use job::{Job, JobCategory, JobId, JobType, ParseJobTypeError, StationId};
pub use placement::{PlacementRecord, SurfaceExtent, SurfaceOffset};

/// Simulation ticks per second (20 TPS => 50 ms per tick).
pub const TICKS_PER_SECOND: u64 = 20;

/// Fixed tick type driving every station update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }

    /// Wall-clock seconds elapsed since [`SimTick::ZERO`].
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / TICKS_PER_SECOND as f64
    }
}

/// Helper to derive a reproducible RNG seeded by world + station domains.
pub fn station_rng(world_seed: u64, station: &StationId) -> StdRng {
    StdRng::seed_from_u64(world_seed ^ station.stable_hash())
}
