//! Placement records emitted for the booklet renderer.

use crate::job::JobId;
use serde::{Deserialize, Serialize};

/// Fraction of the surface used for booklets; keeps them off the edges.
pub const SURFACE_MARGIN: f32 = 0.9;

/// Height added per elevation step so stacked booklets never z-fight.
pub const ELEVATION_STEP: f32 = 0.001;

/// Final placement of one job booklet on a spawn surface.
///
/// `u` runs along a row, `v` across rows. Both are normalized to `[0, 1]`
/// before jitter; the jitter is kept separate so the logical layout stays
/// inspectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Job the booklet belongs to.
    pub job_id: JobId,
    /// Normalized position within the row.
    pub u: f32,
    /// Normalized row position.
    pub v: f32,
    /// Cosmetic offset added to `u`.
    pub jitter_u: f32,
    /// Cosmetic offset added to `v`.
    pub jitter_v: f32,
    /// Stacking index; strictly increasing in emission order within a batch.
    pub elevation: u32,
    /// Cosmetic yaw offset in degrees.
    pub rotation_degrees: f32,
}

impl PlacementRecord {
    /// Jittered `(u, v)`.
    pub fn position(&self) -> (f32, f32) {
        (self.u + self.jitter_u, self.v + self.jitter_v)
    }

    /// Map the jittered position onto a surface of the given extent.
    ///
    /// Rows run along the surface's x axis and items within a row along z,
    /// both centered on the surface origin.
    pub fn surface_offset(&self, extent: SurfaceExtent) -> SurfaceOffset {
        let (u, v) = self.position();
        SurfaceOffset {
            x: -extent.x_size * (v - 0.5) * SURFACE_MARGIN,
            y: self.elevation as f32 * ELEVATION_STEP,
            z: -extent.z_size * (u - 0.5) * SURFACE_MARGIN,
        }
    }
}

/// Size of a spawn surface in its local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceExtent {
    /// Extent along local x.
    pub x_size: f32,
    /// Extent along local z.
    pub z_size: f32,
}

/// Local offset from the surface origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceOffset {
    /// Local x.
    pub x: f32,
    /// Local height above the surface.
    pub y: f32,
    /// Local z.
    pub z: f32,
}
