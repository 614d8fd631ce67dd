#![warn(missing_docs)]
//! Booklet layout: classify jobs, order them, pack them into rows and hand
//! out placement records per station surface.

mod classify;
mod coordinator;
mod ordering;
mod packer;

pub use classify::classify;
pub use coordinator::{PlacementCoordinator, PlacementOptions, SurfaceSession};
pub use ordering::{order_jobs, OrderingMode};
pub use packer::{items_per_row, pack_groups, row_gap, row_spacing, LayoutParams, Slot};
