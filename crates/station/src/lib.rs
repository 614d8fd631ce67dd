#![warn(missing_docs)]
//! Per-station update loop: decides when a batch of job booklets is stable
//! enough to place and drives job generation from player proximity.

mod collaborators;
mod driver;
mod gate;
mod zone;

pub use collaborators::{BookletRenderer, JobGenerator, JobRegistry, ProximitySensor, StationHost};
pub use driver::{StationDriver, TickReport};
pub use gate::{GateParams, GatePhase, GateState, GenerationGate};
pub use zone::{ZoneAction, ZoneGate};
