//! Zone gate: edge-triggered job generation from player proximity.

use serde::{Deserialize, Serialize};

/// One-shot action fired on a zone edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneAction {
    /// Player entered the generation zone.
    StartGeneration,
    /// Player left the destroy zone after having entered the generation zone.
    StopAndExpire,
}

/// Latch remembering whether the player entered the generation zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoneGate {
    /// Waiting for the player to enter the generation zone.
    #[default]
    Outside,
    /// Generation started; waiting for the player to leave the destroy zone.
    Inside,
}

impl ZoneGate {
    /// Feed this tick's proximity booleans and return the edge action, if any.
    ///
    /// Entering fires once per entry; leaving the destroy zone only fires
    /// after an entry and re-arms the entry edge.
    pub fn update(
        &mut self,
        in_generation_zone: bool,
        out_of_destroy_zone: bool,
    ) -> Option<ZoneAction> {
        match *self {
            ZoneGate::Outside if in_generation_zone => {
                *self = ZoneGate::Inside;
                Some(ZoneAction::StartGeneration)
            }
            ZoneGate::Inside if out_of_destroy_zone => {
                *self = ZoneGate::Outside;
                Some(ZoneAction::StopAndExpire)
            }
            _ => None,
        }
    }

    /// Whether generation was started and not yet stopped.
    pub fn is_inside(self) -> bool {
        self == ZoneGate::Inside
    }
}
