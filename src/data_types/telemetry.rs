use serde_derive::{Deserialize, Serialize};

use crate::data_types::common::{Identifiable, TransportMode, VehicleId};

/// A live telemetry sample. Ephemeral: the whole set is replaced on every poll.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VehiclePosition {
    pub id: VehicleId,
    pub lat: f64,
    pub lng: f64,
    pub mode: TransportMode,
}

impl Identifiable for VehiclePosition {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Estimated vehicle position on a planned leg, recomputed every simulation
/// tick. `segment_index` points into the owning route's full segment list.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedVehicle {
    pub id: VehicleId,
    pub segment_index: usize,

    // 0.0 inclusive to 1.0 exclusive, cyclic
    pub progress: f64,

    pub mode: TransportMode,
}
