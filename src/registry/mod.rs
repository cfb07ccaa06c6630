pub mod http;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::vehicle::{Vehicle, VehicleUpdate};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("vehicle {0} not found")]
    NotFound(String),

    #[error("conflicting update for vehicle {id}: {detail}")]
    Conflict { id: String, detail: String },

    #[error("fleet registry unavailable: {0}")]
    Unavailable(String),
}

/// Port to the system of record for vehicle state. One implementation talks
/// to the fleet HTTP endpoint, another holds the fleet in process; the engine
/// never knows which.
#[async_trait]
pub trait FleetRegistry: Send + Sync {
    /// Current fleet, in a stable registry-defined order. Winner tie-breaks
    /// follow this order, so implementations must preserve it across calls.
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, RegistryError>;

    /// Applies a partial update to one vehicle, atomically with respect to
    /// concurrent updates of the same vehicle. An `expected_status` guard
    /// that no longer holds must fail with `Conflict`, not last-write-win.
    async fn update_vehicle(
        &self,
        id: &str,
        update: VehicleUpdate,
    ) -> Result<Vehicle, RegistryError>;
}
