use std::sync::RwLock;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::models::vehicle::{Vehicle, VehicleUpdate};
use crate::registry::{FleetRegistry, RegistryError};

/// In-process registry for direct deployments and tests. DashMap gives each
/// vehicle its own exclusive write path, which is the per-vehicle atomicity
/// the reservation guard relies on; a registration-order index keeps
/// `list_vehicles` deterministic (DashMap iteration order is not).
#[derive(Default)]
pub struct InMemoryFleetRegistry {
    vehicles: DashMap<String, Vehicle>,
    order: RwLock<Vec<String>>,
}

impl InMemoryFleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fleet(fleet: impl IntoIterator<Item = Vehicle>) -> Self {
        let registry = Self::new();
        for vehicle in fleet {
            registry.insert(vehicle);
        }
        registry
    }

    /// Provisioning hook: adds a vehicle, or replaces it in place when the id
    /// is already registered.
    pub fn insert(&self, vehicle: Vehicle) {
        let mut order = self.order.write().expect("fleet order index poisoned");
        if self.vehicles.insert(vehicle.id.clone(), vehicle.clone()).is_none() {
            order.push(vehicle.id);
        }
    }
}

#[async_trait]
impl FleetRegistry for InMemoryFleetRegistry {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, RegistryError> {
        let order = self.order.read().expect("fleet order index poisoned");
        Ok(order
            .iter()
            .filter_map(|id| self.vehicles.get(id).map(|entry| entry.value().clone()))
            .collect())
    }

    async fn update_vehicle(
        &self,
        id: &str,
        update: VehicleUpdate,
    ) -> Result<Vehicle, RegistryError> {
        let mut entry = self
            .vehicles
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        if let Some(expected) = update.expected_status {
            if entry.status != expected {
                return Err(RegistryError::Conflict {
                    id: id.to_string(),
                    detail: format!("status is {:?}, expected {:?}", entry.status, expected),
                });
            }
        }

        update.apply_to(entry.value_mut());
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{VehicleKind, VehicleStatus};

    fn vehicle(id: &str, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            name: format!("unit {id}"),
            kind: VehicleKind::Robot,
            status,
            battery: Some(80),
            location: "Downtown District".to_string(),
            current_delivery: None,
            completed_deliveries: 0,
            last_maintenance: None,
            capacity: Some(2),
            current_load: 0,
        }
    }

    #[tokio::test]
    async fn listing_preserves_registration_order() {
        let registry = InMemoryFleetRegistry::with_fleet([
            vehicle("R003", VehicleStatus::Idle),
            vehicle("R001", VehicleStatus::Idle),
            vehicle("R002", VehicleStatus::Idle),
        ]);

        let ids: Vec<String> = registry
            .list_vehicles()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, ["R003", "R001", "R002"]);
    }

    #[tokio::test]
    async fn insert_replaces_without_reordering() {
        let registry = InMemoryFleetRegistry::with_fleet([
            vehicle("R001", VehicleStatus::Idle),
            vehicle("R002", VehicleStatus::Idle),
        ]);

        registry.insert(vehicle("R001", VehicleStatus::Charging));

        let fleet = registry.list_vehicles().await.unwrap();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0].id, "R001");
        assert_eq!(fleet[0].status, VehicleStatus::Charging);
    }

    #[tokio::test]
    async fn update_unknown_vehicle_is_not_found() {
        let registry = InMemoryFleetRegistry::new();
        let err = registry
            .update_vehicle("R999", VehicleUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(id) if id == "R999"));
    }

    #[tokio::test]
    async fn guarded_update_rejects_stale_expectation() {
        let registry =
            InMemoryFleetRegistry::with_fleet([vehicle("R001", VehicleStatus::Active)]);

        let err = registry
            .update_vehicle("R001", VehicleUpdate::reserve("ORD-1", 0))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Conflict { .. }));

        // The failed guard must not have touched the vehicle.
        let fleet = registry.list_vehicles().await.unwrap();
        assert!(fleet[0].current_delivery.is_none());
        assert_eq!(fleet[0].current_load, 0);
    }
}
