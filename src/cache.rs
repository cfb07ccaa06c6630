use std::sync::RwLock;

use serde::Serialize;

use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Aggregate fleet counts for dashboard display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetStatus {
    pub total: usize,
    pub active: usize,
    pub idle: usize,
    pub maintenance: usize,
    pub charging: usize,
}

/// Last successfully fetched fleet snapshot, kept in registry order. Owned by
/// whoever constructs the engine and injected into it, so there is no hidden
/// global fleet state and tests can seed it directly. The engine falls back
/// to this snapshot when a registry fetch fails.
#[derive(Default)]
pub struct FleetCache {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl FleetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(fleet: Vec<Vehicle>) -> Self {
        Self {
            vehicles: RwLock::new(fleet),
        }
    }

    pub fn replace(&self, fleet: Vec<Vehicle>) {
        *self.vehicles.write().expect("fleet cache poisoned") = fleet;
    }

    pub fn snapshot(&self) -> Vec<Vehicle> {
        self.vehicles.read().expect("fleet cache poisoned").clone()
    }

    pub fn get(&self, id: &str) -> Option<Vehicle> {
        self.vehicles
            .read()
            .expect("fleet cache poisoned")
            .iter()
            .find(|vehicle| vehicle.id == id)
            .cloned()
    }

    /// Syncs a single vehicle after a successful registry write. A vehicle
    /// not yet in the snapshot (stale cache) is appended.
    pub fn apply(&self, vehicle: Vehicle) {
        let mut vehicles = self.vehicles.write().expect("fleet cache poisoned");
        match vehicles.iter_mut().find(|cached| cached.id == vehicle.id) {
            Some(cached) => *cached = vehicle,
            None => vehicles.push(vehicle),
        }
    }

    pub fn status_counts(&self) -> FleetStatus {
        let vehicles = self.vehicles.read().expect("fleet cache poisoned");
        let mut counts = FleetStatus {
            total: vehicles.len(),
            ..FleetStatus::default()
        };
        for vehicle in vehicles.iter() {
            match vehicle.status {
                VehicleStatus::Active => counts.active += 1,
                VehicleStatus::Idle => counts.idle += 1,
                VehicleStatus::Maintenance => counts.maintenance += 1,
                VehicleStatus::Charging => counts.charging += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleKind;

    fn vehicle(id: &str, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            name: id.to_string(),
            kind: VehicleKind::Drone,
            status,
            battery: Some(90),
            location: "Hub Station".to_string(),
            current_delivery: None,
            completed_deliveries: 0,
            last_maintenance: None,
            capacity: Some(1),
            current_load: 0,
        }
    }

    #[test]
    fn apply_updates_in_place_and_appends_unknown() {
        let cache = FleetCache::seeded(vec![vehicle("D001", VehicleStatus::Idle)]);

        cache.apply(vehicle("D001", VehicleStatus::Active));
        cache.apply(vehicle("D002", VehicleStatus::Idle));

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].status, VehicleStatus::Active);
        assert_eq!(snapshot[1].id, "D002");
    }

    #[test]
    fn status_counts_cover_every_state() {
        let cache = FleetCache::seeded(vec![
            vehicle("D001", VehicleStatus::Idle),
            vehicle("D002", VehicleStatus::Active),
            vehicle("D003", VehicleStatus::Active),
            vehicle("D004", VehicleStatus::Maintenance),
            vehicle("D005", VehicleStatus::Charging),
        ]);

        assert_eq!(
            cache.status_counts(),
            FleetStatus {
                total: 5,
                active: 2,
                idle: 1,
                maintenance: 1,
                charging: 1,
            }
        );
    }
}
