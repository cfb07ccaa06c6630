use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Drone,
    Robot,
    // The fleet endpoint labels trucks "vehicle"; accept both on decode.
    #[serde(alias = "vehicle")]
    Truck,
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VehicleKind::Drone => "drone",
            VehicleKind::Robot => "robot",
            VehicleKind::Truck => "truck",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Idle,
    Active,
    Maintenance,
    Charging,
}

/// One unit of delivery capacity in the fleet. Field names on the wire match
/// the fleet management endpoint's JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VehicleKind,
    pub status: VehicleStatus,
    /// Percent charge, present only for battery-powered kinds (drone, robot).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<u8>,
    /// Free-text zone label, matched coarsely against customer locations.
    pub location: String,
    #[serde(
        rename = "currentDelivery",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_delivery: Option<String>,
    #[serde(rename = "deliveriesCompleted", default)]
    pub completed_deliveries: u32,
    #[serde(
        rename = "lastMaintenance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_maintenance: Option<String>,
    /// Maximum concurrent load; absent means the registry does not cap it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u8>,
    #[serde(rename = "currentLoad", default)]
    pub current_load: u8,
}

/// Partial update applied to a single vehicle in the registry. Only the
/// fields carrying `Some` are written. `expected_status` is a compare-and-set
/// guard: when present, the registry must reject the update unless the
/// vehicle's status still matches it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(
        rename = "currentDelivery",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_delivery: Option<String>,
    #[serde(
        rename = "clearCurrentDelivery",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub clear_current_delivery: bool,
    #[serde(rename = "currentLoad", default, skip_serializing_if = "Option::is_none")]
    pub current_load: Option<u8>,
    #[serde(
        rename = "deliveriesCompleted",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_deliveries: Option<u32>,
    #[serde(
        rename = "expectedStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_status: Option<VehicleStatus>,
}

impl VehicleUpdate {
    /// Reservation write: mark the vehicle active on behalf of an order.
    /// Guarded on the vehicle still being idle, so a concurrent reservation
    /// loses with a conflict instead of double-booking.
    pub fn reserve(order_id: &str, current_load: u8) -> Self {
        Self {
            status: Some(VehicleStatus::Active),
            current_delivery: Some(order_id.to_string()),
            current_load: Some(current_load.saturating_add(1)),
            expected_status: Some(VehicleStatus::Idle),
            ..Self::default()
        }
    }

    /// Restoration write: return the vehicle to the idle pool. The load
    /// decrement floors at zero. `credit_delivery` controls whether the
    /// completed-delivery counter is bumped.
    pub fn restore(vehicle: &Vehicle, credit_delivery: bool) -> Self {
        Self {
            status: Some(VehicleStatus::Idle),
            clear_current_delivery: true,
            current_load: Some(vehicle.current_load.saturating_sub(1)),
            completed_deliveries: credit_delivery
                .then(|| vehicle.completed_deliveries.saturating_add(1)),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(status) = self.status {
            vehicle.status = status;
        }
        if let Some(order_id) = &self.current_delivery {
            vehicle.current_delivery = Some(order_id.clone());
        }
        if self.clear_current_delivery {
            vehicle.current_delivery = None;
        }
        if let Some(load) = self.current_load {
            vehicle.current_load = load;
        }
        if let Some(count) = self.completed_deliveries {
            vehicle.completed_deliveries = count;
        }
    }
}
