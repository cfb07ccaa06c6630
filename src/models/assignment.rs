use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::vehicle::{Vehicle, VehicleKind};

/// Per-factor contributions to a vehicle's score, so a pick can be explained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub battery: f64,
    pub experience: f64,
    pub headroom: f64,
    pub urgency: f64,
    pub proximity: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.base + self.battery + self.experience + self.headroom + self.urgency + self.proximity
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedVehicle {
    pub id: String,
    pub name: String,
    pub kind: VehicleKind,
}

/// Result of an assignment attempt. Failures are values, never errors; the
/// order-status transition must complete regardless of what happened here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_vehicle: Option<AssignedVehicle>,
    pub message: String,
}

impl AssignmentOutcome {
    pub fn assigned(vehicle: &Vehicle) -> Self {
        Self {
            success: true,
            assigned_vehicle: Some(AssignedVehicle {
                id: vehicle.id.clone(),
                name: vehicle.name.clone(),
                kind: vehicle.kind,
            }),
            message: format!("Order assigned to {} ({})", vehicle.name, vehicle.kind),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            assigned_vehicle: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Assigned,
    Released,
}

/// The order-vehicle linkage the caller persists in the order store. The
/// engine produces the data; it owns no storage for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub order_id: String,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub vehicle_kind: VehicleKind,
    pub assigned_at: DateTime<Utc>,
    pub status: AssignmentStatus,
}

impl AssignmentRecord {
    pub fn assigned(order_id: &str, vehicle: &AssignedVehicle) -> Self {
        Self {
            order_id: order_id.to_string(),
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.name.clone(),
            vehicle_kind: vehicle.kind,
            assigned_at: Utc::now(),
            status: AssignmentStatus::Assigned,
        }
    }

    pub fn released(mut self) -> Self {
        self.status = AssignmentStatus::Released;
        self
    }
}
