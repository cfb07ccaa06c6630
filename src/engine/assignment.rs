use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::cache::{FleetCache, FleetStatus};
use crate::engine::eligibility::eligible_vehicles;
use crate::engine::scoring::select_best;
use crate::models::assignment::AssignmentOutcome;
use crate::models::order::OrderForAssignment;
use crate::models::vehicle::{Vehicle, VehicleUpdate};
use crate::observability::metrics::Metrics;
use crate::registry::{FleetRegistry, RegistryError};

const MSG_NO_VEHICLES: &str = "no vehicles available";
const MSG_NO_SUITABLE_VEHICLE: &str = "no suitable vehicle found for this order";
const MSG_UPDATE_FAILED: &str = "failed to update fleet management system";
const MSG_VEHICLE_NOT_FOUND: &str = "vehicle not found";

/// Picks, reserves, and releases delivery vehicles against a fleet registry.
/// Invoked synchronously per order-status transition; holds no locks across
/// the decision and never retries on its own. A lost reservation race comes
/// back as a failure outcome the caller may retry.
pub struct AssignmentEngine {
    registry: Arc<dyn FleetRegistry>,
    cache: FleetCache,
    metrics: Metrics,
}

impl AssignmentEngine {
    pub fn new(registry: Arc<dyn FleetRegistry>, cache: FleetCache, metrics: Metrics) -> Self {
        Self {
            registry,
            cache,
            metrics,
        }
    }

    pub async fn assign_vehicle_to_order(&self, order: &OrderForAssignment) -> AssignmentOutcome {
        let start = Instant::now();
        let outcome = self.assign_inner(order).await;

        let label = if outcome.success { "success" } else { "failure" };
        self.metrics
            .assignment_latency_seconds
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());
        self.metrics
            .assignments_total
            .with_label_values(&[label])
            .inc();

        outcome
    }

    async fn assign_inner(&self, order: &OrderForAssignment) -> AssignmentOutcome {
        let fleet = self.refresh_fleet().await;

        let candidates = eligible_vehicles(&fleet);
        if candidates.is_empty() {
            warn!(
                order_id = %order.order_id,
                fleet_size = fleet.len(),
                "no eligible vehicles for order"
            );
            return AssignmentOutcome::failed(MSG_NO_VEHICLES);
        }

        let Some((winner, score, breakdown)) = select_best(&candidates, order) else {
            return AssignmentOutcome::failed(MSG_NO_SUITABLE_VEHICLE);
        };

        let update = VehicleUpdate::reserve(&order.order_id, winner.current_load);
        match self.registry.update_vehicle(&winner.id, update).await {
            Ok(reserved) => {
                self.observe_utilization(&reserved);
                info!(
                    order_id = %order.order_id,
                    vehicle_id = %reserved.id,
                    vehicle = %reserved.name,
                    score,
                    ?breakdown,
                    "vehicle reserved"
                );
                let outcome = AssignmentOutcome::assigned(&reserved);
                self.cache.apply(reserved);
                outcome
            }
            Err(RegistryError::NotFound(id)) => {
                error!(order_id = %order.order_id, vehicle_id = %id, "reservation hit unknown vehicle");
                AssignmentOutcome::failed(MSG_VEHICLE_NOT_FOUND)
            }
            Err(err) => {
                error!(
                    order_id = %order.order_id,
                    vehicle_id = %winner.id,
                    error = %err,
                    "reservation rejected"
                );
                AssignmentOutcome::failed(MSG_UPDATE_FAILED)
            }
        }
    }

    /// Returns a delivered vehicle to the idle pool and credits its
    /// completed-delivery counter.
    pub async fn release_vehicle(&self, vehicle_id: &str) -> bool {
        self.restore(vehicle_id, true).await
    }

    /// Returns a vehicle to the idle pool without crediting a delivery, for
    /// orders reverted to pending before they shipped.
    pub async fn free_vehicle(&self, vehicle_id: &str) -> bool {
        self.restore(vehicle_id, false).await
    }

    async fn restore(&self, vehicle_id: &str, credit_delivery: bool) -> bool {
        let Some(vehicle) = self.lookup(vehicle_id).await else {
            warn!(vehicle_id, "release requested for unknown vehicle");
            return false;
        };

        let update = VehicleUpdate::restore(&vehicle, credit_delivery);
        match self.registry.update_vehicle(vehicle_id, update).await {
            Ok(restored) => {
                self.observe_utilization(&restored);
                info!(
                    vehicle_id,
                    credited = credit_delivery,
                    completed_deliveries = restored.completed_deliveries,
                    "vehicle released"
                );
                self.cache.apply(restored);
                true
            }
            Err(err) => {
                error!(vehicle_id, error = %err, "release update failed");
                false
            }
        }
    }

    /// Aggregate counts over the cached snapshot, for dashboard display.
    pub fn fleet_status(&self) -> FleetStatus {
        self.cache.status_counts()
    }

    /// Re-fetches the fleet before a decision. A failed fetch degrades to the
    /// cached snapshot rather than failing the operation.
    async fn refresh_fleet(&self) -> Vec<Vehicle> {
        match self.registry.list_vehicles().await {
            Ok(fleet) => {
                self.cache.replace(fleet.clone());
                fleet
            }
            Err(err) => {
                self.metrics.fleet_refresh_failures_total.inc();
                warn!(error = %err, "fleet refresh failed, falling back to cached snapshot");
                self.cache.snapshot()
            }
        }
    }

    async fn lookup(&self, vehicle_id: &str) -> Option<Vehicle> {
        if let Some(vehicle) = self.cache.get(vehicle_id) {
            return Some(vehicle);
        }

        match self.registry.list_vehicles().await {
            Ok(fleet) => {
                self.cache.replace(fleet);
                self.cache.get(vehicle_id)
            }
            Err(err) => {
                warn!(vehicle_id, error = %err, "fleet lookup failed");
                None
            }
        }
    }

    fn observe_utilization(&self, vehicle: &Vehicle) {
        if let Some(capacity) = vehicle.capacity {
            if capacity > 0 {
                let utilization = f64::from(vehicle.current_load) / f64::from(capacity);
                self.metrics
                    .vehicle_utilization
                    .with_label_values(&[&vehicle.id])
                    .set(utilization);
            }
        }
    }
}
