use crate::engine::zone::zone_match;
use crate::models::assignment::ScoreBreakdown;
use crate::models::order::{OrderForAssignment, Priority};
use crate::models::vehicle::{Vehicle, VehicleKind};

const DRONE_BASE: f64 = 10.0;
const ROBOT_BASE: f64 = 8.0;
const TRUCK_BASE: f64 = 6.0;

const EXPERIENCE_CAP: f64 = 5.0;
const HEADROOM_WEIGHT: f64 = 5.0;
const DRONE_URGENCY_BONUS: f64 = 15.0;
const ROBOT_URGENCY_BONUS: f64 = 10.0;
const PROXIMITY_BONUS: f64 = 10.0;

/// Deterministic suitability score for one vehicle against one order: the
/// unweighted sum of the factor contributions, no normalization.
pub fn compute_score(vehicle: &Vehicle, order: &OrderForAssignment) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        base: base_score(vehicle.kind),
        battery: vehicle
            .battery
            .map_or(0.0, |level| f64::from(level) / 10.0),
        experience: (f64::from(vehicle.completed_deliveries) / 10.0).min(EXPERIENCE_CAP),
        headroom: headroom_score(vehicle),
        urgency: urgency_bonus(vehicle.kind, order.priority),
        proximity: if zone_match(&vehicle.location, &order.customer_location) {
            PROXIMITY_BONUS
        } else {
            0.0
        },
    };

    (breakdown.total(), breakdown)
}

/// Picks the highest-scoring candidate. On a tie the first-encountered
/// maximum wins, so the result follows the candidates' (registry) order.
pub fn select_best<'a>(
    candidates: &[&'a Vehicle],
    order: &OrderForAssignment,
) -> Option<(&'a Vehicle, f64, ScoreBreakdown)> {
    let mut best: Option<(&Vehicle, f64, ScoreBreakdown)> = None;

    for vehicle in candidates {
        let (score, breakdown) = compute_score(vehicle, order);
        let replaces = match &best {
            Some((_, best_score, _)) => score > *best_score,
            None => true,
        };
        if replaces {
            best = Some((vehicle, score, breakdown));
        }
    }

    best
}

fn base_score(kind: VehicleKind) -> f64 {
    match kind {
        VehicleKind::Drone => DRONE_BASE,
        VehicleKind::Robot => ROBOT_BASE,
        VehicleKind::Truck => TRUCK_BASE,
    }
}

fn headroom_score(vehicle: &Vehicle) -> f64 {
    match vehicle.capacity {
        Some(capacity) if capacity > 0 => {
            let utilization = f64::from(vehicle.current_load) / f64::from(capacity);
            (1.0 - utilization) * HEADROOM_WEIGHT
        }
        _ => 0.0,
    }
}

fn urgency_bonus(kind: VehicleKind, priority: Priority) -> f64 {
    if priority != Priority::Urgent {
        return 0.0;
    }

    match kind {
        VehicleKind::Drone => DRONE_URGENCY_BONUS,
        VehicleKind::Robot => ROBOT_URGENCY_BONUS,
        VehicleKind::Truck => 0.0,
    }
}
