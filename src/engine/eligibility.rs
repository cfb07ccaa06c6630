use crate::models::vehicle::{Vehicle, VehicleStatus};

/// Battery-bearing vehicles below this charge are held back for charging.
pub const MIN_BATTERY_PERCENT: u8 = 30;

pub fn is_eligible(vehicle: &Vehicle) -> bool {
    if vehicle.status != VehicleStatus::Idle {
        return false;
    }

    if let Some(capacity) = vehicle.capacity {
        if vehicle.current_load >= capacity {
            return false;
        }
    }

    match vehicle.battery {
        Some(level) => level >= MIN_BATTERY_PERCENT,
        None => true,
    }
}

/// Filters to assignable vehicles, preserving the registry's fleet order so
/// score ties stay reproducible.
pub fn eligible_vehicles(fleet: &[Vehicle]) -> Vec<&Vehicle> {
    fleet.iter().filter(|vehicle| is_eligible(vehicle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleKind;

    fn vehicle(status: VehicleStatus, battery: Option<u8>, load: u8, capacity: u8) -> Vehicle {
        Vehicle {
            id: "X001".to_string(),
            name: "test unit".to_string(),
            kind: VehicleKind::Robot,
            status,
            battery,
            location: "Zone B".to_string(),
            current_delivery: None,
            completed_deliveries: 0,
            last_maintenance: None,
            capacity: Some(capacity),
            current_load: load,
        }
    }

    #[test]
    fn only_idle_vehicles_are_eligible() {
        assert!(is_eligible(&vehicle(VehicleStatus::Idle, Some(80), 0, 2)));
        assert!(!is_eligible(&vehicle(VehicleStatus::Active, Some(80), 0, 2)));
        assert!(!is_eligible(&vehicle(VehicleStatus::Maintenance, Some(80), 0, 2)));
        assert!(!is_eligible(&vehicle(VehicleStatus::Charging, Some(80), 0, 2)));
    }

    #[test]
    fn at_capacity_vehicle_is_excluded() {
        assert!(!is_eligible(&vehicle(VehicleStatus::Idle, Some(80), 2, 2)));
        assert!(is_eligible(&vehicle(VehicleStatus::Idle, Some(80), 1, 2)));
    }

    #[test]
    fn uncapped_vehicle_ignores_load() {
        let mut v = vehicle(VehicleStatus::Idle, None, 7, 1);
        v.capacity = None;
        assert!(is_eligible(&v));
    }

    #[test]
    fn battery_threshold_is_inclusive() {
        assert!(!is_eligible(&vehicle(VehicleStatus::Idle, Some(29), 0, 2)));
        assert!(is_eligible(&vehicle(VehicleStatus::Idle, Some(30), 0, 2)));
    }

    #[test]
    fn batteryless_truck_is_eligible() {
        assert!(is_eligible(&vehicle(VehicleStatus::Idle, None, 0, 10)));
    }

    #[test]
    fn filter_preserves_fleet_order() {
        let fleet = vec![
            vehicle(VehicleStatus::Idle, Some(90), 0, 2),
            vehicle(VehicleStatus::Maintenance, Some(90), 0, 2),
            vehicle(VehicleStatus::Idle, Some(50), 0, 2),
        ];

        let eligible = eligible_vehicles(&fleet);
        assert_eq!(eligible.len(), 2);
        assert_eq!(eligible[0].battery, Some(90));
        assert_eq!(eligible[1].battery, Some(50));
    }
}
