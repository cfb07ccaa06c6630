/// Coarse zone keywords shared by vehicle locations and customer addresses.
/// Deliberately not geocoding: two labels "match" when both mention the same
/// keyword, case-insensitively.
const ZONE_KEYWORDS: [&str; 5] = ["downtown", "residential", "zone", "district", "highway"];

pub fn zone_match(vehicle_location: &str, customer_location: &str) -> bool {
    let vehicle = vehicle_location.to_lowercase();
    let customer = customer_location.to_lowercase();

    ZONE_KEYWORDS
        .iter()
        .any(|keyword| vehicle.contains(keyword) && customer.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::zone_match;

    #[test]
    fn shared_keyword_matches_case_insensitively() {
        assert!(zone_match("Downtown District", "12 Main St, downtown"));
        assert!(zone_match("Zone A - Residential", "Residential block 4"));
    }

    #[test]
    fn different_keywords_do_not_match() {
        assert!(!zone_match("Highway Route 1", "Downtown core"));
    }

    #[test]
    fn keyword_on_one_side_only_does_not_match() {
        assert!(!zone_match("Parking Lot B", "Downtown core"));
        assert!(!zone_match("Downtown District", "Main St 17"));
    }
}
