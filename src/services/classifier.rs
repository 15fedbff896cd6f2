use crate::models::Classification;

/// Derives the routing tag and priority flag for a booking.
///
/// Matching is a case-insensitive substring check on the raw text rather than
/// an exact enum comparison, so loosely typed input still lands in a bucket:
/// anything whose device text lacks "laptop" is treated as a phone, anything
/// whose service text lacks "deep" as a basic service. Any pickup request is
/// priority, as is every deep laptop service.
pub fn classify(
    service_requested: &str,
    device_type: &str,
    pickup_or_dropoff: &str,
) -> (Classification, bool) {
    let service = service_requested.to_lowercase();
    let device = device_type.to_lowercase();
    let deep = service.contains("deep");

    let tag = match (device.contains("laptop"), deep) {
        (true, true) => Classification::LaptopDeep,
        (true, false) => Classification::LaptopBasic,
        (false, true) => Classification::PhoneDeep,
        (false, false) => Classification::PhoneBasic,
    };

    let priority =
        tag == Classification::LaptopDeep || pickup_or_dropoff.to_lowercase() == "pickup";

    (tag, priority)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laptop_deep_pickup() {
        assert_eq!(
            classify("Laptop Deep", "Laptop", "Pickup"),
            (Classification::LaptopDeep, true)
        );
    }

    #[test]
    fn test_phone_basic_dropoff() {
        assert_eq!(
            classify("Phone Basic", "Phone", "Drop-off"),
            (Classification::PhoneBasic, false)
        );
    }

    #[test]
    fn test_pickup_overrides_tag() {
        assert_eq!(
            classify("Laptop Basic", "Laptop", "Pickup"),
            (Classification::LaptopBasic, true)
        );
        assert_eq!(
            classify("Phone Deep", "Phone", "PICKUP"),
            (Classification::PhoneDeep, true)
        );
    }

    #[test]
    fn test_laptop_deep_is_priority_without_pickup() {
        assert_eq!(
            classify("Laptop Deep", "Laptop", "Drop-off"),
            (Classification::LaptopDeep, true)
        );
    }

    #[test]
    fn test_case_insensitive_substrings() {
        assert_eq!(
            classify("a DEEP clean please", "my LAPTOP", "drop-off").0,
            Classification::LaptopDeep
        );
        assert_eq!(classify("deep", "tablet", "").0, Classification::PhoneDeep);
    }

    #[test]
    fn test_mismatched_device_and_service() {
        // Device decides the family, service text only decides the depth.
        assert_eq!(
            classify("Laptop Deep", "Phone", "Drop-off"),
            (Classification::PhoneDeep, false)
        );
        assert_eq!(
            classify("Phone Basic", "Laptop", "Drop-off"),
            (Classification::LaptopBasic, false)
        );
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(classify("", "", ""), (Classification::PhoneBasic, false));
    }

    #[test]
    fn test_pickup_must_match_exactly() {
        assert!(!classify("Phone Basic", "Phone", "Pickup later").1);
        assert!(!classify("Phone Basic", "Phone", " pickup").1);
    }

    #[test]
    fn test_exhaustive_priority_rule() {
        let services = ["Laptop Basic", "Laptop Deep", "Phone Basic", "Phone Deep", ""];
        let devices = ["Laptop", "Phone", "laptop", ""];
        let logistics = ["Drop-off", "Pickup", "pickup", ""];

        for s in services {
            for d in devices {
                for l in logistics {
                    let (tag, priority) = classify(s, d, l);
                    assert!(Classification::ALL.contains(&tag));
                    let expected = tag == Classification::LaptopDeep || l.eq_ignore_ascii_case("pickup");
                    assert_eq!(priority, expected, "{s:?} {d:?} {l:?}");
                    assert_eq!(classify(s, d, l), (tag, priority));
                }
            }
        }
    }
}
