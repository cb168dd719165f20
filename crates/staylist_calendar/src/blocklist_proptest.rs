#[cfg(test)]
mod tests {
    use crate::blocklist::{merge, parse, serialize, subtract, DateSet};
    use crate::status::{resolve, CellStatus};
    use proptest::collection::btree_set;
    use proptest::prelude::*;

    // Valid, zero-padded days in 2024
    fn day() -> impl Strategy<Value = String> {
        (1u32..=12, 1u32..=28).prop_map(|(month, day)| format!("2024-{:02}-{:02}", month, day))
    }

    fn day_set() -> impl Strategy<Value = DateSet> {
        btree_set(day(), 0..20)
    }

    proptest! {
        #[test]
        fn test_host_membership_decides_host_blocked(
            admin in day_set(),
            host in day_set(),
            date in day(),
        ) {
            let status = resolve(&admin, &host, &date);
            prop_assert_eq!(status == CellStatus::HostBlocked, host.contains(&date));
            if !host.contains(&date) {
                prop_assert_eq!(status == CellStatus::AdminBlocked, admin.contains(&date));
            }
        }

        #[test]
        fn test_parse_serialize_round_trip(set in day_set()) {
            prop_assert_eq!(parse(&serialize(&set)), set);
        }

        #[test]
        fn test_serialize_is_sorted(set in day_set()) {
            let raw = serialize(&set);
            let parts: Vec<&str> = raw.split(',').filter(|part| !part.is_empty()).collect();
            let mut sorted = parts.clone();
            sorted.sort();
            prop_assert_eq!(parts, sorted);
        }

        #[test]
        fn test_subtract_after_merge_removes_added_days(
            existing in day_set(),
            added in proptest::collection::vec(day(), 0..10),
        ) {
            let merged = merge(&existing, &added);
            for date in &added {
                prop_assert!(merged.contains(date));
            }
            let removed = subtract(&merged, &added);
            for date in &added {
                prop_assert!(!removed.contains(date));
            }
            prop_assert!(removed.is_subset(&existing));
        }
    }
}
