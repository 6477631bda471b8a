// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for RRset grouping and change planning.

#[cfg(test)]
mod tests {
    use crate::gateway::{RemoteRecord, RemoteRrset, Zone};
    use crate::reconcile::*;
    use crate::records::Rr;
    use std::time::Duration;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn rr(name: &str, rtype: &str, data: &str, ttl: u64) -> Rr {
        Rr::new(name, rtype, data, Duration::from_secs(ttl))
    }

    fn key(name: &str, rtype: &str) -> RrsetKey {
        RrsetKey {
            name: name.to_string(),
            rtype: rtype.to_string(),
        }
    }

    fn rrset(name: &str, rtype: &str, ttl: u32, contents: &[&str]) -> RemoteRrset {
        RemoteRrset {
            name: name.to_string(),
            rtype: Some(rtype.to_string()),
            ttl,
            records: contents
                .iter()
                .map(|c| RemoteRecord {
                    content: (*c).to_string(),
                    disabled: false,
                })
                .collect(),
        }
    }

    fn example_zone() -> Zone {
        Zone {
            id: "example.org.".to_string(),
            name: "example.org.".to_string(),
            rrsets: vec![
                rrset(
                    "1.example.org.",
                    "A",
                    60,
                    &["127.0.0.1", "127.0.0.2", "127.0.0.3"],
                ),
                rrset("1.example.org.", "TXT", 60, &["\"This is text\""]),
                rrset(
                    "2.example.org.",
                    "A",
                    60,
                    &["127.0.0.4", "127.0.0.5", "127.0.0.6"],
                ),
                rrset("example.org.", "MX", 3600, &["10 mail.example.org."]),
            ],
        }
    }

    // =====================================================
    // Grouping
    // =====================================================

    #[test]
    fn test_group_records_by_name_and_type() {
        let groups = group_records(vec![
            rr("2.example.org.", "A", "127.0.0.8", 60),
            rr("3.example.org.", "A", "127.0.0.9", 60),
            rr("2.example.org.", "A", "127.0.0.10", 60),
            rr("2.example.org.", "AAAA", "::1", 60),
        ]);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key, key("2.example.org.", "A"));
        assert_eq!(groups[0].contents(), strings(&["127.0.0.8", "127.0.0.10"]));
        assert_eq!(groups[1].key, key("3.example.org.", "A"));
        assert_eq!(groups[2].key, key("2.example.org.", "AAAA"));
    }

    #[test]
    fn test_group_ttl_is_first_member_ttl() {
        let groups = group_records(vec![
            rr("2.example.org.", "A", "127.0.0.8", 120),
            rr("2.example.org.", "A", "127.0.0.9", 30),
        ]);

        assert_eq!(groups[0].ttl(), 120);
    }

    #[test]
    fn test_group_keys_do_not_collide_on_colons() {
        let groups = group_records(vec![
            rr("a:b", "c", "x", 60),
            rr("a", "b:c", "y", 60),
        ]);

        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_group_names_differing_only_in_case_share_a_key() {
        let groups = group_records(vec![
            rr("WWW.example.org.", "a", "192.0.2.1", 60),
            rr("www.example.org.", "A", "192.0.2.2", 60),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, key("www.example.org.", "A"));
        assert_eq!(groups[0].contents(), strings(&["192.0.2.1", "192.0.2.2"]));
    }

    #[test]
    fn test_group_records_empty() {
        assert!(group_records(Vec::new()).is_empty());
    }

    #[test]
    fn test_ttl_secs_saturates() {
        assert_eq!(ttl_secs(Duration::from_secs(300)), 300);
        assert_eq!(ttl_secs(Duration::from_millis(1500)), 1);
        assert_eq!(ttl_secs(Duration::from_secs(u64::MAX)), u32::MAX);
    }

    // =====================================================
    // Content merge and removal
    // =====================================================

    #[test]
    fn test_merge_contents_dedupes_with_trailing_dot_insensitivity() {
        let merged = merge_contents(
            &strings(&["10 mail.example.org."]),
            &strings(&["10 mail.example.org", "20 backup.example.org."]),
        );

        assert_eq!(merged, strings(&["10 mail.example.org.", "20 backup.example.org."]));
    }

    #[test]
    fn test_merge_contents_dedupes_within_new_values() {
        let merged = merge_contents(&[], &strings(&["127.0.0.7", "127.0.0.7"]));
        assert_eq!(merged, strings(&["127.0.0.7"]));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let existing = strings(&["127.0.0.4"]);
        let new = strings(&["127.0.0.7"]);

        let once = merge_contents(&existing, &new);
        let twice = merge_contents(&once, &new);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_contents() {
        let remaining = remove_contents(
            &strings(&["127.0.0.4", "127.0.0.5", "127.0.0.6"]),
            &strings(&["127.0.0.5", "127.0.0.99"]),
        );

        assert_eq!(remaining, strings(&["127.0.0.4", "127.0.0.6"]));
    }

    #[test]
    fn test_remove_contents_matches_canonical_form() {
        let remaining = remove_contents(
            &strings(&["ns1.example.org.", "ns2.example.org."]),
            &strings(&["ns1.example.org"]),
        );

        assert_eq!(remaining, strings(&["ns2.example.org."]));
    }

    // =====================================================
    // Append
    // =====================================================

    #[test]
    fn test_plan_append_creates_new_rrset() {
        let groups = group_records(vec![rr("2.example.org.", "AAAA", "::1", 60)]);
        let plan = plan_append(&example_zone(), &groups);

        assert_eq!(
            plan,
            vec![RrsetChange::Replace {
                key: key("2.example.org.", "AAAA"),
                ttl: 60,
                contents: strings(&["::1"]),
            }]
        );
    }

    #[test]
    fn test_plan_append_merges_with_existing() {
        let groups = group_records(vec![rr("2.example.org.", "A", "127.0.0.7", 300)]);
        let plan = plan_append(&example_zone(), &groups);

        assert_eq!(
            plan,
            vec![RrsetChange::Replace {
                key: key("2.example.org.", "A"),
                ttl: 300,
                contents: strings(&["127.0.0.4", "127.0.0.5", "127.0.0.6", "127.0.0.7"]),
            }]
        );
    }

    #[test]
    fn test_plan_append_duplicate_keeps_single_entry() {
        let groups = group_records(vec![rr("2.example.org.", "A", "127.0.0.5", 60)]);
        let plan = plan_append(&example_zone(), &groups);

        match &plan[0] {
            RrsetChange::Replace { contents, .. } => {
                assert_eq!(contents, &strings(&["127.0.0.4", "127.0.0.5", "127.0.0.6"]));
            }
            other => panic!("unexpected change: {other:?}"),
        }
    }

    #[test]
    fn test_plan_append_one_write_per_rrset() {
        let groups = group_records(vec![
            rr("2.example.org.", "A", "127.0.0.8", 60),
            rr("3.example.org.", "A", "127.0.0.9", 60),
            rr("2.example.org.", "A", "127.0.0.10", 60),
        ]);
        let plan = plan_append(&example_zone(), &groups);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].key(), &key("2.example.org.", "A"));
        assert_eq!(plan[1].key(), &key("3.example.org.", "A"));
    }

    #[test]
    fn test_plan_append_mixed_case_names_merge_into_one_write() {
        let mut zone = example_zone();
        zone.rrsets
            .push(rrset("www.example.org.", "A", 60, &["192.0.2.9"]));
        let groups = group_records(vec![
            rr("WWW.example.org.", "A", "192.0.2.1", 60),
            rr("www.example.org.", "A", "192.0.2.2", 60),
        ]);
        let plan = plan_append(&zone, &groups);

        assert_eq!(
            plan,
            vec![RrsetChange::Replace {
                key: key("www.example.org.", "A"),
                ttl: 60,
                contents: strings(&["192.0.2.9", "192.0.2.1", "192.0.2.2"]),
            }]
        );
    }

    // =====================================================
    // Set
    // =====================================================

    #[test]
    fn test_plan_set_replaces_exactly() {
        let groups = group_records(vec![
            rr("2.example.org.", "A", "127.0.0.1", 30),
            rr("1.example.org.", "A", "127.0.0.1", 30),
        ]);
        let plan = plan_set(&groups);

        assert_eq!(
            plan,
            vec![
                RrsetChange::Replace {
                    key: key("2.example.org.", "A"),
                    ttl: 30,
                    contents: strings(&["127.0.0.1"]),
                },
                RrsetChange::Replace {
                    key: key("1.example.org.", "A"),
                    ttl: 30,
                    contents: strings(&["127.0.0.1"]),
                },
            ]
        );
    }

    // =====================================================
    // Delete
    // =====================================================

    #[test]
    fn test_plan_delete_keeps_existing_ttl() {
        let groups = group_records(vec![rr("2.example.org.", "A", "127.0.0.5", 9999)]);
        let plan = plan_delete(&example_zone(), &groups);

        assert_eq!(
            plan,
            vec![RrsetChange::Replace {
                key: key("2.example.org.", "A"),
                ttl: 60,
                contents: strings(&["127.0.0.4", "127.0.0.6"]),
            }]
        );
    }

    #[test]
    fn test_plan_delete_last_value_deletes_rrset() {
        let groups = group_records(vec![rr("example.org.", "MX", "10 mail.example.org", 0)]);
        let plan = plan_delete(&example_zone(), &groups);

        assert_eq!(
            plan,
            vec![RrsetChange::Delete {
                key: key("example.org.", "MX"),
            }]
        );
    }

    #[test]
    fn test_plan_delete_missing_rrset_is_noop() {
        let groups = group_records(vec![rr("9.example.org.", "A", "127.0.0.1", 60)]);
        assert!(plan_delete(&example_zone(), &groups).is_empty());
    }

    #[test]
    fn test_plan_delete_of_absent_value_rewrites_unchanged_set() {
        let groups = group_records(vec![rr("1.example.org.", "A", "10.0.0.1", 60)]);
        let plan = plan_delete(&example_zone(), &groups);

        assert_eq!(
            plan,
            vec![RrsetChange::Replace {
                key: key("1.example.org.", "A"),
                ttl: 60,
                contents: strings(&["127.0.0.1", "127.0.0.2", "127.0.0.3"]),
            }]
        );
    }
}
