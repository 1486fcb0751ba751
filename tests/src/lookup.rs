#![cfg(test)]
use tagscope_common::network::range::RangeMetadata;
use tagscope_core::matcher::{RangeEntry, RangeTable};

/// Builds from mixed valid and invalid entries, then queries both families.
#[test]
fn mixed_table_scenario() {
    let report = RangeTable::build(["10.0.0.0/8", "bad-cidr", "2001:db8::/32"]);

    assert_eq!(report.skipped.len(), 1, "expected one warning for 'bad-cidr'");
    assert_eq!(report.table.len(), 2);

    assert!(report.table.query("10.5.5.5").matched());
    assert!(report.table.query("2001:db8::1").matched());
    assert!(!report.table.query("172.16.0.1").matched());
}

#[test]
fn overlapping_ranges_in_load_order() {
    let report = RangeTable::build([
        RangeEntry::new("10.0.0.0/8", Some(RangeMetadata::new("", "Corp"))),
        RangeEntry::new("10.1.0.0/16", Some(RangeMetadata::new("eastus", "Lab"))),
    ]);

    let result = report.table.query("10.1.2.3");
    assert!(result.matched());

    let cidrs: Vec<String> = result.matches().iter().map(|r| r.to_string()).collect();
    assert_eq!(cidrs, vec!["10.0.0.0/8", "10.1.0.0/16"]);

    let owners: Vec<&str> = result.services().map(|m| m.service_name.as_str()).collect();
    assert_eq!(owners, vec!["Corp", "Lab"]);

    let result = report.table.query("10.2.0.1");
    assert_eq!(result.matches().len(), 1);
}

#[test]
fn ipv6_query_against_ipv4_table() {
    let table = RangeTable::build(["0.0.0.0/0", "192.168.1.0/24"]).table;

    for query in ["::", "::1", "2001:db8::1", "::ffff:192.168.1.1"] {
        let result = table.query(query);
        assert!(!result.matched(), "{query} should not match");
    }
}

#[test]
fn boundary_of_slash_24() {
    let table = RangeTable::build(["192.168.1.0/24"]).table;
    assert!(table.query("192.168.1.255").matched());
    assert!(!table.query("192.168.2.0").matched());
}

#[test]
fn malformed_query_never_errors() {
    let table = RangeTable::build(["0.0.0.0/0", "::/0"]).table;
    for query in ["not-an-ip", "", "   ", "10.0.0", "1.2.3.4.5", "::g"] {
        let result = table.query(query);
        assert!(!result.matched());
        assert!(result.matches().is_empty());
    }
}

#[test]
fn shared_table_across_threads() {
    let table = RangeTable::build(["10.0.0.0/8", "2001:db8::/32"]).table;
    let table = std::sync::Arc::new(table);

    let handles: Vec<_> = ["10.0.0.1", "2001:db8::2", "8.8.8.8"]
        .into_iter()
        .map(|query| {
            let table = std::sync::Arc::clone(&table);
            std::thread::spawn(move || table.query(query).matched())
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, true, false]);
}
