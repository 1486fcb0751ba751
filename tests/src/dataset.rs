#![cfg(test)]
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use tagscope_common::network::cidr::CidrError;
use tagscope_common::network::range::AddressFamily;
use tagscope_core::dataset::{Dataset, DatasetError};
use tagscope_core::matcher::BuildReport;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn load_fixture() -> BuildReport {
    Dataset::from_path(&fixture("service_tags.json"))
        .expect("fixture should load")
        .into_table()
}

#[test]
fn fixture_builds_with_skipped_prefixes() {
    let report = load_fixture();

    assert_eq!(report.table.len(), 7);
    assert_eq!(report.table.count_by_family(AddressFamily::Ipv4), 5);
    assert_eq!(report.table.count_by_family(AddressFamily::Ipv6), 2);

    let skipped: Vec<&str> = report.skipped.iter().map(|s| s.entry.cidr.as_str()).collect();
    assert_eq!(skipped, vec!["not-a-prefix", "13.107.213.0/33"]);
    assert!(matches!(report.skipped[0].error, CidrError::MalformedInput { .. }));
    assert!(matches!(report.skipped[1].error, CidrError::PrefixOutOfRange { .. }));

    let meta = report.skipped[1].entry.metadata.as_ref().unwrap();
    assert_eq!(meta.service_name, "AzureFrontDoor");
}

#[test]
fn fixture_overlapping_tags_all_reported() {
    let table = load_fixture().table;

    let result = table.query("20.38.108.10");
    let owners: Vec<String> = result.services().map(|m| m.to_string()).collect();
    assert_eq!(owners, vec!["AzureCloud (Global)", "AzureStorage (westeurope)"]);

    let result = table.query("2603:1020:200::5");
    let owners: Vec<&str> = result.services().map(|m| m.service_name.as_str()).collect();
    assert_eq!(owners, vec!["AzureCloud", "AzureStorage"]);
}

#[test]
fn fixture_single_and_missing_owner() {
    let table = load_fixture().table;

    let result = table.query("13.107.246.5");
    assert_eq!(result.matches().len(), 1);
    assert_eq!(result.matches()[0].to_string(), "13.107.246.0/24");

    let result = table.query("13.70.0.1");
    let owners: Vec<&str> = result.services().map(|m| m.service_name.as_str()).collect();
    assert_eq!(owners, vec!["AzureCloud"]);

    assert!(!table.query("8.8.8.8").matched());
    assert!(!table.query("2001:4860::8888").matched());
}

#[test]
fn plain_list_is_membership_only() -> anyhow::Result<()> {
    let dataset = Dataset::from_list_str("10.0.0.0/8\n# comment\nfd00::/8\n")?;
    let table = dataset.into_table().table;

    assert!(table.contains("10.20.30.40".parse::<IpAddr>()?));
    assert!(table.contains("fd12::1".parse::<IpAddr>()?));
    assert!(!table.contains("192.168.0.1".parse::<IpAddr>()?));
    assert_eq!(table.query("10.0.0.1").services().count(), 0);
    Ok(())
}

#[test]
fn missing_dataset_is_an_error() {
    let result = Dataset::from_path(&fixture("does_not_exist.json"));
    assert!(matches!(result, Err(DatasetError::Io { .. })));
}
