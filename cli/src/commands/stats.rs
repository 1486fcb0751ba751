use std::collections::BTreeSet;

use colored::*;

use crate::terminal::{colors, print};
use tagscope_common::config::Config;
use tagscope_common::network::range::AddressFamily;
use tagscope_core::matcher::BuildReport;

const KEY_WIDTH: usize = 8;

pub fn stats(report: &BuildReport, cfg: &Config) -> anyhow::Result<()> {
    print::header("dataset summary", cfg.quiet);

    let table = &report.table;
    let services: BTreeSet<&str> = table
        .iter()
        .filter_map(|range| range.metadata())
        .map(|meta| meta.service_name.as_str())
        .collect();
    let regions: BTreeSet<&str> = table
        .iter()
        .filter_map(|range| range.metadata())
        .map(|meta| meta.region.as_str())
        .collect();

    let lines: [(&str, ColoredString); 6] = [
        ("Source", cfg.data_path.display().to_string().color(colors::ACCENT)),
        ("Ranges", table.len().to_string().bold()),
        ("IPv4", table.count_by_family(AddressFamily::Ipv4).to_string().color(colors::IPV4_ADDR)),
        ("IPv6", table.count_by_family(AddressFamily::Ipv6).to_string().color(colors::IPV6_ADDR)),
        ("Services", services.len().to_string().normal()),
        ("Regions", regions.len().to_string().color(colors::REGION)),
    ];

    for (key, value) in lines {
        print::aligned_line(key, value, KEY_WIDTH);
    }

    let skipped: ColoredString = match report.skipped.len() {
        0 => "0".green(),
        n => n.to_string().yellow().bold(),
    };
    print::aligned_line("Skipped", skipped, KEY_WIDTH);

    Ok(())
}
