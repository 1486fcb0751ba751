use std::net::IpAddr;

use colored::*;

use crate::terminal::{colors, print};
use crate::tprint;
use tagscope_common::config::Config;
use tagscope_core::matcher::RangeTable;

pub fn lookup(table: &RangeTable, ips: &[String], cfg: &Config) -> anyhow::Result<()> {
    print::header("lookup", cfg.quiet);

    let mut matched: usize = 0;
    for (idx, ip) in ips.iter().enumerate() {
        if show_result(table, ip, idx, cfg) {
            matched += 1;
        }
        if idx + 1 != ips.len() && cfg.quiet < 2 {
            tprint!();
        }
    }

    if cfg.quiet == 0 {
        print::fat_separator();
        print_summary(matched, ips.len());
    }
    Ok(())
}

/// Prints the outcome of one query. Returns whether anything matched.
pub fn show_result(table: &RangeTable, query: &str, idx: usize, cfg: &Config) -> bool {
    let query = query.trim();
    let result = table.query(query);

    if !result.matched() {
        print::no_match(query);
        return false;
    }

    let label: String = match query.parse::<IpAddr>() {
        Ok(addr) => print::colored_ip(&addr).to_string(),
        Err(_) => query.to_string(),
    };
    let count: usize = result.matches().len();
    let unit: &str = if count == 1 { "range" } else { "ranges" };

    print::tree_head(idx, &format!("{label} {}", format!("({count} {unit})").color(colors::SEPARATOR)));
    if cfg.quiet < 2 {
        print::range_tree(result.matches());
    }
    true
}

fn print_summary(matched: usize, total: usize) {
    let matched_str: ColoredString = format!("{matched}/{total}").bold().green();
    print::print_status(format!("Lookup complete: {matched_str} addresses matched"));
}
