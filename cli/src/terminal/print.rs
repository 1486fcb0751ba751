use std::net::IpAddr;

use colored::*;
use tracing::info;

use crate::terminal::{colors, logging::PRINT_TARGET};
use tagscope_common::network::range::NetworkRange;

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! tprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

/// `key.....: value`, padded to `key_width`.
pub fn aligned_line(key: &str, value: ColoredString, key_width: usize) {
    let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
    print_status(format!(
        "{}{}{} {}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    ));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn colored_ip(ip: &IpAddr) -> ColoredString {
    match ip {
        IpAddr::V4(_) => ip.to_string().color(colors::IPV4_ADDR),
        IpAddr::V6(_) => ip.to_string().color(colors::IPV6_ADDR),
    }
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    print(&format!("{} {}", idx_str, name.color(colors::PRIMARY).bold()));
}

/// One branch per matching range: `├─ 10.0.0.0/8 ── Storage (westeurope)`.
pub fn range_tree(ranges: &[NetworkRange]) {
    for (i, range) in ranges.iter().enumerate() {
        let last: bool = i + 1 == ranges.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };

        let owner: String = match range.metadata() {
            Some(meta) => format!(
                " {} {} {}",
                "──".color(colors::SEPARATOR),
                meta.service_name.color(colors::TEXT_DEFAULT),
                format!("({})", meta.region).color(colors::REGION)
            ),
            None => String::new(),
        };

        print(&format!(
            " {} {}{}",
            branch,
            range.to_string().color(colors::ACCENT),
            owner
        ));
    }
}

pub fn no_match(query: &str) {
    print(&format!(
        "{} {}",
        query.color(colors::TEXT_DEFAULT).bold(),
        "is not in any loaded range".red()
    ));
}
