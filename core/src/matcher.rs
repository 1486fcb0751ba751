//! # Range Matcher
//!
//! Holds every parsed range in load order and reports all of them that
//! contain a queried address.
//!
//! The table is built once and never mutated, so a shared `&RangeTable` can be
//! queried from any number of threads. A reload builds a fresh table.

use std::net::IpAddr;

use tagscope_common::network::cidr::{self, CidrError};
use tagscope_common::network::range::{AddressFamily, NetworkRange, Octets, RangeMetadata};

/// One input line for [`RangeTable::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry {
    pub cidr: String,
    pub metadata: Option<RangeMetadata>,
}

impl RangeEntry {
    pub fn new(cidr: impl Into<String>, metadata: Option<RangeMetadata>) -> Self {
        Self {
            cidr: cidr.into(),
            metadata,
        }
    }
}

impl From<&str> for RangeEntry {
    fn from(cidr: &str) -> Self {
        Self::new(cidr, None)
    }
}

/// An input that failed to parse and was left out of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub entry: RangeEntry,
    pub error: CidrError,
}

/// Result of [`RangeTable::build`]: the table plus every entry that was skipped.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub table: RangeTable,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    ranges: Vec<NetworkRange>,
}

impl RangeTable {
    /// Parses every entry independently. Bad entries never abort the build,
    /// they are returned in [`BuildReport::skipped`] for the caller to report.
    pub fn build<I, E>(entries: I) -> BuildReport
    where
        I: IntoIterator<Item = E>,
        E: Into<RangeEntry>,
    {
        let mut ranges = Vec::new();
        let mut skipped = Vec::new();

        for entry in entries {
            let entry: RangeEntry = entry.into();
            match cidr::parse(&entry.cidr) {
                Ok(range) => ranges.push(range.with_metadata(entry.metadata)),
                Err(error) => skipped.push(SkippedEntry { entry, error }),
            }
        }

        BuildReport {
            table: RangeTable { ranges },
            skipped,
        }
    }

    /// Every range containing `ip`, in load order.
    ///
    /// Text that is not an IP address simply matches nothing.
    pub fn query(&self, ip: &str) -> QueryResult {
        match ip.trim().parse::<IpAddr>() {
            Ok(addr) => self.query_addr(addr),
            Err(_) => QueryResult::default(),
        }
    }

    pub fn query_addr(&self, addr: IpAddr) -> QueryResult {
        let query = Octets::from(addr);
        let matches = self
            .ranges
            .iter()
            .filter(|range| range.contains(&query))
            .cloned()
            .collect();

        QueryResult { matches }
    }

    /// Boolean membership, without collecting the matches.
    pub fn contains(&self, addr: IpAddr) -> bool {
        let query = Octets::from(addr);
        self.ranges.iter().any(|range| range.contains(&query))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkRange> {
        self.ranges.iter()
    }

    pub fn count_by_family(&self, family: AddressFamily) -> usize {
        self.ranges.iter().filter(|range| range.family() == family).count()
    }
}

/// Ranges that matched a query, in the order they were loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    matches: Vec<NetworkRange>,
}

impl QueryResult {
    pub fn matched(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn matches(&self) -> &[NetworkRange] {
        &self.matches
    }

    /// Metadata of each match, skipping ranges loaded without any.
    pub fn services(&self) -> impl Iterator<Item = &RangeMetadata> {
        self.matches.iter().filter_map(NetworkRange::metadata)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
