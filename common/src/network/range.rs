//! # Network Range Model
//!
//! A [`NetworkRange`] is an immutable CIDR block (address bytes plus a prefix
//! length) with optional service tag metadata attached.
//!
//! Matching is done byte by byte: both the stored address and the queried
//! address are masked with the same prefix mask before they are compared.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Region reported for service tags that are not bound to a region.
pub const GLOBAL_REGION: &str = "Global";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }

    /// Address width in bytes.
    pub const fn width(self) -> usize {
        match self {
            AddressFamily::Ipv4 => 4,
            AddressFamily::Ipv6 => 16,
        }
    }

    pub const fn max_prefix_len(self) -> u8 {
        match self {
            AddressFamily::Ipv4 => 32,
            AddressFamily::Ipv6 => 128,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Ipv4 => write!(f, "IPv4"),
            AddressFamily::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Fixed-width address bytes. Only the first `family.width()` bytes are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Octets {
    bytes: [u8; 16],
    family: AddressFamily,
}

impl Octets {
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.family.width()]
    }

    /// Clears every bit past `prefix_len`.
    pub fn masked(&self, prefix_len: u8) -> Self {
        let mut masked = *self;
        for (idx, byte) in masked.bytes.iter_mut().enumerate() {
            *byte &= mask_byte(prefix_len, idx);
        }
        masked
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        match self.family {
            AddressFamily::Ipv4 => {
                IpAddr::V4(Ipv4Addr::new(self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]))
            }
            AddressFamily::Ipv6 => IpAddr::V6(Ipv6Addr::from(self.bytes)),
        }
    }
}

impl From<IpAddr> for Octets {
    fn from(addr: IpAddr) -> Self {
        let mut bytes = [0u8; 16];
        match addr {
            IpAddr::V4(v4) => bytes[..4].copy_from_slice(&v4.octets()),
            IpAddr::V6(v6) => bytes = v6.octets(),
        }
        Self {
            bytes,
            family: AddressFamily::of(&addr),
        }
    }
}

/// Mask byte at `index` for a prefix of `prefix_len` leading one-bits.
fn mask_byte(prefix_len: u8, index: usize) -> u8 {
    let bits = (prefix_len as usize).saturating_sub(index * 8).min(8);
    match bits {
        0 => 0,
        n => 0xFF << (8 - n),
    }
}

/// Builds the prefix mask over the byte width of `family`.
///
/// A prefix of 20 on an IPv4 address gives `FF FF F0 00`.
pub fn prefix_mask(prefix_len: u8, family: AddressFamily) -> Vec<u8> {
    (0..family.width()).map(|idx| mask_byte(prefix_len, idx)).collect()
}

/// Service tag data attached to a range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeMetadata {
    pub region: String,
    pub service_name: String,
}

impl RangeMetadata {
    /// An empty region means the tag is global.
    pub fn new(region: impl Into<String>, service_name: impl Into<String>) -> Self {
        let region: String = region.into();
        let region = if region.trim().is_empty() {
            GLOBAL_REGION.to_string()
        } else {
            region
        };

        Self {
            region,
            service_name: service_name.into(),
        }
    }
}

impl fmt::Display for RangeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.service_name, self.region)
    }
}

/// A parsed CIDR block.
///
/// The address is kept as written, host bits included. Use [`NetworkRange::network`]
/// for the masked network address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkRange {
    address: Octets,
    prefix_len: u8,
    metadata: Option<RangeMetadata>,
}

impl NetworkRange {
    /// Returns `None` when `prefix_len` is too long for the address family.
    pub fn new(addr: IpAddr, prefix_len: u8) -> Option<Self> {
        if prefix_len > AddressFamily::of(&addr).max_prefix_len() {
            return None;
        }

        Some(Self {
            address: Octets::from(addr),
            prefix_len,
            metadata: None,
        })
    }

    pub fn with_metadata(mut self, metadata: Option<RangeMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn address(&self) -> &Octets {
        &self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn family(&self) -> AddressFamily {
        self.address.family()
    }

    pub fn metadata(&self) -> Option<&RangeMetadata> {
        self.metadata.as_ref()
    }

    pub fn network(&self) -> IpAddr {
        self.address.masked(self.prefix_len).to_ip_addr()
    }

    /// True when `addr` lies inside this block.
    ///
    /// Addresses of the other family never match; IPv4-mapped IPv6
    /// addresses are not translated.
    pub fn contains(&self, addr: &Octets) -> bool {
        if addr.family() != self.family() {
            return false;
        }

        self.address
            .as_slice()
            .iter()
            .zip(addr.as_slice())
            .enumerate()
            .all(|(idx, (net, query))| {
                let mask = mask_byte(self.prefix_len, idx);
                net & mask == query & mask
            })
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address.to_ip_addr(), self.prefix_len)
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
