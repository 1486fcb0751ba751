//! # CIDR Parser
//!
//! Parses `address/prefix` notation such as `10.0.0.0/8` or `2001:db8::/32`
//! into a [`NetworkRange`].

use std::net::IpAddr;
use std::num::IntErrorKind;
use std::str::FromStr;

use thiserror::Error;

use crate::network::range::{AddressFamily, NetworkRange};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    /// Input does not have exactly one `/` separator.
    #[error("malformed CIDR '{input}': expected <address>/<prefix>")]
    MalformedInput { input: String },
    #[error("invalid IP address '{addr}'")]
    InvalidAddress { addr: String },
    /// Prefix part is not a non-negative integer.
    #[error("invalid prefix length '{prefix}'")]
    InvalidPrefixLength { prefix: String },
    #[error("prefix length {prefix} exceeds {max} for {family}")]
    PrefixOutOfRange {
        prefix: String,
        family: AddressFamily,
        max: u8,
    },
}

/// Parses CIDR notation like "192.168.1.0/24".
///
/// Surrounding whitespace is ignored. Host bits in the address are kept as
/// written; matching masks them away.
pub fn parse(s: &str) -> Result<NetworkRange, CidrError> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('/').collect();

    let [addr_str, prefix_str] = parts.as_slice() else {
        return Err(CidrError::MalformedInput { input: s.to_string() });
    };

    let addr = addr_str
        .parse::<IpAddr>()
        .map_err(|_| CidrError::InvalidAddress { addr: addr_str.to_string() })?;

    let family = AddressFamily::of(&addr);
    let prefix_len = parse_prefix_len(prefix_str, family)?;

    NetworkRange::new(addr, prefix_len).ok_or_else(|| out_of_range(prefix_str, family))
}

/// Parses the prefix part and checks it against the family's bit width.
fn parse_prefix_len(prefix_str: &str, family: AddressFamily) -> Result<u8, CidrError> {
    // `u32::from_str` accepts a leading '+', which is not valid CIDR.
    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CidrError::InvalidPrefixLength { prefix: prefix_str.to_string() });
    }

    let prefix = match prefix_str.parse::<u32>() {
        Ok(prefix) => prefix,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            return Err(out_of_range(prefix_str, family));
        }
        Err(_) => {
            return Err(CidrError::InvalidPrefixLength { prefix: prefix_str.to_string() });
        }
    };

    if prefix > u32::from(family.max_prefix_len()) {
        return Err(out_of_range(prefix_str, family));
    }

    u8::try_from(prefix).map_err(|_| out_of_range(prefix_str, family))
}

fn out_of_range(prefix_str: &str, family: AddressFamily) -> CidrError {
    CidrError::PrefixOutOfRange {
        prefix: prefix_str.to_string(),
        family,
        max: family.max_prefix_len(),
    }
}

impl FromStr for NetworkRange {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_parse_ipv4() {
        let range = parse("10.0.0.0/8").unwrap();
        assert_eq!(range.family(), AddressFamily::Ipv4);
        assert_eq!(range.prefix_len(), 8);
        assert_eq!(range.address().as_slice(), &[10, 0, 0, 0]);
        assert!(range.metadata().is_none());
    }

    #[test]
    fn test_parse_ipv6() {
        let range = parse("2001:db8::/32").unwrap();
        assert_eq!(range.family(), AddressFamily::Ipv6);
        assert_eq!(range.prefix_len(), 32);
        assert_eq!(range.address().as_slice().len(), 16);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse("  192.168.0.0/16\n").is_ok());
    }

    #[test]
    fn test_parse_from_str() {
        let range: NetworkRange = "172.16.0.0/12".parse().unwrap();
        assert_eq!(range.to_string(), "172.16.0.0/12");
    }

    #[test]
    fn test_parse_every_ipv4_prefix_remasks() {
        let addr = Ipv4Addr::new(203, 0, 113, 77);
        for n in 0..=32u8 {
            let range = parse(&format!("{addr}/{n}")).unwrap();
            assert_eq!(range.prefix_len(), n);

            let remasked = range.address().masked(n).masked(n);
            assert_eq!(remasked.to_ip_addr(), range.network(), "prefix /{n}");
        }
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["bad-cidr", "10.0.0.0", "10.0.0.0/8/8", "", "/"] {
            let result = parse(input);
            if input == "/" {
                assert!(matches!(result, Err(CidrError::InvalidAddress { .. })));
            } else {
                assert!(
                    matches!(result, Err(CidrError::MalformedInput { .. })),
                    "{input:?} gave {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_parse_invalid_address() {
        assert!(matches!(
            parse("10.0.0.256/8"),
            Err(CidrError::InvalidAddress { .. })
        ));
        assert!(matches!(
            parse("not-an-ip/24"),
            Err(CidrError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_prefix_length() {
        for input in ["10.0.0.0/", "10.0.0.0/-1", "10.0.0.0/+8", "10.0.0.0/abc", "10.0.0.0/8.0"] {
            assert!(
                matches!(parse(input), Err(CidrError::InvalidPrefixLength { .. })),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_parse_prefix_out_of_range() {
        for n in [33u32, 64, 128, 255, 256, 1000] {
            assert!(matches!(
                parse(&format!("10.0.0.0/{n}")),
                Err(CidrError::PrefixOutOfRange { max: 32, .. })
            ));
        }
        for n in [129u32, 200, 256] {
            assert!(matches!(
                parse(&format!("2001:db8::/{n}")),
                Err(CidrError::PrefixOutOfRange { max: 128, .. })
            ));
        }
        assert!(matches!(
            parse("10.0.0.0/99999999999999999999"),
            Err(CidrError::PrefixOutOfRange { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            parse("10.0.0.0/33").unwrap_err().to_string(),
            "prefix length 33 exceeds 32 for IPv4"
        );
        assert_eq!(
            parse("bad-cidr").unwrap_err().to_string(),
            "malformed CIDR 'bad-cidr': expected <address>/<prefix>"
        );
    }
}
