//! # Network Models
//!
//! * [`range::NetworkRange`]: A parsed CIDR block, optionally tagged with service metadata.
//! * [`cidr::parse`]: Turns `address/prefix` text into a [`range::NetworkRange`].

pub mod cidr;
pub mod range;
