//! # Tagscope Common
//!
//! Shared models for the tagscope workspace.
//!
//! * **[`network`]**: Address ranges, service metadata and the CIDR parser.
//! * **[`config`]**: Runtime settings passed from the CLI to the command handlers.

pub mod config;
pub mod network;
