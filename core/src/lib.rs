//! # Tagscope Core
//!
//! * **[`matcher`]**: The build-once, query-many [`matcher::RangeTable`].
//! * **[`dataset`]**: Reads service tag documents and CIDR lists into table entries.

pub mod dataset;
pub mod matcher;
