//! # Dataset Loader
//!
//! Turns a dataset on disk into [`RangeEntry`] values for [`RangeTable::build`].
//!
//! Two formats are understood:
//! * **Service tag JSON** (`.json`): `values[].properties.addressPrefixes`, each
//!   prefix tagged with the tag's region and system service.
//! * **Plain list** (anything else): one CIDR per line, `#` starts a comment.
//!   Entries carry no metadata.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::matcher::{BuildReport, RangeEntry, RangeTable};
use tagscope_common::network::range::RangeMetadata;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed service tag document")]
    Json(#[from] serde_json::Error),
    #[error("dataset contains no address prefixes")]
    Empty,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceTagDocument {
    #[serde(default)]
    change_number: Option<u64>,
    #[serde(default)]
    cloud: Option<String>,
    values: Vec<ServiceTag>,
}

#[derive(Debug, Deserialize)]
struct ServiceTag {
    name: String,
    properties: ServiceTagProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceTagProperties {
    #[serde(default)]
    region: String,
    #[serde(default)]
    system_service: String,
    #[serde(default)]
    address_prefixes: Vec<String>,
}

impl ServiceTag {
    /// The system service names the owner; fall back to the tag name when it is blank.
    fn metadata(&self) -> RangeMetadata {
        let service = match self.properties.system_service.trim() {
            "" => self.name.as_str(),
            service => service,
        };
        RangeMetadata::new(self.properties.region.as_str(), service)
    }
}

/// Entries read from a dataset, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub cloud: Option<String>,
    pub change_number: Option<u64>,
    entries: Vec<RangeEntry>,
}

impl Dataset {
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let dataset = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_list_str(&content)?
        };

        info!("Read {} address prefixes from {}", dataset.entries.len(), path.display());
        Ok(dataset)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let document: ServiceTagDocument = serde_json::from_str(json)?;

        let mut entries = Vec::new();
        for tag in &document.values {
            if tag.properties.address_prefixes.is_empty() {
                debug!("Service tag {} has no address prefixes", tag.name);
                continue;
            }

            let metadata = tag.metadata();
            entries.extend(
                tag.properties
                    .address_prefixes
                    .iter()
                    .map(|prefix| RangeEntry::new(prefix.as_str(), Some(metadata.clone()))),
            );
        }

        Self::non_empty(Self {
            cloud: document.cloud,
            change_number: document.change_number,
            entries,
        })
    }

    pub fn from_list_str(list: &str) -> Result<Self, DatasetError> {
        let entries = list
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default().trim())
            .filter(|line| !line.is_empty())
            .map(RangeEntry::from)
            .collect();

        Self::non_empty(Self {
            entries,
            ..Self::default()
        })
    }

    fn non_empty(dataset: Self) -> Result<Self, DatasetError> {
        if dataset.entries.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(dataset)
    }

    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    pub fn into_table(self) -> BuildReport {
        RangeTable::build(self.entries)
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
