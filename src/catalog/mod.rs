//! Catalog data model.
//!
//! A [`Port`] is one installable package as emitted by the site generator's
//! search index: a JSON array of objects with short keys (`n`, `c`, `d`,
//! `v`, ...). Only name, category, description, and version are guaranteed;
//! every other field may be absent and predicates must treat absence as a
//! non-match rather than an error.

pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::{HttpSource, IndexLoader, IndexSource, LoadStatus};

/// CI build outcome for a port. Absent or unrecognized statuses in the
/// index collapse to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Success,
    Failed,
    #[default]
    #[serde(other)]
    None,
}

/// One catalog entry, immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "c")]
    pub category: String,
    #[serde(rename = "d")]
    pub description: String,
    #[serde(rename = "v")]
    pub version: String,
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "pds", default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<String>,
    #[serde(rename = "dps", default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,
    #[serde(rename = "br", default)]
    pub is_broken: bool,
    #[serde(rename = "un", default)]
    pub is_unmaintained: bool,
    /// Unix seconds of the last commit touching this port; 0 when unknown.
    #[serde(rename = "dt", default)]
    pub last_updated: i64,
    #[serde(rename = "st", default)]
    pub build_status: BuildStatus,
}

/// Row state shown by the result presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus {
    Ok,
    Broken,
    Pending,
}

impl PortStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Broken => "broken",
            Self::Pending => "pending",
        }
    }
}

impl Port {
    /// Status indicator: the broken flag or a failed build wins, a port
    /// that has never been built is pending, everything else is ok.
    pub fn status(&self) -> PortStatus {
        if self.is_broken || self.build_status == BuildStatus::Failed {
            PortStatus::Broken
        } else if self.build_status == BuildStatus::None {
            PortStatus::Pending
        } else {
            PortStatus::Ok
        }
    }
}

/// The full in-memory collection of ports for one process, in index order.
/// Immutable after load and shared read-only by every query.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ports: Vec<Port>,
}

impl Catalog {
    pub fn from_ports(ports: Vec<Port>) -> Self {
        Self { ports }
    }

    /// Decode a catalog from the raw index payload (a JSON array).
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        Ok(Self {
            ports: serde_json::from_slice(bytes)?,
        })
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Port> {
        self.ports.iter()
    }
}
