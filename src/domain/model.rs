use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A chart publication cycle as listed in the catalog's cycle selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationCycle {
    /// Opaque token the catalog expects back in search queries.
    pub token: String,
    /// Start date parsed from the option label; only used for ordering.
    pub effective: NaiveDate,
}

/// Ordered waypoint identifiers. Order drives both lookup and page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    waypoints: Vec<String>,
}

impl Route {
    pub fn new<I, S>(waypoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            waypoints: waypoints.into_iter().map(Into::into).collect(),
        }
    }

    pub fn waypoints(&self) -> &[String] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocument {
    pub waypoint: String,
    pub url: String,
}

/// A document in the local cache. An existing path is trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    pub url: String,
    pub path: PathBuf,
    pub cache_hit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOutput {
    pub flight_name: String,
    pub path: PathBuf,
    pub documents: usize,
}
