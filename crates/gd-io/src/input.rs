//! Input directory discovery.

use std::path::{Path, PathBuf};

use crate::{LoadError, LoadResult};

pub const NODE_FILE: &str = "node.csv";
pub const POI_FILE: &str = "poi.csv";
pub const ZONE_FILE: &str = "zone.csv";
pub const TRIP_RATE_FILE: &str = "trip_rate.csv";
pub const ACCESSIBILITY_FILE: &str = "accessibility.csv";

/// Paths of the input tables found in one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputFiles {
    pub node: PathBuf,
    pub poi: PathBuf,
    pub zone: Option<PathBuf>,
    pub trip_rate: Option<PathBuf>,
    pub accessibility: Option<PathBuf>,
}

impl InputFiles {
    /// Locate the tables in `dir`.  `node.csv` and `poi.csv` must exist;
    /// the others are picked up when present.
    pub fn discover(dir: &Path) -> LoadResult<Self> {
        let required = |name: &str| {
            let path = dir.join(name);
            if path.is_file() { Ok(path) } else { Err(LoadError::MissingFile(path)) }
        };
        let optional = |name: &str| Some(dir.join(name)).filter(|p| p.is_file());

        let files = Self {
            node: required(NODE_FILE)?,
            poi: required(POI_FILE)?,
            zone: optional(ZONE_FILE),
            trip_rate: optional(TRIP_RATE_FILE),
            accessibility: optional(ACCESSIBILITY_FILE),
        };
        log::debug!("input files: {files:?}");
        Ok(files)
    }

    /// Replace the trip-rate table path (an explicit path wins over discovery).
    pub fn with_trip_rate(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.trip_rate = path;
        }
        self
    }

    /// Replace the accessibility table path.
    pub fn with_accessibility(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.accessibility = path;
        }
        self
    }
}
