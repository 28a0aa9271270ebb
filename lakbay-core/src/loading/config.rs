use std::path::PathBuf;

use serde::Deserialize;

/// Where route definitions are read from
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Directories scanned for `*.json` route definition files
    pub route_dirs: Vec<PathBuf>,
    /// Individual definition files, read after the directories
    pub route_files: Vec<PathBuf>,
}

impl NetworkConfig {
    pub fn from_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            route_dirs: dirs.into_iter().map(Into::into).collect(),
            route_files: Vec::new(),
        }
    }
}
