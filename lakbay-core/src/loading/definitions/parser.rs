use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use super::raw_types::RouteDefinition;
use crate::{Error, loading::NetworkConfig};

/// A definition file holds either one route or a list of routes
#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionFile {
    Many(Vec<RouteDefinition>),
    One(Box<RouteDefinition>),
}

/// Parse route definitions from JSON text
pub fn parse_route_definitions(json: &str, origin: &str) -> Result<Vec<RouteDefinition>, Error> {
    let file: DefinitionFile =
        serde_json::from_str(json).map_err(|source| Error::DefinitionParse {
            path: origin.to_string(),
            source,
        })?;
    Ok(match file {
        DefinitionFile::Many(defs) => defs,
        DefinitionFile::One(def) => vec![*def],
    })
}

/// Read every route definition the configuration points at.
///
/// Directories are scanned for `*.json` files in file-name order so that the
/// resulting snapshot is the same on every machine.
pub fn load_route_definitions(config: &NetworkConfig) -> Result<Vec<RouteDefinition>, Error> {
    let mut paths = Vec::new();
    for dir in &config.route_dirs {
        paths.extend(json_files_in(dir)?);
    }
    paths.extend(config.route_files.iter().cloned());

    let mut definitions = Vec::new();
    for path in &paths {
        let text = fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open file '{}': {}", path.display(), e),
            )
        })?;
        let parsed = parse_route_definitions(&text, &path.display().to_string())?;
        debug!("Read {} route definitions from {}", parsed.len(), path.display());
        definitions.extend(parsed);
    }
    Ok(definitions)
}

fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
