use log::info;

use super::config::NetworkConfig;
use super::definitions::load_route_definitions;
use super::snapshot::build_snapshot;
use crate::{Error, NetworkSnapshot};

/// Creates a network snapshot based on the provided configuration
///
/// # Errors
///
/// Returns an error if a configured path is missing or a definition file
/// cannot be read or parsed
pub fn create_network_snapshot(config: &NetworkConfig) -> Result<NetworkSnapshot, Error> {
    validate_config(config)?;

    info!(
        "Loading route definitions from {} directories and {} files",
        config.route_dirs.len(),
        config.route_files.len()
    );
    let definitions = load_route_definitions(config)?;
    if definitions.is_empty() {
        log::warn!("No route definitions found, the network will be empty");
    }

    let snapshot = build_snapshot(&definitions);
    info!("{}", snapshot.network_info());
    Ok(snapshot)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if config.route_dirs.is_empty() && config.route_files.is_empty() {
        return Err(Error::InvalidData(
            "No route directories or files provided in the configuration".to_string(),
        ));
    }

    for path in config.route_dirs.iter().chain(&config.route_files) {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Route definition path not found: {}", path.display()),
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_config() {
        let err = create_network_snapshot(&NetworkConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_rejects_missing_directory() {
        let config = NetworkConfig::from_dirs(["/definitely/not/here"]);
        let err = create_network_snapshot(&config).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
