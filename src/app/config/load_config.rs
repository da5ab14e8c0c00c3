//! Provisioning configuration loading.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::domain::{AppError, ProvisionConfig};

/// Read when no `--config` is given; its absence means all defaults.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/worker-provision/provision.toml";

/// Load and validate the provisioning configuration.
///
/// An explicitly named file must exist. Without one, the default path is
/// tried and a missing file yields the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ProvisionConfig, AppError> {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(ProvisionConfig::default());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Err(e) => return Err(AppError::InputRead { path: path.to_path_buf(), source: e }),
    };

    parse_config_content(&content)
}

/// Parse and validate configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<ProvisionConfig, AppError> {
    let config: ProvisionConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
