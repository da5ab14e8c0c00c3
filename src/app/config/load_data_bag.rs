//! Data bag item loading.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::domain::{AppError, ConfigBundle, ProvisionConfig};

/// Read the configured data bag item, or `override_path` when given.
pub fn load_data_bag(
    config: &ProvisionConfig,
    override_path: Option<&Path>,
) -> Result<ConfigBundle, AppError> {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => config.data_bag.item_path(),
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AppError::DataBagMissing(path));
        }
        Err(e) => return Err(AppError::InputRead { path, source: e }),
    };

    debug!(path = %path.display(), "loaded data bag item");
    ConfigBundle::from_json(&content, &path)
}
