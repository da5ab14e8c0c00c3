//! External key-value input consumed by a run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::AppError;

/// Values read from the `data/local` data bag item.
///
/// Unknown keys (including the item's own `id`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigBundle {
    /// Web server document root; the run directory is created beneath it.
    pub web_docroot: PathBuf,
    /// Account that owns the run directory.
    pub username: String,
}

impl ConfigBundle {
    /// Parse a data bag item from its JSON content.
    ///
    /// `origin` is only used for error reporting.
    pub fn from_json(content: &str, origin: &Path) -> Result<Self, AppError> {
        let bundle: ConfigBundle = serde_json::from_str(content).map_err(|e| {
            AppError::DataBagInvalid { path: origin.to_path_buf(), details: e.to_string() }
        })?;
        bundle.validate(origin)?;
        Ok(bundle)
    }

    fn validate(&self, origin: &Path) -> Result<(), AppError> {
        if self.username.trim().is_empty() {
            return Err(AppError::DataBagInvalid {
                path: origin.to_path_buf(),
                details: "username must not be empty".to_string(),
            });
        }
        if self.web_docroot.as_os_str().is_empty() {
            return Err(AppError::DataBagInvalid {
                path: origin.to_path_buf(),
                details: "web_docroot must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
