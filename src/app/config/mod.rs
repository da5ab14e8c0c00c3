//! Loading of the run's external inputs.

mod load_config;
mod load_data_bag;

pub use load_config::{DEFAULT_CONFIG_PATH, load_config};
pub use load_data_bag::load_data_bag;

use std::path::PathBuf;

use tracing::info;

use crate::domain::{AppError, ConvergePlan};
use crate::ports::HostIdentity;

/// Where a run takes its inputs from.
///
/// `None` fields fall back to the configured or OS-provided source.
#[derive(Debug, Clone, Default)]
pub struct ProvisionInputs {
    /// Tool configuration file.
    pub config: Option<PathBuf>,
    /// Data bag item file, bypassing `[data_bag]` lookup.
    pub data_bag: Option<PathBuf>,
    /// Hostname to render instead of resolving the local one.
    pub hostname: Option<String>,
}

impl ProvisionInputs {
    /// Read every input once and resolve the desired state.
    pub fn resolve_plan<H: HostIdentity>(&self, host: &H) -> Result<ConvergePlan, AppError> {
        let config = load_config(self.config.as_deref())?;
        let bundle = load_data_bag(&config, self.data_bag.as_deref())?;
        let hostname = match &self.hostname {
            Some(hostname) => hostname.clone(),
            None => host.resolve_hostname()?,
        };

        info!(
            hostname = %hostname,
            docroot = %bundle.web_docroot.display(),
            username = %bundle.username,
            "Resolved run inputs"
        );

        ConvergePlan::build(&config, &bundle, &hostname)
    }
}
