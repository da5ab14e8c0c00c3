//! Preview the site file a run would write.

use crate::app::config::ProvisionInputs;
use crate::domain::{AppError, FileSpec};
use crate::ports::HostIdentity;

/// Execute the render command.
///
/// Reads the same inputs as a run but never consults the host's packages,
/// files or accounts.
pub fn execute<H: HostIdentity>(inputs: &ProvisionInputs, host: &H) -> Result<FileSpec, AppError> {
    let plan = inputs.resolve_plan(host)?;
    Ok(plan.site_file)
}
