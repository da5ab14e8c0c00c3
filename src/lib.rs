//! worker-provision: converge a host into an Apache worker virtual host.
//!
//! A run installs the web server package, creates the run directory under the
//! document root, writes the rendered site file, enables the worker site,
//! disables the default site and reloads the service. Each step checks the
//! current state first, so repeated runs only redo the unconditional toggles
//! and reload.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use adapters::{OsFilesystem, PasswdAccountDatabase, ProcessCommandRunner, ResolverHostIdentity};
use app::{AppContext, commands};

pub use app::commands::converge::ConvergeOptions;
pub use app::config::ProvisionInputs;
pub use domain::{AppError, ConvergePlan, ConvergeReport, FileSpec, Step, StepOutcome, StepStatus};

/// Converge this host using the OS-backed adapters.
///
/// With `dry_run`, every step is checked and reported but nothing changes.
pub fn converge(inputs: &ProvisionInputs, dry_run: bool) -> Result<ConvergeReport, AppError> {
    let plan = inputs.resolve_plan(&ResolverHostIdentity::new())?;
    let ctx = AppContext::new(
        ProcessCommandRunner::new(),
        OsFilesystem::new(),
        PasswdAccountDatabase::new(),
    );

    commands::converge::execute(&ctx, &plan, ConvergeOptions { dry_run })
}

/// Render the site file a run would write, without touching the host.
pub fn render(inputs: &ProvisionInputs) -> Result<FileSpec, AppError> {
    commands::render::execute(inputs, &ResolverHostIdentity::new())
}
