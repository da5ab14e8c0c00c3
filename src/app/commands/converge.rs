//! Bring the host to the state described by a `ConvergePlan`.
//!
//! Steps run strictly in plan order and each must finish before the next
//! starts. The package, directory and site file steps read current state and
//! act only on a difference; the site toggles and reload always run. The
//! first error aborts the run.

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::app::AppContext;
use crate::domain::{
    AppError, CommandLine, ConvergePlan, ConvergeReport, DirectorySpec, FileSpec, PackageSpec,
    Step, StepOutcome,
};
use crate::ports::{AccountDatabase, CommandRunner, SystemFilesystem};

/// Output the package query must print for an installed package.
const INSTALLED_MARKER: &str = "installed";

/// Hex digits of the SHA-256 shown in file change descriptions.
const CHECKSUM_DIGITS: usize = 12;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvergeOptions {
    /// Check every step but change nothing.
    pub dry_run: bool,
}

/// Execute the converge command.
pub fn execute<C, F, A>(
    ctx: &AppContext<C, F, A>,
    plan: &ConvergePlan,
    options: ConvergeOptions,
) -> Result<ConvergeReport, AppError>
where
    C: CommandRunner,
    F: SystemFilesystem,
    A: AccountDatabase,
{
    let dry_run = options.dry_run;
    let mut report = ConvergeReport::new(dry_run);

    info!(dry_run, "Starting convergence");

    report.push(ensure_package(ctx.commands(), &plan.package, dry_run)?);
    report.push(ensure_directory(ctx.filesystem(), ctx.accounts(), &plan.directory, dry_run)?);
    report.push(ensure_file(ctx.filesystem(), &plan.site_file, dry_run)?);
    report.push(run_action(ctx.commands(), Step::EnableSite, &plan.enable_site, dry_run)?);
    report.push(run_action(ctx.commands(), Step::DisableSite, &plan.disable_site, dry_run)?);
    report.push(run_action(ctx.commands(), Step::ReloadService, &plan.reload_service, dry_run)?);

    info!(changed = report.changed_count(), "Convergence finished");
    Ok(report)
}

fn ensure_package<C: CommandRunner>(
    commands: &C,
    package: &PackageSpec,
    dry_run: bool,
) -> Result<StepOutcome, AppError> {
    let query = commands.run(&package.query)?;
    if query.success && query.stdout.trim() == INSTALLED_MARKER {
        info!(step = %Step::Package, package = %package.name, "up to date");
        return Ok(StepOutcome::up_to_date(Step::Package));
    }

    let changes = vec![format!("install package {}", package.name)];
    if dry_run {
        return Ok(StepOutcome::changed(Step::Package, true, changes));
    }

    info!(step = %Step::Package, package = %package.name, command = %package.install, "installing");
    let output = commands.run(&package.install).map_err(|e| AppError::PackageInstall {
        package: package.name.clone(),
        details: e.to_string(),
    })?;
    if !output.success {
        return Err(AppError::PackageInstall {
            package: package.name.clone(),
            details: failure_details(&output.stderr),
        });
    }

    Ok(StepOutcome::changed(Step::Package, false, changes))
}

fn ensure_directory<F: SystemFilesystem, A: AccountDatabase>(
    filesystem: &F,
    accounts: &A,
    directory: &DirectorySpec,
    dry_run: bool,
) -> Result<StepOutcome, AppError> {
    let uid = accounts.uid_of(&directory.owner)?;
    let path = directory.path.as_path();

    let (create, chown, chmod) = match filesystem.directory_state(path)? {
        None => (true, true, true),
        Some(state) => (false, state.uid != uid, state.mode != directory.mode),
    };

    if !(create || chown || chmod) {
        info!(step = %Step::Directory, path = %path.display(), "up to date");
        return Ok(StepOutcome::up_to_date(Step::Directory));
    }

    let mut changes = Vec::new();
    if create {
        changes.push(format!("create directory {}", path.display()));
    }
    if chown {
        changes.push(format!("change owner to {}", directory.owner));
    }
    if chmod {
        changes.push(format!("change mode to {:04o}", directory.mode));
    }

    if !dry_run {
        info!(step = %Step::Directory, path = %path.display(), create, chown, chmod, "converging");
        if create {
            filesystem.create_dir(path, directory.mode)?;
        }
        if chown {
            filesystem.set_owner(path, uid)?;
        }
        // The umask narrows the create mode, so chmod also follows creation.
        if chmod {
            filesystem.set_mode(path, directory.mode)?;
        }
    }

    Ok(StepOutcome::changed(Step::Directory, dry_run, changes))
}

fn ensure_file<F: SystemFilesystem>(
    filesystem: &F,
    file: &FileSpec,
    dry_run: bool,
) -> Result<StepOutcome, AppError> {
    let path = file.path.as_path();
    let desired = file.content.as_bytes();
    let current = filesystem.read_file(path)?;

    if current.as_deref() == Some(desired) {
        info!(step = %Step::SiteFile, path = %path.display(), "up to date");
        return Ok(StepOutcome::up_to_date(Step::SiteFile));
    }

    let change = match &current {
        None => format!("create new file {} ({})", path.display(), checksum(desired)),
        Some(existing) => format!(
            "update content in file {} from {} to {}",
            path.display(),
            checksum(existing),
            checksum(desired)
        ),
    };

    if !dry_run {
        info!(step = %Step::SiteFile, path = %path.display(), "writing");
        filesystem.write_file(path, desired)?;
    }

    Ok(StepOutcome::changed(Step::SiteFile, dry_run, vec![change]))
}

fn run_action<C: CommandRunner>(
    commands: &C,
    step: Step,
    command: &CommandLine,
    dry_run: bool,
) -> Result<StepOutcome, AppError> {
    if dry_run {
        return Ok(StepOutcome::changed(step, true, vec![format!("run `{}`", command)]));
    }

    info!(step = %step, command = %command, "running");
    let output = commands.run(command)?;
    if !output.success {
        warn!(step = %step, command = %command, stderr = %output.stderr, "command failed");
        return Err(AppError::CommandExecution {
            command: command.to_string(),
            details: failure_details(&output.stderr),
        });
    }

    Ok(StepOutcome::changed(step, false, vec![format!("ran `{}`", command)]))
}

fn failure_details(stderr: &str) -> String {
    if stderr.trim().is_empty() {
        "exited with non-zero status".to_string()
    } else {
        stderr.trim().to_string()
    }
}

fn checksum(content: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(content));
    format!("sha256:{}", &digest[..CHECKSUM_DIGITS])
}
