use crate::app::config::ProvisionInputs;
use crate::domain::{AppError, ConvergeReport, StepStatus};

pub(super) fn run_converge(
    inputs: ProvisionInputs,
    dry_run: bool,
    json: bool,
) -> Result<(), AppError> {
    let report = crate::converge(&inputs, dry_run)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ConvergeReport) {
    for outcome in &report.steps {
        let marker = match outcome.status {
            StepStatus::UpToDate => "✓",
            StepStatus::Updated => "↻",
            StepStatus::WouldUpdate => "?",
        };
        println!("{} {}", marker, outcome.step);
        for change in &outcome.changes {
            let prefix = if report.dry_run { "would " } else { "" };
            println!("    - {}{}", prefix, change);
        }
    }

    let changed = report.changed_count();
    if report.dry_run {
        println!("🔍 Dry run: {} of {} step(s) would change", changed, report.steps.len());
    } else {
        println!("✅ Converged: {} of {} step(s) changed", changed, report.steps.len());
    }
}
