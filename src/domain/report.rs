//! Outcome of a convergence run.

use std::fmt;

use serde::Serialize;

/// Steps of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Package,
    Directory,
    SiteFile,
    EnableSite,
    DisableSite,
    ReloadService,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::Package => "package",
            Step::Directory => "directory",
            Step::SiteFile => "site-file",
            Step::EnableSite => "enable-site",
            Step::DisableSite => "disable-site",
            Step::ReloadService => "reload-service",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    /// Desired state already held; nothing was done.
    UpToDate,
    /// An action ran.
    Updated,
    /// Dry run: an action would have run.
    WouldUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    pub status: StepStatus,
    /// Human-readable description of each change made or pending.
    pub changes: Vec<String>,
}

impl StepOutcome {
    pub fn up_to_date(step: Step) -> Self {
        Self { step, status: StepStatus::UpToDate, changes: Vec::new() }
    }

    pub fn changed(step: Step, dry_run: bool, changes: Vec<String>) -> Self {
        let status = if dry_run { StepStatus::WouldUpdate } else { StepStatus::Updated };
        Self { step, status, changes }
    }
}

/// Ordered record of every step a run reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvergeReport {
    pub dry_run: bool,
    pub steps: Vec<StepOutcome>,
}

impl ConvergeReport {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run, steps: Vec::new() }
    }

    pub fn push(&mut self, outcome: StepOutcome) {
        self.steps.push(outcome);
    }

    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps.iter().find(|outcome| outcome.step == step)
    }

    /// Number of steps that changed (or would change) system state.
    pub fn changed_count(&self) -> usize {
        self.steps.iter().filter(|outcome| outcome.status != StepStatus::UpToDate).count()
    }
}
