use crate::domain::{AppError, CommandLine};

/// Captured result of an external process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external programs (package manager, site toggles, service reload).
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// Returns `Err` only when the process could not be started; a non-zero
    /// exit is reported through `CommandOutput::success`.
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, AppError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, AppError> {
        (**self).run(command)
    }
}
