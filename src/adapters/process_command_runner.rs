use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::{AppError, CommandLine};
use crate::ports::{CommandOutput, CommandRunner};

#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner;

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, AppError> {
        debug!(command = %command, "spawning");

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| AppError::CommandExecution {
                command: command.to_string(),
                details: e.to_string(),
            })?;

        let result = CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        debug!(command = %command, success = result.success, status = ?output.status.code(), "finished");
        Ok(result)
    }
}
