use crate::ports::{AccountDatabase, CommandRunner, SystemFilesystem};

/// Application context holding the host ports a run converges through.
pub struct AppContext<C: CommandRunner, F: SystemFilesystem, A: AccountDatabase> {
    commands: C,
    filesystem: F,
    accounts: A,
}

impl<C: CommandRunner, F: SystemFilesystem, A: AccountDatabase> AppContext<C, F, A> {
    /// Create a new application context.
    pub fn new(commands: C, filesystem: F, accounts: A) -> Self {
        Self { commands, filesystem, accounts }
    }

    /// Get a reference to the process runner.
    pub fn commands(&self) -> &C {
        &self.commands
    }

    /// Get a reference to the filesystem.
    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    /// Get a reference to the account database.
    pub fn accounts(&self) -> &A {
        &self.accounts
    }
}
