mod account_database;
mod command_runner;
mod host_identity;
mod system_filesystem;

pub use account_database::AccountDatabase;
pub use command_runner::{CommandOutput, CommandRunner};
pub use host_identity::HostIdentity;
pub use system_filesystem::{DirectoryState, SystemFilesystem};
