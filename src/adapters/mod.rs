pub mod os_filesystem;
pub mod passwd_account_database;
pub mod process_command_runner;
pub mod resolver_host_identity;

pub use os_filesystem::OsFilesystem;
pub use passwd_account_database::PasswdAccountDatabase;
pub use process_command_runner::ProcessCommandRunner;
pub use resolver_host_identity::ResolverHostIdentity;
