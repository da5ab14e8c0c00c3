use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for provisioning runs.
///
/// Every variant is fatal: a run stops at the first error and leaves
/// whatever earlier steps already converged in place.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure outside a managed write.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Config or data bag file exists but could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Data bag item file does not exist.
    #[error("Data bag item not found: {}", .0.display())]
    DataBagMissing(PathBuf),

    /// Data bag item exists but lacks required keys or is not valid JSON.
    #[error("Invalid data bag item '{}': {details}", path.display())]
    DataBagInvalid { path: PathBuf, details: String },

    /// Owner named in the data bag has no account on this host.
    #[error("User '{0}' does not exist on this host")]
    UnknownUser(String),

    /// Host network identity could not be determined.
    #[error("Failed to resolve hostname: {0}")]
    HostnameResolution(String),

    /// Virtual-host template failed to render.
    #[error("Failed to render virtual host template: {0}")]
    TemplateRender(String),

    /// Package manager could not install the package.
    #[error("Failed to install package '{package}': {details}")]
    PackageInstall { package: String, details: String },

    /// Creating, chowning, chmodding or writing a managed path failed.
    #[error("Failed to write '{}': {source}", path.display())]
    FilesystemWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// External command could not be spawned or exited non-zero.
    #[error("Command '{command}' failed: {details}")]
    CommandExecution { command: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn write_error<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        AppError::FilesystemWrite { path: path.into(), source }
    }

    /// Provide an `io::ErrorKind`-like view for callers that map errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::FilesystemWrite { source, .. } | AppError::InputRead { source, .. } => {
                source.kind()
            }
            AppError::Configuration(_)
            | AppError::DataBagInvalid { .. }
            | AppError::TemplateRender(_)
            | AppError::TomlParseError(_)
            | AppError::Json(_) => io::ErrorKind::InvalidInput,
            AppError::DataBagMissing(_) | AppError::UnknownUser(_) => io::ErrorKind::NotFound,
            AppError::HostnameResolution(_)
            | AppError::PackageInstall { .. }
            | AppError::CommandExecution { .. } => io::ErrorKind::Other,
        }
    }
}
