use std::path::Path;

use crate::domain::AppError;

/// Ownership and permission bits of an existing directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryState {
    pub uid: u32,
    /// Permission bits only (`st_mode & 0o7777`).
    pub mode: u32,
}

/// Filesystem operations the convergence steps need.
///
/// Reads return `Ok(None)` for missing paths; mutations map failures to
/// `AppError::FilesystemWrite`.
pub trait SystemFilesystem {
    /// State of the directory at `path`, or `None` when nothing exists there.
    ///
    /// A non-directory at `path` is an error.
    fn directory_state(&self, path: &Path) -> Result<Option<DirectoryState>, AppError>;

    /// Create a single directory; the parent must already exist.
    fn create_dir(&self, path: &Path, mode: u32) -> Result<(), AppError>;

    /// Change the owning user, leaving the group untouched.
    fn set_owner(&self, path: &Path, uid: u32) -> Result<(), AppError>;

    fn set_mode(&self, path: &Path, mode: u32) -> Result<(), AppError>;

    /// Current file content, or `None` when the file does not exist.
    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>, AppError>;

    /// Replace the file content atomically.
    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), AppError>;
}

impl<T: SystemFilesystem + ?Sized> SystemFilesystem for &T {
    fn directory_state(&self, path: &Path) -> Result<Option<DirectoryState>, AppError> {
        (**self).directory_state(path)
    }

    fn create_dir(&self, path: &Path, mode: u32) -> Result<(), AppError> {
        (**self).create_dir(path, mode)
    }

    fn set_owner(&self, path: &Path, uid: u32) -> Result<(), AppError> {
        (**self).set_owner(path, uid)
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<(), AppError> {
        (**self).set_mode(path, mode)
    }

    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>, AppError> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), AppError> {
        (**self).write_file(path, content)
    }
}
