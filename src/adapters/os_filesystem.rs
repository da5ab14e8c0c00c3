use std::fs::{self, DirBuilder, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::{DirBuilderExt, MetadataExt, PermissionsExt, chown};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::AppError;
use crate::ports::{DirectoryState, SystemFilesystem};

/// Mode given to site files that did not exist before.
const NEW_FILE_MODE: u32 = 0o644;

/// `SystemFilesystem` backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct OsFilesystem;

impl OsFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl SystemFilesystem for OsFilesystem {
    fn directory_state(&self, path: &Path) -> Result<Option<DirectoryState>, AppError> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::write_error(path, e)),
        };

        if !metadata.is_dir() {
            return Err(AppError::write_error(
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "path exists and is not a directory"),
            ));
        }

        Ok(Some(DirectoryState { uid: metadata.uid(), mode: metadata.mode() & 0o7777 }))
    }

    fn create_dir(&self, path: &Path, mode: u32) -> Result<(), AppError> {
        DirBuilder::new().mode(mode).create(path).map_err(|e| AppError::write_error(path, e))
    }

    fn set_owner(&self, path: &Path, uid: u32) -> Result<(), AppError> {
        chown(path, Some(uid), None).map_err(|e| AppError::write_error(path, e))
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<(), AppError> {
        fs::set_permissions(path, Permissions::from_mode(mode))
            .map_err(|e| AppError::write_error(path, e))
    }

    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>, AppError> {
        match fs::read(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::write_error(path, e)),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), AppError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mode = match fs::metadata(path) {
            Ok(existing) => existing.mode() & 0o7777,
            Err(e) if e.kind() == io::ErrorKind::NotFound => NEW_FILE_MODE,
            Err(e) => return Err(AppError::write_error(path, e)),
        };

        let mut staged = NamedTempFile::new_in(parent).map_err(|e| AppError::write_error(path, e))?;
        staged.write_all(content).map_err(|e| AppError::write_error(path, e))?;
        staged.as_file().sync_all().map_err(|e| AppError::write_error(path, e))?;
        fs::set_permissions(staged.path(), Permissions::from_mode(mode))
            .map_err(|e| AppError::write_error(path, e))?;
        staged.persist(path).map_err(|e| AppError::write_error(path, e.error))?;
        Ok(())
    }
}
