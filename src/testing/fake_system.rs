use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{AppError, CommandLine};
use crate::ports::{AccountDatabase, CommandOutput, CommandRunner, DirectoryState, SystemFilesystem};

/// In-memory host: filesystem, accounts, packages and process table in one.
///
/// `dpkg-query` and `apt-get` are interpreted against `packages`; every other
/// program succeeds unless registered with `failing`.
pub struct FakeSystem {
    pub dirs: Mutex<BTreeMap<PathBuf, DirectoryState>>,
    pub files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    pub users: Mutex<BTreeMap<String, u32>>,
    pub packages: Mutex<BTreeSet<String>>,
    pub failing: Mutex<BTreeSet<String>>,
    /// Every command run, rendered as a single line.
    pub commands: Mutex<Vec<String>>,
    /// Every filesystem mutation, e.g. `mkdir /srv/x`.
    pub mutations: Mutex<Vec<String>>,
}

impl Default for FakeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSystem {
    pub fn new() -> Self {
        Self {
            dirs: Mutex::new(BTreeMap::new()),
            files: Mutex::new(BTreeMap::new()),
            users: Mutex::new(BTreeMap::new()),
            packages: Mutex::new(BTreeSet::new()),
            failing: Mutex::new(BTreeSet::new()),
            commands: Mutex::new(Vec::new()),
            mutations: Mutex::new(Vec::new()),
        }
    }

    pub fn with_dir(self, path: &str, uid: u32, mode: u32) -> Self {
        self.dirs.lock().unwrap().insert(PathBuf::from(path), DirectoryState { uid, mode });
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files.lock().unwrap().insert(PathBuf::from(path), content.as_bytes().to_vec());
        self
    }

    pub fn with_user(self, name: &str, uid: u32) -> Self {
        self.users.lock().unwrap().insert(name.to_string(), uid);
        self
    }

    pub fn with_package(self, name: &str) -> Self {
        self.packages.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn failing(self, program: &str) -> Self {
        self.failing.lock().unwrap().insert(program.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    pub fn clear_logs(&self) {
        self.commands.lock().unwrap().clear();
        self.mutations.lock().unwrap().clear();
    }

    pub fn dir(&self, path: &str) -> Option<DirectoryState> {
        self.dirs.lock().unwrap().get(Path::new(path)).copied()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(Path::new(path))
            .map(|content| String::from_utf8_lossy(content).into_owned())
    }

    fn record(&self, mutation: String) {
        self.mutations.lock().unwrap().push(mutation);
    }
}

impl CommandRunner for FakeSystem {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput, AppError> {
        self.commands.lock().unwrap().push(command.to_string());

        if self.failing.lock().unwrap().contains(&command.program) {
            return Ok(CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: format!("{} failed", command.program),
            });
        }

        let package = command.args.last().cloned().unwrap_or_default();
        match command.program.as_str() {
            "dpkg-query" => {
                let installed = self.packages.lock().unwrap().contains(&package);
                Ok(CommandOutput {
                    success: installed,
                    stdout: if installed { "installed".into() } else { String::new() },
                    stderr: String::new(),
                })
            }
            "apt-get" => {
                self.packages.lock().unwrap().insert(package);
                Ok(CommandOutput { success: true, ..CommandOutput::default() })
            }
            _ => Ok(CommandOutput { success: true, ..CommandOutput::default() }),
        }
    }
}

impl AccountDatabase for FakeSystem {
    fn uid_of(&self, username: &str) -> Result<u32, AppError> {
        self.users
            .lock()
            .unwrap()
            .get(username)
            .copied()
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))
    }
}

impl SystemFilesystem for FakeSystem {
    fn directory_state(&self, path: &Path) -> Result<Option<DirectoryState>, AppError> {
        Ok(self.dirs.lock().unwrap().get(path).copied())
    }

    fn create_dir(&self, path: &Path, mode: u32) -> Result<(), AppError> {
        let mut dirs = self.dirs.lock().unwrap();
        let parent_exists = path.parent().is_some_and(|parent| dirs.contains_key(parent));
        if !parent_exists {
            return Err(AppError::write_error(path, io::Error::from(io::ErrorKind::NotFound)));
        }
        dirs.insert(path.to_path_buf(), DirectoryState { uid: 0, mode });
        drop(dirs);
        self.record(format!("mkdir {}", path.display()));
        Ok(())
    }

    fn set_owner(&self, path: &Path, uid: u32) -> Result<(), AppError> {
        let mut dirs = self.dirs.lock().unwrap();
        let state = dirs
            .get_mut(path)
            .ok_or_else(|| AppError::write_error(path, io::Error::from(io::ErrorKind::NotFound)))?;
        state.uid = uid;
        drop(dirs);
        self.record(format!("chown {} {}", uid, path.display()));
        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<(), AppError> {
        let mut dirs = self.dirs.lock().unwrap();
        let state = dirs
            .get_mut(path)
            .ok_or_else(|| AppError::write_error(path, io::Error::from(io::ErrorKind::NotFound)))?;
        state.mode = mode;
        drop(dirs);
        self.record(format!("chmod {:o} {}", mode, path.display()));
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Option<Vec<u8>>, AppError> {
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), AppError> {
        self.files.lock().unwrap().insert(path.to_path_buf(), content.to_vec());
        self.record(format!("write {}", path.display()));
        Ok(())
    }
}
