use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;
use std::ptr;

use crate::domain::AppError;
use crate::ports::AccountDatabase;

/// Initial scratch buffer for `getpwnam_r`; grown on `ERANGE`.
const INITIAL_BUFFER: usize = 1024;
const MAX_BUFFER: usize = 1 << 20;

/// `AccountDatabase` backed by the system user database (NSS).
#[derive(Debug, Clone, Default)]
pub struct PasswdAccountDatabase;

impl PasswdAccountDatabase {
    pub fn new() -> Self {
        Self
    }
}

impl AccountDatabase for PasswdAccountDatabase {
    fn uid_of(&self, username: &str) -> Result<u32, AppError> {
        let name = CString::new(username).map_err(|_| AppError::UnknownUser(username.to_string()))?;
        let mut buffer: Vec<libc::c_char> = vec![0; INITIAL_BUFFER];

        loop {
            let mut entry = MaybeUninit::<libc::passwd>::uninit();
            let mut found: *mut libc::passwd = ptr::null_mut();

            // SAFETY: every pointer refers to live storage owned by this frame and
            // `buffer.len()` is the true capacity of `buffer`.
            let rc = unsafe {
                libc::getpwnam_r(
                    name.as_ptr(),
                    entry.as_mut_ptr(),
                    buffer.as_mut_ptr(),
                    buffer.len(),
                    &mut found,
                )
            };

            if rc == libc::ERANGE && buffer.len() < MAX_BUFFER {
                buffer.resize(buffer.len() * 2, 0);
                continue;
            }
            if rc != 0 {
                return Err(AppError::Io(io::Error::from_raw_os_error(rc)));
            }
            if found.is_null() {
                return Err(AppError::UnknownUser(username.to_string()));
            }

            // SAFETY: a non-null `found` points at `entry`, which getpwnam_r initialised.
            let uid = unsafe { (*found).pw_uid };
            return Ok(uid);
        }
    }
}
