use std::ffi::{CStr, CString};
use std::io;
use std::mem;
use std::ptr;

use tracing::debug;

use crate::domain::AppError;
use crate::ports::HostIdentity;

/// Longest hostname POSIX allows plus the terminating NUL.
const HOST_NAME_BUFFER: usize = 256;

/// `HostIdentity` using `gethostname(2)` followed by a canonical-name lookup
/// through the system resolver.
#[derive(Debug, Clone, Default)]
pub struct ResolverHostIdentity;

impl ResolverHostIdentity {
    pub fn new() -> Self {
        Self
    }

    fn local_hostname() -> Result<String, AppError> {
        let mut buffer = [0 as libc::c_char; HOST_NAME_BUFFER];

        // SAFETY: the length passed leaves room for the NUL we force below.
        let rc = unsafe { libc::gethostname(buffer.as_mut_ptr(), buffer.len() - 1) };
        if rc != 0 {
            return Err(AppError::HostnameResolution(io::Error::last_os_error().to_string()));
        }
        buffer[HOST_NAME_BUFFER - 1] = 0;

        // SAFETY: the buffer is NUL-terminated.
        let name = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        let name = name.to_string_lossy().into_owned();
        if name.is_empty() {
            return Err(AppError::HostnameResolution("hostname is empty".to_string()));
        }
        Ok(name)
    }

    /// Canonical name of `host` as reported by the system resolver.
    fn canonical_name(host: &str) -> Result<String, AppError> {
        let node = CString::new(host).map_err(|_| {
            AppError::HostnameResolution(format!("hostname '{}' contains a NUL byte", host))
        })?;

        // SAFETY: an all-zero addrinfo is a valid "no constraints" hints value.
        let mut hints: libc::addrinfo = unsafe { mem::zeroed() };
        hints.ai_family = libc::AF_UNSPEC;
        hints.ai_socktype = libc::SOCK_STREAM;
        hints.ai_flags = libc::AI_CANONNAME;

        let mut results: *mut libc::addrinfo = ptr::null_mut();

        // SAFETY: `node` and `hints` outlive the call; `results` is freed below.
        let rc = unsafe { libc::getaddrinfo(node.as_ptr(), ptr::null(), &hints, &mut results) };
        if rc != 0 || results.is_null() {
            // SAFETY: gai_strerror returns a static NUL-terminated message.
            let reason = unsafe { CStr::from_ptr(libc::gai_strerror(rc)) };
            return Err(AppError::HostnameResolution(format!(
                "'{}' does not resolve: {}",
                host,
                reason.to_string_lossy()
            )));
        }

        // SAFETY: `results` is a valid list returned by getaddrinfo; with
        // AI_CANONNAME the first entry carries the canonical name (possibly null).
        let canonical = unsafe {
            let first = &*results;
            let name = if first.ai_canonname.is_null() {
                None
            } else {
                Some(CStr::from_ptr(first.ai_canonname).to_string_lossy().into_owned())
            };
            libc::freeaddrinfo(results);
            name
        };

        canonical.filter(|name| !name.is_empty()).ok_or_else(|| {
            AppError::HostnameResolution(format!("'{}' has no canonical name", host))
        })
    }
}

impl HostIdentity for ResolverHostIdentity {
    fn resolve_hostname(&self) -> Result<String, AppError> {
        let local = Self::local_hostname()?;
        let canonical = Self::canonical_name(&local)?;
        debug!(local = %local, canonical = %canonical, "resolved hostname");
        Ok(canonical)
    }
}
