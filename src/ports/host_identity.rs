use crate::domain::AppError;

/// Source of the machine's network identity.
pub trait HostIdentity {
    /// Canonical hostname of this machine, resolved fresh on every call.
    fn resolve_hostname(&self) -> Result<String, AppError>;
}

impl<T: HostIdentity + ?Sized> HostIdentity for &T {
    fn resolve_hostname(&self) -> Result<String, AppError> {
        (**self).resolve_hostname()
    }
}
