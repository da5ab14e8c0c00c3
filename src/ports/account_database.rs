use crate::domain::AppError;

/// Maps account names to numeric user ids.
pub trait AccountDatabase {
    /// Resolve `username` to its uid, or `AppError::UnknownUser`.
    fn uid_of(&self, username: &str) -> Result<u32, AppError>;
}

impl<T: AccountDatabase + ?Sized> AccountDatabase for &T {
    fn uid_of(&self, username: &str) -> Result<u32, AppError> {
        (**self).uid_of(username)
    }
}
