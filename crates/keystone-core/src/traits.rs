use std::future::Future;

use crate::error::AppError;
use crate::models::{NewUser, User};

/// Persists and retrieves user accounts.
///
/// Implementations must enforce email uniqueness themselves and report a
/// duplicate as [`AppError::Conflict`], so concurrent registrations for the
/// same address cannot both succeed.
pub trait UserStore: Send + Sync + Clone {
    /// Look up a user by exact (case-sensitive) email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// Insert a new user and return the stored record.
    fn create(&self, user: &NewUser) -> impl Future<Output = Result<User, AppError>> + Send;

    /// Total number of stored users.
    fn count(&self) -> impl Future<Output = Result<i64, AppError>> + Send;
}
