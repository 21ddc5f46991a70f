use thiserror::Error;

/// Application-wide error types for Keystone.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Email/password pair did not match a stored user.
    ///
    /// Deliberately carries no detail: an unknown email and a wrong password
    /// must be indistinguishable to the caller.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Token signature, structure, or expiry check failed.
    #[error("Invalid token.")]
    InvalidToken,

    /// Authenticated, but the role does not grant access.
    #[error("{0}")]
    Forbidden(String),

    /// A unique resource (e.g. email) already exists.
    #[error("{0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Token could not be signed.
    #[error("Token error: {0}")]
    TokenError(String),

    /// Password hashing or verification failed internally.
    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true for failures the caller caused (bad input, bad credentials,
    /// insufficient role). Everything else is an unexpected server-side fault
    /// whose detail must not leak into a response.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidCredentials
                | AppError::InvalidToken
                | AppError::Forbidden(_)
                | AppError::Conflict(_)
        )
    }
}
