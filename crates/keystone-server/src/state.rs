use keystone_core::{AppError, AuthService, PasswordHasher, TokenService};
use keystone_db::{Database, UserRepository};

use crate::config::ServerConfig;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
///
/// Immutable after startup; the signing secret lives only inside `tokens`.
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
    /// Add `Secure` to session cookies (production only).
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(db: Database, config: &ServerConfig) -> Result<Self, AppError> {
        Ok(Self {
            db,
            tokens: TokenService::new(config.jwt_secret())?,
            hasher: PasswordHasher::new(config.bcrypt_cost)?,
            secure_cookies: config.environment.is_production(),
        })
    }

    /// Auth service over the PostgreSQL user store.
    pub fn auth_service(&self) -> AuthService<'_, UserRepository> {
        AuthService::new(self.db.user_repo(), &self.tokens, self.hasher)
    }
}
