use chrono::Utc;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{NewUser, Role, User};
use crate::password::PasswordHasher;
use crate::token::{Claims, TokenService};
use crate::traits::UserStore;

pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";

/// Registration fields as submitted. Every field is optional on the wire;
/// presence is checked by [`AuthService::register`].
#[derive(Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login fields as submitted.
#[derive(Clone, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Outcome of a successful register or login: the signed token and the claims
/// it carries. How it reaches the client is up to the caller.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub claims: Claims,
}

/// Credential verification and token issuance, independent of transport.
pub struct AuthService<'a, S>
where
    S: UserStore,
{
    store: S,
    tokens: &'a TokenService,
    hasher: PasswordHasher,
}

impl<'a, S> AuthService<'a, S>
where
    S: UserStore,
{
    pub fn new(store: S, tokens: &'a TokenService, hasher: PasswordHasher) -> Self {
        Self {
            store,
            tokens,
            hasher,
        }
    }

    /// Register a new account with the default role and sign a token for it.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResult, AppError> {
        let (Some(name), Some(email), Some(password)) = (
            present(input.name),
            present(input.email),
            present(input.password),
        ) else {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.into()));
        };

        let user = self
            .create_account(name, email, &password, Role::User)
            .await?;
        tracing::info!(user_id = %user.id, "User registered");

        self.session_for(&user)
    }

    /// Create an account with an explicit role. See [`create_account`].
    pub async fn create_account(
        &self,
        name: String,
        email: String,
        password: &str,
        role: Role,
    ) -> Result<User, AppError> {
        create_account(&self.store, &self.hasher, name, email, password, role).await
    }

    /// Verify an email/password pair and sign a token.
    ///
    /// Unknown email, wrong password and missing fields all yield
    /// [`AppError::InvalidCredentials`].
    pub async fn login(&self, input: LoginInput) -> Result<AuthResult, AppError> {
        let (Some(email), Some(password)) = (present(input.email), present(input.password))
        else {
            return Err(AppError::InvalidCredentials);
        };

        let Some(user) = self.store.find_by_email(&email).await? else {
            // Spend the same bcrypt work as a real check so response time
            // does not reveal whether the account exists.
            let _ = self.hasher.hash(&password).await;
            tracing::info!("Login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(&password, &user.password_hash).await? {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.session_for(&user)
    }

    fn session_for(&self, user: &User) -> Result<AuthResult, AppError> {
        let claims = self.tokens.claims_for(user, Utc::now());
        let token = self.tokens.sign(&claims)?;
        Ok(AuthResult { token, claims })
    }
}

/// Hash `password` and store a new account with `role`. Shared by
/// registration and by operator tooling, which has no token service and is
/// the only way to create an admin.
///
/// A taken email yields [`AppError::Conflict`] with
/// [`DUPLICATE_EMAIL_MESSAGE`].
pub async fn create_account<S>(
    store: &S,
    hasher: &PasswordHasher,
    name: String,
    email: String,
    password: &str,
    role: Role,
) -> Result<User, AppError>
where
    S: UserStore,
{
    if store.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.into()));
    }

    let password_hash = hasher.hash(password).await?;

    // The store's own uniqueness check catches a concurrent registration
    // that slipped past the lookup above.
    store
        .create(&NewUser {
            name,
            email,
            password_hash,
            role,
        })
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.into()),
            other => other,
        })
}

/// A field counts as missing when absent or blank.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
