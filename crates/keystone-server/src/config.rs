use std::fmt;

use keystone_core::AppError;
use keystone_core::password::{COST_RANGE, DEFAULT_COST};

const DEFAULT_PORT: u16 = 5000;

/// Deployment environment. Only `Production` turns on the `Secure` cookie flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Server settings read once at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    pub bcrypt_cost: u32,
    jwt_secret: String,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `JWT_SECRET` (required, no fallback)
    /// - `PORT` (optional, defaults to 5000)
    /// - `APP_ENV` (optional, `production` enables secure cookies)
    /// - `BCRYPT_COST` (optional, defaults to 10)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(
                    "JWT_SECRET must be set; there is no default signing secret".into(),
                )
            })?;

        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::ConfigError(format!("Invalid PORT '{raw}': must be 0-65535"))
            })?,
        };

        let environment = match lookup("APP_ENV") {
            Some(env) if env.trim().eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            None => DEFAULT_COST,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|c| COST_RANGE.contains(c))
                .ok_or_else(|| {
                    AppError::ConfigError(format!(
                        "Invalid BCRYPT_COST '{raw}': must be between {} and {}",
                        COST_RANGE.start(),
                        COST_RANGE.end()
                    ))
                })?,
        };

        if jwt_secret.len() < 32 {
            tracing::warn!("JWT_SECRET is shorter than 32 bytes; use a longer random secret");
        }

        Ok(Self {
            port,
            environment,
            bcrypt_cost,
            jwt_secret,
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
