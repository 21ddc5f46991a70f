use keystone_core::AppError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings for the credential store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Read `DATABASE_URL` (required) and `DATABASE_MAX_CONNECTIONS`
    /// (defaults to 5) from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let url = lookup("DATABASE_URL")
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("DATABASE_URL must be set to a PostgreSQL URL".into())
            })?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .map(|raw| parse_max_connections(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Ok(Self {
            url,
            max_connections,
        })
    }
}

fn parse_max_connections(raw: &str) -> Result<u32, AppError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(AppError::ConfigError(
            "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(AppError::ConfigError(format!(
            "Invalid DATABASE_MAX_CONNECTIONS '{raw}': must be a positive integer"
        ))),
    }
}
