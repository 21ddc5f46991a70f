//! Password hashing and verification using bcrypt.
//!
//! bcrypt is CPU-bound by design, so both operations run on the blocking
//! thread pool and are awaited.

use crate::error::AppError;

/// Default bcrypt work factor.
pub const DEFAULT_COST: u32 = 10;

/// bcrypt accepts work factors in this range.
pub const COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, AppError> {
        if !COST_RANGE.contains(&cost) {
            return Err(AppError::ConfigError(format!(
                "bcrypt cost {cost} out of range ({}..={})",
                COST_RANGE.start(),
                COST_RANGE.end()
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    pub async fn hash(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::PasswordHashError(format!("Hashing task failed: {e}")))?
            .map_err(|e| AppError::PasswordHashError(format!("Failed to hash password: {e}")))
    }

    /// Check a plaintext password against a stored hash.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::PasswordHashError(format!("Verification task failed: {e}")))?
            .map_err(|e| AppError::PasswordHashError(format!("Failed to verify password: {e}")))
    }
}
