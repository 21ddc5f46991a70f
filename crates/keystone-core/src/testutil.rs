//! Test utilities: an in-memory [`UserStore`].
//!
//! Uses `Arc<Mutex<_>>` for interior mutability so clones share state and
//! tests can assert on what was stored.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::traits::UserStore;

/// In-memory user store with the same uniqueness rule as the database.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose next call fails with `error`.
    pub fn with_error(error: AppError) -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }

    /// Snapshot of all stored users, in insertion order.
    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn take_error(&self) -> Result<(), AppError> {
        match self.error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.take_error()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        self.take_error()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let stored = User {
            id: Uuid::new_v4(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            created_at: Utc::now(),
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.take_error()?;
        Ok(self.users.lock().unwrap().len() as i64)
    }
}
