pub mod auth;
pub mod error;
pub mod models;
pub mod password;
pub mod testutil;
pub mod token;
pub mod traits;

pub use auth::{AuthResult, AuthService, LoginInput, RegisterInput};
pub use error::AppError;
pub use models::{NewUser, Role, User};
pub use password::PasswordHasher;
pub use token::{Claims, TokenService};
pub use traits::UserStore;
