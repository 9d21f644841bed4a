pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::UserProfile;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenError, TokenService};

lazy_static! {
    // Passwords: 3 to 30 ASCII letters or digits
    static ref PASSWORD_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9]{3,30}$").unwrap();
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30))]
    pub first_name: String,
    #[validate(length(min = 3, max = 30))]
    pub last_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    /// Must be 3 to 30 letters or digits.
    #[validate(regex(
        path = "PASSWORD_REGEX",
        message = "Password must be 3 to 30 letters or digits"
    ))]
    pub password: String,
    /// Must equal `password`.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of a successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: Uuid,
}

/// Body of a successful login: the bearer token plus the user's public profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}
