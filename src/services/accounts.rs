use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{LoginRequest, PasswordHasher, RegisterRequest, TokenService};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::store::UserStore;

/// The one message for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// A successful login: the issued token and the user it was issued for.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Registration, login and account lookups over a `UserStore`.
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Creates an account from an already validated request.
    ///
    /// The email pre-check only gives the common case a cheap answer; the
    /// unique constraint on insert decides concurrent registrations.
    pub async fn register(&self, input: RegisterRequest) -> Result<User, AppError> {
        if self.users.find_user_by_email(&input.email).await?.is_some() {
            log::info!("registration rejected: email {} already in use", input.email);
            return Err(AppError::Conflict("Email already in use".into()));
        }

        let password_hash = self.hash(input.password).await?;
        let user = self
            .users
            .insert_user(NewUser {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
            })
            .await?;

        log::info!("user {} registered", user.id);
        Ok(user)
    }

    /// Checks credentials and issues a token.
    ///
    /// Unknown email and wrong password produce the same error; only the log tells them apart.
    pub async fn login(&self, input: LoginRequest) -> Result<LoginOutcome, AppError> {
        let Some(user) = self.users.find_user_by_email(&input.email).await? else {
            log::warn!("login failed: no user with email {}", input.email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !self.verify(input.password, user.password_hash.clone()).await? {
            log::warn!("login failed: wrong password for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        log::info!("user {} logged in", user.id);
        Ok(LoginOutcome { token, user })
    }

    pub async fn current_user(&self, id: Uuid) -> Result<User, AppError> {
        self.users
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Deletes the account; its tasks go with it.
    pub async fn delete_account(&self, id: Uuid) -> Result<(), AppError> {
        if !self.users.delete_user(id).await? {
            return Err(AppError::NotFound("User not found".into()));
        }
        log::info!("user {} deleted their account", id);
        Ok(())
    }

    // Hashing runs on the blocking pool.
    async fn hash(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))?
            .map_err(AppError::from)
    }

    async fn verify(&self, password: String, digest: String) -> Result<bool, AppError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::Internal(format!("password verification task failed: {}", e)))
    }
}
