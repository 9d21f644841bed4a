use crate::{
    auth::{AuthenticatedUser, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    error::AppError,
    services::AccountService,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: `{ "message", "id" }` with the new user's id.
/// - `400 Bad Request`: malformed body or failed validation (including a
///   `confirmPassword` that does not match).
/// - `409 Conflict`: the email is already in use.
#[post("/register")]
pub async fn register(
    accounts: web::Data<AccountService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = accounts.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".into(),
        id: user.id,
    }))
}

/// Login user
///
/// Authenticates a user and returns a bearer token with the user's profile.
/// Unknown email and wrong password both answer `401` with the same message.
#[post("/login")]
pub async fn login(
    accounts: web::Data<AccountService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let outcome = accounts.login(login_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".into(),
        token: outcome.token,
        user: outcome.user.into(),
    }))
}

/// Logout
///
/// Tokens are stateless, so this only confirms the caller was authenticated.
/// The token itself stays valid until it expires; clients must discard it.
pub async fn logout(user: AuthenticatedUser) -> impl Responder {
    log::info!("user {} logged out", user.id);
    HttpResponse::Ok().json(json!({ "message": "Logged out successfully" }))
}
