//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a handler can hit is mapped onto one of six kinds, each with a fixed
//! HTTP status: validation (400), authentication (401), authorization (403),
//! not-found (404), conflict (409) and internal (500).
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly. Internal errors are logged with their detail and reported to the caller
//! with a generic message only.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use validator::ValidationErrors;

use crate::auth::password::HashError;
use crate::auth::token::TokenError;
use crate::store::StoreError;

/// Message returned to clients for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input caught before reaching storage (HTTP 400).
    #[error("Validation Error: {0}")]
    Validation(String),
    /// Missing, invalid or expired token, or bad credentials (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Valid identity that does not own the resource (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// Requested resource does not exist (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// Uniqueness violation (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Persistence, hashing or other server-side failure (HTTP 500).
    /// The message is logged, never sent to the client.
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    /// The message placed in the JSON response body.
    pub fn client_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg,
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            log::error!("request failed: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.client_message()
        }))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Unique violations surface as conflicts and a missing task owner as not-found.
/// Anything else from the store is internal.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::UniqueViolation(_) => AppError::Conflict("Email already in use".into()),
            StoreError::ForeignKeyViolation(_) => AppError::NotFound("User not found".into()),
            StoreError::Database(e) => AppError::Internal(format!("database error: {}", e)),
        }
    }
}

/// Token verification failures are authentication failures. Encoding failures are ours.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Encoding(msg) => AppError::Internal(format!("token encoding failed: {}", msg)),
            _ => AppError::Unauthorized("Invalid or expired token".into()),
        }
    }
}

impl From<HashError> for AppError {
    fn from(error: HashError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(error: actix_multipart::MultipartError) -> AppError {
        AppError::Validation(format!("Invalid multipart payload: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let cases = [
            (AppError::Validation("bad".into()), 400),
            (AppError::Unauthorized("Invalid token".into()), 401),
            (AppError::Forbidden("not yours".into()), 403),
            (AppError::NotFound("Resource not found".into()), 404),
            (AppError::Conflict("Email already in use".into()), 409),
            (AppError::Internal("Server error".into()), 500),
        ];

        for (error, status) in cases {
            assert_eq!(error.error_response().status(), status, "{:?}", error);
        }
    }

    #[actix_rt::test]
    async fn test_internal_error_hides_detail() {
        let error = AppError::Internal("connection refused at 10.0.0.3:5432".into());
        let body = actix_web::body::to_bytes(error.error_response().into_body())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_store_unique_violation_is_conflict() {
        let error: AppError = StoreError::UniqueViolation("users_email_key".into()).into();
        assert!(matches!(error, AppError::Conflict(_)));

        let error: AppError = StoreError::ForeignKeyViolation("tasks_owner_id_fkey".into()).into();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[test]
    fn test_token_failures_are_unauthorized() {
        let error: AppError = TokenError::Expired.into();
        assert!(matches!(error, AppError::Unauthorized(_)));

        let error: AppError = TokenError::Encoding("boom".into()).into();
        assert!(matches!(error, AppError::Internal(_)));
    }
}
