#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::{to_bytes, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, App};
use chrono::Duration;
use serde_json::{json, Value};
use todo_api::auth::{PasswordHasher, TokenService};
use todo_api::routes;
use todo_api::storage::LocalImageStore;
use todo_api::store::MemoryStore;
use todo_api::AppState;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Pass123";

pub const PUBLIC_BASE_URL: &str = "http://localhost:8080";

/// A fresh, existing directory under the system temp dir.
pub fn test_upload_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("todo-api-tests-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create test upload directory");
    dir
}

/// State backed by `MemoryStore`, a cheap bcrypt cost and a throwaway upload directory.
pub fn test_state() -> AppState {
    test_state_with_uploads(&test_upload_dir())
}

pub fn test_state_with_uploads(upload_dir: &Path) -> AppState {
    AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(LocalImageStore::new(upload_dir, PUBLIC_BASE_URL)),
        PasswordHasher::new(4),
        TokenService::new(TEST_SECRET, Duration::hours(1)),
    )
}

pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
            .configure(routes::config),
    )
    .await
}

/// Like `init_app`, plus the `/uploads` file service over `upload_dir`.
pub async fn init_app_serving_uploads(
    state: AppState,
    upload_dir: &Path,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
            .configure(routes::config)
            .service(routes::uploads(upload_dir)),
    )
    .await
}

pub fn register_payload(email: &str) -> Value {
    json!({
        "firstName": "Test",
        "lastName": "User",
        "email": email,
        "password": PASSWORD,
        "confirmPassword": PASSWORD
    })
}

/// Sends `req` and returns the status with the body parsed as JSON
/// (`Value::Null` when the body is empty or not JSON).
///
/// Errors raised by middleware are rendered the way the server would render them.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = match test::try_call_service(app, req).await {
        Ok(resp) => {
            let status = resp.status();
            (status, test::read_body(resp).await)
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let body = to_bytes(resp.into_body()).await.unwrap_or_default();
            (status, body)
        }
    };
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

/// Registers `email` and returns the new user's id.
pub async fn register<S, B>(app: &S, email: &str) -> Uuid
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_payload(email))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", body);
    body["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("registration response carries an id")
}

/// Logs `email` in with the shared test password and returns the token.
pub async fn login<S, B>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

pub async fn register_and_login<S, B>(app: &S, email: &str) -> (Uuid, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let id = register(app, email).await;
    let token = login(app, email).await;
    (id, token)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
