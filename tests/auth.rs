mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{bearer, init_app, register, register_and_login, register_payload, send, test_state};

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let app = init_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_payload("a@x.com"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "Registration failed. Body: {}", body);
    assert_eq!(body["message"], "User registered successfully");
    let user_id = body["id"].as_str().expect("id in body").to_string();

    // Same email again
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(register_payload("a@x.com"))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already in use");

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "a@x.com", "password": "Pass123" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK, "Login failed. Body: {}", body);
    assert_eq!(body["message"], "Login successful");
    assert!(!body["token"].as_str().unwrap_or_default().is_empty());
    assert_eq!(body["user"]["id"], user_id.as_str());
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["firstName"], "Test");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[actix_rt::test]
async fn test_register_validation_errors() {
    let app = init_app(test_state()).await;

    let mismatched = json!({
        "firstName": "Test",
        "lastName": "User",
        "email": "a@x.com",
        "password": "Pass123",
        "confirmPassword": "Pass124"
    });
    let short_name = json!({
        "firstName": "Al",
        "lastName": "User",
        "email": "a@x.com",
        "password": "Pass123",
        "confirmPassword": "Pass123"
    });
    let bad_email = json!({
        "firstName": "Test",
        "lastName": "User",
        "email": "not-an-email",
        "password": "Pass123",
        "confirmPassword": "Pass123"
    });
    let symbol_password = json!({
        "firstName": "Test",
        "lastName": "User",
        "email": "a@x.com",
        "password": "Pass 123!",
        "confirmPassword": "Pass 123!"
    });
    let missing_field = json!({ "email": "a@x.com", "password": "Pass123" });

    for payload in [mismatched, short_name, bad_email, symbol_password, missing_field] {
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {} was accepted", payload);
        assert!(body["message"].is_string());
    }

    // None of the rejected payloads created the account.
    register(&app, "a@x.com").await;
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let app = init_app(test_state()).await;
    register(&app, "a@x.com").await;

    let wrong_password = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "a@x.com", "password": "Wrong123" }))
        .to_request();
    let (status_wrong, body_wrong) = send(&app, wrong_password).await;

    let unknown_email = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "nobody@x.com", "password": "Pass123" }))
        .to_request();
    let (status_unknown, body_unknown) = send(&app, unknown_email).await;

    assert_eq!(status_wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body_wrong, body_unknown);
    assert_eq!(body_wrong["message"], "Invalid credentials");
}

#[actix_rt::test]
async fn test_malformed_json_is_bad_request() {
    let app = init_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[actix_rt::test]
async fn test_logout_requires_token() {
    let app = init_app(test_state()).await;
    let (_, token) = register_and_login(&app, "a@x.com").await;

    let req = test::TestRequest::post().uri("/auth/logout").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing authorization header");

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    // Logout is stateless: the token keeps working until it expires.
    let req = test::TestRequest::get()
        .uri("/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let app = init_app(test_state()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "up");
}
