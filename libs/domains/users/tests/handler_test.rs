//! Handler tests for the Users domain

use axum::body::Body;
use axum::http::{Request, StatusCode};
use core_config::jwt::JwtConfig;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

const TEST_SECRET: &str = "handler-test-secret-with-32-chars-min!";

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_app() -> (UserService<InMemoryUserRepository>, axum::Router) {
    let service = UserService::new(InMemoryUserRepository::new());
    let app = handlers::router(service.clone(), JwtConfig::new(TEST_SECRET));
    (service, app)
}

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_create_user_returns_201_without_password_hash() {
    let (_, app) = test_app();
    let builder = TestDataBuilder::from_test_name("users_create_201");

    let email = builder.email("alice");
    let request = post_json(
        "/",
        json!({
            "name": "Alice",
            "email": email,
            "password": "s3cret-pass"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body_str.contains(&email));
    assert!(!body_str.contains("password"));
}

#[tokio::test]
async fn test_create_user_invalid_email_returns_400() {
    let (_, app) = test_app();

    let request = post_json(
        "/",
        json!({
            "name": "Alice",
            "email": "not-an-email",
            "password": "s3cret-pass"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_duplicate_email_returns_409() {
    let (service, app) = test_app();
    let builder = TestDataBuilder::from_test_name("users_duplicate_409");

    let email = builder.email("alice");
    service
        .create_user(CreateUser {
            name: "Alice".to_string(),
            email: email.clone(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .unwrap();

    let request = post_json(
        "/",
        json!({
            "name": "Other Alice",
            "email": email,
            "password": "other-pass"
        }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_generate_token_returns_decodable_token() {
    let (service, app) = test_app();
    let builder = TestDataBuilder::from_test_name("users_token_200");

    let email = builder.email("alice");
    let created = service
        .create_user(CreateUser {
            name: "Alice".to_string(),
            email: email.clone(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .unwrap();

    let request = post_json(
        "/token",
        json!({"email": email, "password": "s3cret-pass"}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: TokenResponse = json_body(response.into_body()).await;
    let claims = token::verify_token(&body.access_token, &JwtConfig::new(TEST_SECRET)).unwrap();
    assert_eq!(claims.sub, created.id.to_string());
}

#[tokio::test]
async fn test_generate_token_wrong_password_returns_401() {
    let (service, app) = test_app();
    let builder = TestDataBuilder::from_test_name("users_token_401");

    let email = builder.email("alice");
    service
        .create_user(CreateUser {
            name: "Alice".to_string(),
            email: email.clone(),
            password: "s3cret-pass".to_string(),
        })
        .await
        .unwrap();

    let request = post_json("/token", json!({"email": email, "password": "wrong"}));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_generate_token_unknown_email_returns_401() {
    let (_, app) = test_app();

    let request = post_json(
        "/token",
        json!({"email": "nobody@example.com", "password": "whatever"}),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
