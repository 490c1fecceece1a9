//! Registration and login tests.

use actix_web::test;
use serde_json::json;

use crate::test_helpers::*;

const REGISTER: &str = "/api/v1/auth/register";
const LOGIN: &str = "/api/v1/auth/login";

#[actix_rt::test]
async fn test_register_then_login_token_authorizes_writes() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, user) = post_json(
        &app,
        REGISTER,
        json!({ "email": "QA@Example.com", "password": "hunter22" }),
    )
    .await;
    assert_eq!(status, 200, "{}", user);
    assert_eq!(user["email"], "qa@example.com");
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());

    let (status, login) = post_json(
        &app,
        LOGIN,
        json!({ "email": "qa@example.com", "password": "hunter22" }),
    )
    .await;
    assert_eq!(status, 200, "{}", login);
    assert_eq!(login["user"]["id"], user["id"]);
    assert_eq!(login["expiresIn"], 3600);
    let token = login["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/projects")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "name": "web-app" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 201);
}

#[actix_rt::test]
async fn test_duplicate_email_is_conflict() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let creds = json!({ "email": "qa@example.com", "password": "hunter22" });
    let (status, _) = post_json(&app, REGISTER, creds.clone()).await;
    assert_eq!(status, 200);

    let (status, body) = post_json(&app, REGISTER, creds).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["message"], "Conflict: Email already registered");
}

#[actix_rt::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    post_json(
        &app,
        REGISTER,
        json!({ "email": "qa@example.com", "password": "hunter22" }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        LOGIN,
        json!({ "email": "qa@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert!(body.get("token").is_none());

    let (status, _) = post_json(
        &app,
        LOGIN,
        json!({ "email": "nobody@example.com", "password": "hunter22" }),
    )
    .await;
    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_missing_credentials_are_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post_json(&app, REGISTER, json!({ "email": "qa@example.com" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, _) = post_json(&app, REGISTER, json!({ "password": "hunter22" })).await;
    assert_eq!(status, 400);

    let (status, _) = post_json(&app, LOGIN, json!({})).await;
    assert_eq!(status, 400);
}
