//! Review ledger tests.

use std::time::Duration;

use actix_web::test;
use serde_json::json;

use crate::test_helpers::*;

async fn first_failed_result<S>(app: &S) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let project_id = create_project(app, "web-app").await;
    upload_file(app, project_id, None, &sample_report(1, 1)).await;

    let uri = format!("/api/v1/projects/{}/results?status=failed", project_id);
    let (_, body) = get_json(app, &uri).await;
    body[0]["id"].as_i64().unwrap()
}

#[actix_rt::test]
async fn test_review_upsert_keeps_one_row_per_result() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let result_id = first_failed_result(&app).await;

    let (status, first) = post_review(
        &app,
        result_id,
        json!({ "reason": "FLAKY_TEST", "comments": "passed on retry", "qaId": 7 }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(first["reason"], "FLAKY_TEST");

    actix_rt::time::sleep(Duration::from_millis(20)).await;

    let (status, second) = post_review(&app, result_id, json!({ "reason": "ENV_ISSUE", "qaId": 1 })).await;
    assert_eq!(status, 200);
    assert_eq!(second["reason"], "ENV_ISSUE");
    assert_eq!(second["id"], first["id"]);

    let first_at = chrono::DateTime::parse_from_rfc3339(first["reviewedAt"].as_str().unwrap())
        .unwrap();
    let second_at = chrono::DateTime::parse_from_rfc3339(second["reviewedAt"].as_str().unwrap())
        .unwrap();
    assert!(second_at > first_at);

    let (_, reasons) = get_json(&app, "/api/v1/review-reasons").await;
    assert_eq!(reasons["reasons"], json!([{ "reason": "ENV_ISSUE", "count": 1 }]));

    let (_, detail) = get_json(&app, &format!("/api/v1/results/{}", result_id)).await;
    assert_eq!(detail["review"]["reason"], "ENV_ISSUE");
}

#[actix_rt::test]
async fn test_unknown_reason_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let result_id = first_failed_result(&app).await;

    let (status, body) = post_review(&app, result_id, json!({ "reason": "BAD_LUCK", "qaId": 1 })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (_, detail) = get_json(&app, &format!("/api/v1/results/{}", result_id)).await;
    assert!(detail["review"].is_null());
}

#[actix_rt::test]
async fn test_review_without_reviewer_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let result_id = first_failed_result(&app).await;

    let (status, body) = post_review(&app, result_id, json!({ "reason": "OTHER" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_review_for_missing_result_is_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = post_review(&app, 31337, json!({ "reason": "OTHER", "qaId": 1 })).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_review_requires_token() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let result_id = first_failed_result(&app).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/results/{}/review", result_id))
        .set_json(json!({ "reason": "OTHER", "qaId": 1 }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 401);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/results/{}/review", result_id))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_get_review_returns_stored_review() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let result_id = first_failed_result(&app).await;

    post_review(
        &app,
        result_id,
        json!({ "reason": "DATA_ISSUE", "comments": "  seed data missing  ", "qaId": 1 }),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/results/{}/review", result_id))
        .insert_header(bearer())
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 200);
    assert_eq!(body["reason"], "DATA_ISSUE");
    assert_eq!(body["comments"], "seed data missing");
}

#[actix_rt::test]
async fn test_reviewed_flag_in_result_listing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;
    upload_file(&app, project_id, None, &sample_report(2, 1)).await;

    let ids = result_ids(&app, project_id).await;
    post_review(&app, ids[0], json!({ "reason": "NEW_REQUIREMENT", "qaId": 1 })).await;

    let (_, body) = get_json(&app, &format!("/api/v1/projects/{}/results", project_id)).await;
    for item in body.as_array().unwrap() {
        let expected = item["id"].as_i64() == Some(ids[0]);
        assert_eq!(item["reviewed"], expected);
    }
}
