//! Project lifecycle tests.

use actix_web::test;
use serde_json::json;

use crate::test_helpers::*;

#[actix_rt::test]
async fn test_create_and_list_projects() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let first = create_project(&app, "web-app").await;
    let second = create_project(&app, "mobile").await;

    let (status, body) = get_json(&app, "/api/v1/projects").await;
    assert_eq!(status, 200);

    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&first));
    assert!(ids.contains(&second));
    assert!(body.as_array().unwrap().iter().all(|p| p["failedCount"] == 0));
}

#[actix_rt::test]
async fn test_failed_count_reflects_uploaded_results() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let project_id = create_project(&app, "web-app").await;
    let (status, _) = upload_file(&app, project_id, None, &sample_report(3, 2)).await;
    assert_eq!(status, 200);

    let (_, body) = get_json(&app, "/api/v1/projects").await;
    let project = body
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == project_id)
        .unwrap()
        .clone();
    assert_eq!(project["failedCount"], 2);
}

#[actix_rt::test]
async fn test_create_project_requires_token() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/projects")
        .set_json(json!({ "name": "web-app" }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_rt::test]
async fn test_create_project_rejects_bad_token() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/projects")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .set_json(json!({ "name": "web-app" }))
        .to_request();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_create_project_without_name_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/projects")
        .insert_header(bearer())
        .set_json(json!({ "name": "   " }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_delete_project_removes_dependents() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let doomed = create_project(&app, "doomed").await;
    let kept = create_project(&app, "kept").await;
    upload_file(&app, doomed, Some("nightly"), &sample_report(1, 1)).await;
    upload_file(&app, kept, Some("nightly"), &sample_report(2, 0)).await;

    let doomed_results = result_ids(&app, doomed).await;
    let (status, _) = post_review(
        &app,
        doomed_results[0],
        json!({ "reason": "FLAKY_TEST", "comments": "retry passed", "qaId": 1 }),
    )
    .await;
    assert_eq!(status, 200);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/projects/{}", doomed))
        .insert_header(bearer())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let (status, _) = get_json(&app, &format!("/api/v1/projects/{}/results", doomed)).await;
    assert_eq!(status, 404);
    for id in doomed_results {
        let (status, _) = get_json(&app, &format!("/api/v1/results/{}", id)).await;
        assert_eq!(status, 404);
    }

    let (_, reasons) = get_json(&app, "/api/v1/review-reasons").await;
    assert!(reasons["reasons"].as_array().unwrap().is_empty());

    assert_eq!(result_ids(&app, kept).await.len(), 2);
}

#[actix_rt::test]
async fn test_delete_missing_project_is_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/projects/999")
        .insert_header(bearer())
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_health_endpoints() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, _) = get_json(&app, "/api/v1/health").await;
    assert_eq!(status, 200);

    let (status, _) = get_json(&app, "/api/v1/ready").await;
    assert_eq!(status, 200);
}
