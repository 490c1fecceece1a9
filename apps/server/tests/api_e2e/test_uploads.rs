//! Report ingestion tests: append mode, replace mode, and file listing.

use actix_web::test;
use serde_json::json;

use crate::test_helpers::*;

#[actix_rt::test]
async fn test_each_upload_creates_its_own_report_file() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    let (status, first) = upload_file(&app, project_id, Some("run-1"), &sample_report(2, 1)).await;
    assert_eq!(status, 200);
    assert_eq!(first["success"], true);
    assert_eq!(first["inserted"], 3);

    let (status, second) = upload_file(&app, project_id, Some("run-2"), &sample_report(1, 1)).await;
    assert_eq!(status, 200);
    assert_ne!(first["reportFileId"], second["reportFileId"]);

    let (status, page) =
        get_json(&app, &format!("/api/v1/projects/{}/report-files", project_id)).await;
    assert_eq!(status, 200);
    assert_eq!(page["total"], 2);

    assert_eq!(result_ids(&app, project_id).await.len(), 5);

    let uri = format!(
        "/api/v1/projects/{}/results?reportFileId={}",
        project_id, second["reportFileId"]
    );
    let (_, scoped) = get_json(&app, &uri).await;
    assert_eq!(scoped.as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_upload_to_missing_project_is_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = upload_file(&app, 4242, None, &sample_report(1, 0)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_malformed_upload_inserts_nothing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    let (status, body) = upload_raw_file(&app, project_id, Some("broken"), b"{\"suites\": [").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "MALFORMED_INPUT");

    let (_, page) = get_json(&app, &format!("/api/v1/projects/{}/report-files", project_id)).await;
    assert_eq!(page["total"], 0);
    assert!(result_ids(&app, project_id).await.is_empty());
}

#[actix_rt::test]
async fn test_upload_requires_token() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/projects/{}/results/upload", project_id))
        .set_json(sample_report(1, 0))
        .to_request();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, 401);
    assert!(result_ids(&app, project_id).await.is_empty());
}

#[actix_rt::test]
async fn test_replace_mode_drops_prior_results_and_reviews() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    upload_file(&app, project_id, Some("old"), &sample_report(1, 2)).await;
    let old_ids = result_ids(&app, project_id).await;
    let (status, _) = post_review(&app, old_ids[0], json!({ "reason": "ENV_ISSUE", "qaId": 1 })).await;
    assert_eq!(status, 200);

    let (status, body) = replace_results(&app, project_id, &sample_report(4, 0)).await;
    assert_eq!(status, 200);
    assert_eq!(body["inserted"], 4);

    let new_ids = result_ids(&app, project_id).await;
    assert_eq!(new_ids.len(), 4);
    assert!(old_ids.iter().all(|id| !new_ids.contains(id)));

    let (_, reasons) = get_json(&app, "/api/v1/review-reasons").await;
    assert!(reasons["reasons"].as_array().unwrap().is_empty());

    let (_, results) = get_json(&app, &format!("/api/v1/projects/{}/results", project_id)).await;
    assert!(results
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["reviewed"] == false && r["status"] == "passed"));
}

#[actix_rt::test]
async fn test_replace_with_malformed_body_keeps_existing_results() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    upload_file(&app, project_id, None, &sample_report(2, 0)).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/projects/{}/results/upload", project_id))
        .insert_header(bearer())
        .insert_header(("Content-Type", "application/json"))
        .set_payload("not json at all")
        .to_request();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, 400);
    assert_eq!(result_ids(&app, project_id).await.len(), 2);
}

#[actix_rt::test]
async fn test_report_file_name_filter_is_case_insensitive_substring() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    for name in ["dawdawdawd", "fsefsefsefsefsefs", "dawdawdaw", "dadwadawd"] {
        let (status, _) = upload_file(&app, project_id, Some(name), &sample_report(1, 0)).await;
        assert_eq!(status, 200);
    }

    let base = format!("/api/v1/projects/{}/report-files", project_id);

    let (status, page) = get_json(&app, &format!("{}?name=d", base)).await;
    assert_eq!(status, 200);
    assert_eq!(page["total"], 3);
    let names: Vec<&str> = page["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert!(!names.contains(&"fsefsefsefsefsefs"));

    let (_, page) = get_json(&app, &format!("{}?name=DAWDAW", base)).await;
    assert_eq!(page["total"], 2);

    let (_, page) = get_json(&app, &format!("{}?name=zzz", base)).await;
    assert_eq!(page["total"], 0);
    assert!(page["files"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_report_file_listing_paginates_newest_first() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    for i in 0..3 {
        upload_file(&app, project_id, Some(&format!("run-{}", i)), &sample_report(1, 0)).await;
    }

    let uri = format!(
        "/api/v1/projects/{}/report-files?page=1&pageSize=2",
        project_id
    );
    let (_, first) = get_json(&app, &uri).await;
    assert_eq!(first["total"], 3);
    assert_eq!(first["pageSize"], 2);
    assert_eq!(first["files"].as_array().unwrap().len(), 2);
    assert_eq!(first["files"][0]["name"], "run-2");

    let uri = format!(
        "/api/v1/projects/{}/report-files?page=2&pageSize=2",
        project_id
    );
    let (_, second) = get_json(&app, &uri).await;
    assert_eq!(second["files"].as_array().unwrap().len(), 1);
    assert_eq!(second["files"][0]["name"], "run-0");
}

#[actix_rt::test]
async fn test_report_file_listing_rejects_bad_date() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    let uri = format!(
        "/api/v1/projects/{}/report-files?dateFrom=not-a-date",
        project_id
    );
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_report_file_name_filter_matches_wildcards_literally() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    for name in ["nightly_run", "nightlyXrun", "plain", "100% green"] {
        let (status, _) = upload_file(&app, project_id, Some(name), &sample_report(1, 0)).await;
        assert_eq!(status, 200);
    }

    let base = format!("/api/v1/projects/{}/report-files", project_id);

    let (status, page) = get_json(&app, &format!("{}?name=_", base)).await;
    assert_eq!(status, 200);
    assert_eq!(page["total"], 1);
    assert_eq!(page["files"][0]["name"], "nightly_run");

    let (_, page) = get_json(&app, &format!("{}?name=%25", base)).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["files"][0]["name"], "100% green");

    let (_, page) = get_json(&app, &format!("{}?name=y_R", base)).await;
    assert_eq!(page["total"], 1);

    let (_, page) = get_json(&app, &format!("{}?name=%5C", base)).await;
    assert_eq!(page["total"], 0);
}

#[actix_rt::test]
async fn test_report_file_name_filter_keeps_non_ascii_term_as_typed() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;

    upload_file(&app, project_id, Some("Übergabe-Lauf"), &sample_report(1, 0)).await;
    upload_file(&app, project_id, Some("checkout"), &sample_report(1, 0)).await;

    let base = format!("/api/v1/projects/{}/report-files", project_id);

    let (_, page) = get_json(&app, &format!("{}?name=%C3%9Cber", base)).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["files"][0]["name"], "Übergabe-Lauf");

    // ASCII letters still fold on both sides
    let (_, page) = get_json(&app, &format!("{}?name=%C3%9CBERGABE-lauf", base)).await;
    assert_eq!(page["total"], 1);
}

#[actix_rt::test]
async fn test_report_file_listing_date_window() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;
    upload_file(&app, project_id, Some("today"), &sample_report(1, 0)).await;

    let today = chrono::Utc::now().date_naive();
    let yesterday = today.pred_opt().unwrap();
    let tomorrow = today.succ_opt().unwrap();
    let base = format!("/api/v1/projects/{}/report-files", project_id);

    let (status, page) = get_json(
        &app,
        &format!("{}?dateFrom={}&dateTo={}", base, yesterday, tomorrow),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(page["total"], 1);

    // A date-only upper bound covers the whole day
    let (_, page) = get_json(&app, &format!("{}?dateFrom={}&dateTo={}", base, today, today)).await;
    assert_eq!(page["total"], 1);

    let (_, page) = get_json(&app, &format!("{}?dateTo=2000-01-01", base)).await;
    assert_eq!(page["total"], 0);

    let (_, page) = get_json(
        &app,
        &format!("{}?dateFrom={}", base, tomorrow.succ_opt().unwrap()),
    )
    .await;
    assert_eq!(page["total"], 0);
}

#[actix_rt::test]
async fn test_non_json_upload_is_refused_and_keeps_results() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;
    upload_file(&app, project_id, Some("kept"), &sample_report(2, 1)).await;

    let report = serde_json::to_vec(&sample_report(1, 0)).unwrap();

    let (status, body) =
        upload_with_content_type(&app, project_id, Some("text/plain"), report.clone()).await;
    assert_eq!(status, 415);
    assert_eq!(body["error"], "UNSUPPORTED_MEDIA_TYPE");

    let (status, _) = upload_with_content_type(&app, project_id, None, report.clone()).await;
    assert_eq!(status, 415);

    let (status, _) = upload_with_content_type(
        &app,
        project_id,
        Some("application/x-www-form-urlencoded"),
        report,
    )
    .await;
    assert_eq!(status, 415);

    assert_eq!(result_ids(&app, project_id).await.len(), 3);
}

#[actix_rt::test]
async fn test_json_upload_with_charset_replaces() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "web-app").await;
    upload_file(&app, project_id, None, &sample_report(2, 1)).await;

    let report = serde_json::to_vec(&sample_report(1, 0)).unwrap();
    let (status, body) = upload_with_content_type(
        &app,
        project_id,
        Some("application/json; charset=utf-8"),
        report,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["inserted"], 1);
    assert_eq!(result_ids(&app, project_id).await.len(), 1);
}

#[actix_rt::test]
async fn test_oversized_upload_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app_with_limit(&pool, 512).await;
    let project_id = create_project(&app, "web-app").await;

    let big = serde_json::to_vec(&sample_report(20, 0)).unwrap();
    assert!(big.len() > 512);

    let (status, body) =
        upload_with_content_type(&app, project_id, Some("application/json"), big.clone()).await;
    assert_eq!(status, 413);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");

    let (status, body) = upload_raw_file(&app, project_id, Some("big"), &big).await;
    assert_eq!(status, 413);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");

    let (_, page) = get_json(&app, &format!("/api/v1/projects/{}/report-files", project_id)).await;
    assert_eq!(page["total"], 0);
    assert!(result_ids(&app, project_id).await.is_empty());
}
