//! API Integration Tests
//!
//! Tests in the first half run against a server without storage and always
//! run. The storage-backed half requires a PostgreSQL instance:
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready_without_storage() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "unavailable");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/members").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Reads Without Storage
// ============================================================================

#[tokio::test]
async fn test_list_without_storage_is_empty() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/members?yearOfAdmission=2023").await.unwrap();
    let members: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(members.is_empty());
}

#[tokio::test]
async fn test_get_without_storage_is_null() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/members/1").await.unwrap();
    let member: Option<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(member.is_none());
}

#[tokio::test]
async fn test_filter_options_without_storage_are_empty() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/members/filter-options").await.unwrap();
    let options: FilterOptionsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(options.years.is_empty());
    assert!(options.degrees.is_empty());
    assert!(options.cities.is_empty());
}

#[tokio::test]
async fn test_invalid_token_can_still_read() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/api/v1/members", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_get_by_id_is_public() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/api/v1/members/7", "not-a-jwt").await.unwrap();
    let member: Option<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(member.is_none());

    let response = server.get_auth("/api/v1/members/abc", "not-a-jwt").await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_me_without_session_is_null() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/auth/me").await.unwrap();
    let me: Option<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(me.is_none());
}

#[tokio::test]
async fn test_malformed_query_is_validation_error() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/members?yearOfAdmission=abc").await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.kind, "VALIDATION_ERROR");
    assert_eq!(err.error.code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_malformed_id_is_validation_error() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/members/abc").await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.kind, "VALIDATION_ERROR");
}

// ============================================================================
// Authorization Before Validation
// ============================================================================

#[tokio::test]
async fn test_anonymous_create_is_forbidden() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/members", &CreateMemberRequest::unique())
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err.error.kind, "FORBIDDEN");
    assert_eq!(err.error.message, "Admin access required");
}

#[tokio::test]
async fn test_anonymous_create_with_invalid_payload_is_forbidden() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/members", &json!({ "name": "", "yearOfAdmission": 1800 }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_raw("/api/v1/members", None, "{not json")
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_unregistered_session_cannot_mutate() {
    let server = TestServer::start().await.unwrap();
    let token = server.unregistered_token().unwrap();

    let response = server
        .patch_auth("/api/v1/members/1", &token, &json!({ "data": { "city": "Karachi" } }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth("/api/v1/members/abc", &token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_anonymous_delete_is_forbidden() {
    let server = TestServer::start().await.unwrap();
    let response = server.delete("/api/v1/members/1").await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err.error.code, "FORBIDDEN");
}

// ============================================================================
// Storage-Backed Tests
// ============================================================================

async fn create_member(server: &TestServer, token: &str, request: &CreateMemberRequest) -> MemberResponse {
    let response = server.post_auth("/api/v1/members", token, request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_health_ready_with_storage() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_me_reports_roles() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();

    let admin = server.admin_token().await.unwrap();
    let response = server.get_auth("/api/v1/auth/me", &admin).await.unwrap();
    let me: Option<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.unwrap().role, "admin");

    let user = server.user_token().await.unwrap();
    let response = server.get_auth("/api/v1/auth/me", &user).await.unwrap();
    let me: Option<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.unwrap().role, "user");
}

#[tokio::test]
async fn test_create_and_get_member() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let request = CreateMemberRequest::unique();

    let created = create_member(&server, &token, &request).await;
    assert!(created.id > 0);
    assert_eq!(created.roll_number, request.roll_number);
    assert!(created.is_verified);

    let response = server.get(&format!("/api/v1/members/{}", created.id)).await.unwrap();
    let fetched: Option<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let fetched = fetched.expect("member should exist");
    assert_eq!(fetched.name, request.name);
    assert_eq!(fetched.email, request.email);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_non_admin_create_is_forbidden() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();
    let token = server.user_token().await.unwrap();

    let response = server
        .post_auth("/api/v1/members", &token, &CreateMemberRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_invalid_payload_is_validation_error() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();
    let token = server.admin_token().await.unwrap();

    let mut request = CreateMemberRequest::unique();
    request.name = "   ".to_string();
    request.year_of_admission = 1800;

    let response = server.post_auth("/api/v1/members", &token, &request).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.kind, "VALIDATION_ERROR");
    let details = err.error.details.expect("field details");
    assert!(details.get("name").is_some());
    assert!(details.get("year_of_admission").is_some() || details.get("yearOfAdmission").is_some());

    let response = server
        .post_raw("/api/v1/members", Some(&token), "{not json")
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "INVALID_BODY");
}

#[tokio::test]
async fn test_duplicate_roll_number() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let request = CreateMemberRequest::unique();

    create_member(&server, &token, &request).await;

    let mut again = CreateMemberRequest::unique();
    again.roll_number = request.roll_number.clone();
    let response = server.post_auth("/api/v1/members", &token, &again).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.kind, "VALIDATION_ERROR");
    assert_eq!(err.error.code, "ROLL_NUMBER_TAKEN");
}

#[tokio::test]
async fn test_list_filters_and_order() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let city = format!("Testville{}", run_tag());

    let a = create_member(
        &server,
        &token,
        &CreateMemberRequest::unique().in_city(&city).admitted(2023, "BS"),
    )
    .await;
    let b = create_member(
        &server,
        &token,
        &CreateMemberRequest::unique().in_city(&city).admitted(2023, "MS"),
    )
    .await;
    let c = create_member(
        &server,
        &token,
        &CreateMemberRequest::unique().in_city(&city).admitted(2022, "BS"),
    )
    .await;

    let response = server
        .get(&format!(
            "/api/v1/members?city={city}&yearOfAdmission=2023&degreeProgram=BS"
        ))
        .await
        .unwrap();
    let found: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a.id]);

    // City matches are case-insensitive; newest first
    let response = server
        .get(&format!("/api/v1/members?city={}", city.to_uppercase()))
        .await
        .unwrap();
    let found: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        found.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![c.id, b.id, a.id]
    );

    let response = server.get("/api/v1/members/filter-options").await.unwrap();
    let options: FilterOptionsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(options.cities.contains(&city));
    assert!(options.years.contains(&2023));
    assert!(options.years.windows(2).all(|w| w[0] > w[1]));
}

#[tokio::test]
async fn test_update_member() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let mut request = CreateMemberRequest::unique();
    request.phone = Some("0300-0000000".to_string());
    let created = create_member(&server, &token, &request).await;

    let body = json!({ "data": { "city": "Karachi", "phone": null } });
    let response = server
        .patch_auth(&format!("/api/v1/members/{}", created.id), &token, &body)
        .await
        .unwrap();
    let updated: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.city, "Karachi");
    assert!(updated.phone.is_none());
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.roll_number, created.roll_number);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn test_update_missing_member() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();
    let token = server.admin_token().await.unwrap();

    let response = server
        .patch_auth("/api/v1/members/2147483647", &token, &json!({ "data": { "city": "Quetta" } }))
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(err.error.kind, "NOT_FOUND");
    assert_eq!(err.error.code, "UNKNOWN_MEMBER");
}

#[tokio::test]
async fn test_delete_member() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_with_database().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let created = create_member(&server, &token, &CreateMemberRequest::unique()).await;
    let path = format!("/api/v1/members/{}", created.id);

    let response = server.delete_auth(&path, &token).await.unwrap();
    let deleted: SuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(deleted.success);

    let response = server.get(&path).await.unwrap();
    let fetched: Option<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(fetched.is_none());

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
