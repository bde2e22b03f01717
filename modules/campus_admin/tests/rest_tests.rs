//! REST router tests: status codes, problem details and JSON shapes

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use campus_admin::{CampusAdminModule, Config};
use common::{print_test_header, TestStores};
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_router() -> (Router, TestStores) {
    let stores = TestStores::new();
    stores.seed_registration();
    stores.seed_duty();
    stores.seed_faculty("CNTT", "Information Technology");
    let module = CampusAdminModule::with_repositories(stores.repositories(), Config::default())
        .expect("module");
    (module.router(), stores)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn test_register_conflict_and_transfer_over_http() {
    let (router, _stores) = create_router();

    print_test_header(
        "test_register_conflict_and_transfer_over_http",
        &[
            "POST /enrollments returns 201, a second section of the course returns 409.",
            "POST /enrollments/transfer moves the member and the listing reflects it.",
        ],
    );

    let (status, body) = send(
        &router,
        "POST",
        "/enrollments",
        Some(json!({"member_id": "S001", "section_id": "LHP-A"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["course_id"], "MH-101");
    assert_eq!(body["is_active"], true);

    let (status, body) = send(
        &router,
        "POST",
        "/enrollments",
        Some(json!({"member_id": "S001", "section_id": "LHP-B"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert!(body["detail"].as_str().unwrap_or_default().contains("LHP-A"));

    let (status, body) = send(
        &router,
        "POST",
        "/enrollments/transfer",
        Some(json!({"member_id": "S001", "from_section_id": "LHP-A", "to_section_id": "LHP-B"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["section_id"], "LHP-B");

    let (status, body) = send(&router, "GET", "/members/S001/enrollments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    let active: Vec<&str> = body["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter(|e| e["is_active"] == true)
        .filter_map(|e| e["section_id"].as_str())
        .collect();
    assert_eq!(active, vec!["LHP-B"]);
}

#[tokio::test]
async fn test_problem_details_for_domain_errors() {
    let (router, _stores) = create_router();

    print_test_header(
        "test_problem_details_for_domain_errors",
        &["NotFound is 404, cross-course transfer is 422, malformed bodies are 400."],
    );

    let (status, body) = send(
        &router,
        "POST",
        "/enrollments",
        Some(json!({"member_id": "S001", "section_id": "LHP-X"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Not Found");
    assert_eq!(body["detail"], "section 'LHP-X' was not found");

    send(
        &router,
        "POST",
        "/enrollments",
        Some(json!({"member_id": "S002", "section_id": "LHP-A"})),
    )
    .await;
    let (status, _) = send(
        &router,
        "POST",
        "/enrollments/transfer",
        Some(json!({"member_id": "S002", "from_section_id": "LHP-A", "to_section_id": "LHP-C"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &router,
        "POST",
        "/enrollments",
        Some(json!({"member_id": "S001"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Malformed Request");

    let (status, _) = send(&router, "DELETE", "/enrollments/S003/LHP-A", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_problem_content_type() {
    let (router, _stores) = create_router();

    print_test_header(
        "test_problem_content_type",
        &["Error responses carry the application/problem+json media type."],
    );

    let request = Request::builder()
        .uri("/faculties/NOPE")
        .body(Body::empty())
        .expect("request");
    let response = router.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
}

#[tokio::test]
async fn test_assign_members_over_http() {
    let (router, stores) = create_router();

    print_test_header(
        "test_assign_members_over_http",
        &[
            "POST /activities/HD01/assignments assigns a batch with a role code.",
            "An unknown role code is 400; a conflicting batch is 409 and writes nothing.",
        ],
    );

    let (status, body) = send(
        &router,
        "POST",
        "/activities/HD01/assignments",
        Some(json!({"member_ids": ["BCH02"], "role": "PHU"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["role"], "PHU");

    let (status, _) = send(
        &router,
        "POST",
        "/activities/HD01/assignments",
        Some(json!({"member_ids": ["BCH01"], "role": "LEAD"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &router,
        "POST",
        "/activities/HD01/assignments",
        Some(json!({"member_ids": ["BCH01", "BCH02"], "role": "CHINH"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(stores.assignments.count(), 1);

    let (status, _) = send(&router, "DELETE", "/activities/HD01/assignments/BCH02", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&router, "GET", "/activities/HD01/assignments", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_lecturer_endpoints() {
    let (router, _stores) = create_router();

    print_test_header(
        "test_lecturer_endpoints",
        &["Create, soft delete, status filter, count and email check for lecturers."],
    );

    let (status, body) = send(
        &router,
        "POST",
        "/lecturers",
        Some(json!({
            "id": "GV01",
            "full_name": "Tran Quoc Bao",
            "email": "gv_bao@vnkgu.edu.vn",
            "faculty_id": "CNTT"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);

    let (status, body) = send(&router, "GET", "/lecturers/email-taken?email=GV_BAO@vnkgu.edu.vn", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taken"], true);

    let (status, _) = send(&router, "DELETE", "/lecturers/GV01", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&router, "GET", "/lecturers?status=inactive", None).await;
    assert_eq!(body["total"], 1);
    let (_, body) = send(&router, "GET", "/lecturers?status=active", None).await;
    assert_eq!(body["total"], 0);

    let (_, body) = send(&router, "GET", "/lecturers/count", None).await;
    assert_eq!(body, json!({"active": 0, "inactive": 1, "total": 1}));

    let (status, body) = send(&router, "POST", "/lecturers/GV01/restore", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn test_board_kind_codes_over_http() {
    let (router, _stores) = create_router();

    print_test_header(
        "test_board_kind_codes_over_http",
        &["Boards use DOAN/HOI/DOI_CLB_BAN kind codes; statistics group by code."],
    );

    let (status, _) = send(
        &router,
        "POST",
        "/boards",
        Some(json!({"id": "B1", "name": "Union Exec", "kind": "DOAN", "faculty_id": "CNTT"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &router,
        "POST",
        "/boards",
        Some(json!({"id": "B2", "name": "Club", "kind": "CLUB"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Validation Error");

    let (_, body) = send(&router, "GET", "/boards/B1", None).await;
    assert_eq!(body["faculty_name"], "Information Technology");

    let (_, body) = send(&router, "GET", "/boards/statistics", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["by_kind"]["DOAN"], 1);
}

#[tokio::test]
async fn test_email_validation_endpoint() {
    let (router, _stores) = create_router();

    print_test_header(
        "test_email_validation_endpoint",
        &["Student addresses are recognized and their digits extracted."],
    );

    let (status, body) = send(
        &router,
        "POST",
        "/email/validate",
        Some(json!({"email": "SV_12345@vnkgu.edu.vn"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["is_student_email"], true);
    assert_eq!(body["student_id"], "12345");

    let (_, body) = send(
        &router,
        "POST",
        "/email/validate",
        Some(json!({"email": "someone@gmail.com"})),
    )
    .await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["domain"], "gmail.com");
}

#[tokio::test]
async fn test_openapi_document_lists_schemas() {
    let (router, _stores) = create_router();

    print_test_header(
        "test_openapi_document_lists_schemas",
        &["GET /openapi.json serves the schema document."],
    );

    let (status, body) = send(&router, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Campus Admin API");
    assert!(body["components"]["schemas"]["Problem"].is_object());
    assert!(body["components"]["schemas"]["EnrollmentDto"].is_object());
}
