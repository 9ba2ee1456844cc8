use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDateTime;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use school_ops_backend::{
    app::create_router,
    app_state::AppState,
    clock::FixedClock,
    db::models::{School, Session, User, UserRole},
    db::repositories::{SchoolRepository, UserRepository},
    db::InMemoryDocumentStore,
    policy::DeadlinePolicy,
};

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

struct TestApp {
    router: Router,
    clock: Arc<FixedClock>,
    school: School,
}

async fn seed_user(
    store: &InMemoryDocumentStore,
    token: &str,
    name: &str,
    role: UserRole,
    school_id: Option<Uuid>,
) -> User {
    let user = User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{token}@school.test"),
        role,
        school_id,
        created_at: ts("2025-01-01T08:00:00"),
    };
    UserRepository::create_user(store, &user).await.unwrap();
    UserRepository::create_session(
        store,
        &Session {
            id: Uuid::new_v4(),
            token: token.to_string(),
            user_id: user.id,
            expires_at: None,
        },
    )
    .await
    .unwrap();
    user
}

async fn spawn_app(now: &str) -> TestApp {
    let store = InMemoryDocumentStore::new();
    let school = School {
        id: Uuid::new_v4(),
        name: "Green Valley School".to_string(),
        city: None,
        created_at: ts("2025-01-01T08:00:00"),
    };
    SchoolRepository::create_school(&store, &school).await.unwrap();

    seed_user(&store, "admin", "Asha Menon", UserRole::Admin, None).await;
    seed_user(&store, "trainer", "Priya Raman", UserRole::TrainerRobochamps, Some(school.id)).await;
    seed_user(&store, "teacher", "Ravi Kulkarni", UserRole::Teacher, Some(school.id)).await;

    let clock = Arc::new(FixedClock::new(ts(now)));
    let state = AppState::new(Arc::new(store), clock.clone(), DeadlinePolicy::default());
    TestApp {
        router: create_router(state),
        clock,
        school,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}

#[tokio::test]
async fn health_reports_store_status() {
    let app = spawn_app("2025-04-06T00:00:00").await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"]["store"], "healthy");
}

#[tokio::test]
async fn late_upload_workflow_over_http() {
    let app = spawn_app("2025-04-06T00:00:00").await;
    let create = json!({
        "month": "2025-03",
        "year": 2025,
        "reason": "Was on sick leave all week"
    });

    let (status, body) = app
        .send(Method::POST, "/api/late-upload-requests", None, Some(create.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .send(Method::POST, "/api/late-upload-requests", Some("trainer"), Some(create.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["request"]["status"], "PENDING");
    assert_eq!(body["request"]["school_name"], "Green Valley School");
    let id = body["request"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(Method::POST, "/api/late-upload-requests", Some("trainer"), Some(create.clone()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_PENDING");

    // Sheet upload is refused until the request is approved.
    let sheet = json!({
        "month": "2025-03",
        "year": 2025,
        "file_url": "https://files.test/2025-03.pdf",
        "file_name": "2025-03.pdf",
        "file_size": 48213
    });
    let (status, body) = app
        .send(Method::POST, "/api/uploaded-sheets", Some("trainer"), Some(sheet.clone()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DEADLINE_PASSED");

    let decide_uri = format!("/api/late-upload-requests/{id}");
    let approve = json!({ "status": "APPROVED" });
    let (status, _) = app
        .send(Method::PATCH, &decide_uri, Some("trainer"), Some(approve.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.clock.set(ts("2025-04-07T10:15:00"));
    let (status, body) = app
        .send(Method::PATCH, &decide_uri, Some("admin"), Some(approve.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request"]["status"], "APPROVED");
    assert_eq!(body["request"]["decided_by_name"], "Asha Menon");
    assert_eq!(body["request"]["decided_at"], "2025-04-07T10:15:00");

    let (status, body) = app
        .send(Method::PATCH, &decide_uri, Some("admin"), Some(json!({ "status": "REJECTED" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_DECIDED");

    let (status, body) = app
        .send(Method::POST, "/api/late-upload-requests", Some("trainer"), Some(create))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_APPROVED");

    let (status, body) = app
        .send(Method::POST, "/api/uploaded-sheets", Some("trainer"), Some(sheet))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sheet"]["late_request_id"], id.as_str());

    let (status, body) = app
        .send(Method::GET, "/api/uploaded-sheets/status?month=2025-03", Some("trainer"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"]["window_open"], false);
    assert_eq!(body["status"]["can_upload"], true);
    assert_eq!(body["status"]["late_request_status"], "APPROVED");

    let (status, _) = app
        .send(Method::GET, "/api/late-upload-requests", Some("teacher"), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::GET, "/api/late-upload-requests?status=APPROVED", Some("admin"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requests"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn before_deadline_and_validation_errors() {
    let app = spawn_app("2025-04-05T12:00:00").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/late-upload-requests",
            Some("trainer"),
            Some(json!({
                "month": "2025-03",
                "year": 2025,
                "reason": "Was on sick leave all week"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BEFORE_DEADLINE");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/late-upload-requests",
            Some("trainer"),
            Some(json!({ "month": "March", "year": 2025, "reason": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["month"].is_array());
    assert!(body["fields"]["reason"].is_array());

    let (status, body) = app
        .send(Method::GET, "/api/late-upload-requests", Some("nobody"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired session");
}

#[tokio::test]
async fn combined_view_merges_attendance_and_reports() {
    let app = spawn_app("2025-04-06T09:00:00").await;
    let mark = json!({
        "class_label": "Grade 6A",
        "photo_url": "https://files.test/photo.jpg",
        "latitude": 18.52,
        "longitude": 73.85,
        "accuracy": 15.0
    });

    let (status, _) = app
        .send(Method::POST, "/api/attendance", Some("trainer"), Some(mark.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    app.clock.set(ts("2025-04-06T09:05:00"));
    let (status, _) = app
        .send(Method::POST, "/api/attendance", Some("trainer"), Some(mark))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    app.clock.set(ts("2025-04-06T09:10:00"));
    let (status, _) = app
        .send(
            Method::POST,
            "/api/daily-reports",
            Some("trainer"),
            Some(json!({
                "report_type": "TRAINER_CLASS",
                "class_label": "Grade 6A",
                "topics": "Gear ratios",
                "summary": "Built a two-stage gearbox"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = "/api/combined-records?start_date=2025-04-06&end_date=2025-04-06&trainer_name=priya";
    let (status, body) = app.send(Method::GET, uri, Some("admin"), None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["attendance"]["timestamp"], "2025-04-06T09:00:00");
    assert_eq!(records[0]["reports"].as_array().unwrap().len(), 1);
    assert_eq!(records[0]["trainer_name"], "Priya Raman");
    assert_eq!(records[0]["school_id"], app.school.id.to_string());

    let (status, again) = app.send(Method::GET, uri, Some("admin"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again, body);

    let (status, body) = app
        .send(Method::GET, "/api/combined-records", Some("teacher"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let app = spawn_app("2025-04-06T00:00:00").await;

    // `year` is missing from the body.
    let (status, body) = app
        .send(
            Method::POST,
            "/api/late-upload-requests",
            Some("trainer"),
            Some(json!({ "month": "2025-03", "reason": "Was on sick leave all week" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["fields"]["body"][0].as_str().unwrap().contains("year"));

    let (status, body) = app
        .send(
            Method::GET,
            "/api/combined-records?start_date=2025-13-01",
            Some("admin"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["fields"]["query"].is_array());

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/late-upload-requests/not-a-uuid",
            Some("admin"),
            Some(json!({ "status": "APPROVED" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["fields"]["path"].is_array());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/late-upload-requests")
        .header(header::AUTHORIZATION, "Bearer trainer")
        .body(Body::from("month=2025-03"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn validation_reports_every_failing_field() {
    let app = spawn_app("2025-04-06T00:00:00").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/late-upload-requests",
            Some("trainer"),
            Some(json!({ "month": "2025-03", "year": 2024, "reason": "short" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["reason"].is_array());
    assert!(body["fields"]["year"].is_array());
}
