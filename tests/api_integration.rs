//! End-to-end tests for the HTTP surface.
//!
//! The router runs against in-memory repositories, the mock scoring service,
//! and a token table standing in for JWT validation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use symptoscore::adapters::auth::MockSessionValidator;
use symptoscore::adapters::http::{app_router, AppState};
use symptoscore::adapters::memory::{InMemoryProfileReader, InMemoryReportRepository};
use symptoscore::adapters::scoring::MockScoringService;
use symptoscore::domain::foundation::UserId;
use symptoscore::domain::questionnaire::{QuestionCatalog, QuestionKind};
use symptoscore::ports::{Profile, ScoringError};

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";

struct TestApp {
    router: Router,
    scoring: MockScoringService,
    reports: Arc<InMemoryReportRepository>,
    profiles: Arc<InMemoryProfileReader>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_scoring(MockScoringService::new())
    }

    fn with_scoring(scoring: MockScoringService) -> Self {
        let reports = Arc::new(InMemoryReportRepository::new());
        let profiles = Arc::new(InMemoryProfileReader::new());
        let validator = MockSessionValidator::new()
            .with_test_user(ALICE, "alice")
            .with_test_user(BOB, "bob");

        let state = AppState {
            catalog: QuestionCatalog::standard(),
            scoring: Arc::new(scoring.clone()),
            reports: reports.clone(),
            profiles: profiles.clone(),
            validator: Arc::new(validator),
        };

        Self {
            router: app_router(state),
            scoring,
            reports,
            profiles,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
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
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    async fn submit(&self, token: Option<&str>, answers: Value) -> (StatusCode, Value) {
        self.send(Method::POST, "/api/assessments", token, Some(answers))
            .await
    }
}

/// A valid answer for every catalog question.
fn complete_answers() -> Value {
    let catalog = QuestionCatalog::standard();
    let mut answers = serde_json::Map::new();
    for q in catalog.iter() {
        let value = match &q.kind {
            QuestionKind::Numeric { min, max } => json!((min + max) / 2),
            QuestionKind::Choice { options } => json!(options[0]),
        };
        answers.insert(q.id.clone(), value);
    }
    Value::Object(answers)
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog and health
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn questions_are_listed_in_catalog_order() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 24);
    assert_eq!(body["questions"][0]["id"], "age");
    assert_eq!(body["questions"][0]["kind"], "numeric");
    assert_eq!(body["questions"][1]["id"], "Alcohol");
}

// ────────────────────────────────────────────────────────────────────────────
// Submission
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn anonymous_submission_is_refused_before_scoring() {
    let app = TestApp::new();
    let (status, body) = app.submit(None, complete_answers()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
    assert_eq!(app.scoring.call_count(), 0);
    assert!(app.reports.is_empty());
}

#[tokio::test]
async fn submission_scores_in_catalog_order_and_stores_one_record() {
    let app = TestApp::new();
    let (status, body) = app.submit(Some(ALICE), complete_answers()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["recordId"].is_string());
    assert_eq!(body["conditions"][0]["condition"], "Diabetes");
    assert_eq!(body["conditions"][0]["displayName"], "Diabetes");
    assert_eq!(body["conditions"][0]["riskPercent"], 0.0);
    assert_eq!(body["conditions"][0]["reduced"][0]["factor"], "PhysicalActivity");
    assert!(body["conditions"][0].get("risk_percent").is_none());
    assert_eq!(body["narrativeSummary"], "No significant risks detected.");
    assert_eq!(app.reports.len(), 1);

    let calls = app.scoring.calls();
    assert_eq!(calls.len(), 1);
    let sent: Vec<&str> = calls[0].keys().collect();
    let catalog = QuestionCatalog::standard();
    let expected: Vec<&str> = catalog.ids().collect();
    assert_eq!(sent, expected);
}

#[tokio::test]
async fn missing_answers_are_a_bad_request() {
    let app = TestApp::new();
    let mut answers = complete_answers();
    answers.as_object_mut().unwrap().remove("Smoking");

    let (status, body) = app.submit(Some(ALICE), answers).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Smoking"));
    assert_eq!(app.scoring.call_count(), 0);
}

#[tokio::test]
async fn out_of_range_answer_is_a_bad_request() {
    let app = TestApp::new();
    let mut answers = complete_answers();
    answers["age"] = json!(7);

    let (status, body) = app.submit(Some(ALICE), answers).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "age");
}

#[tokio::test]
async fn scoring_failure_is_bad_gateway_and_stores_nothing() {
    let app = TestApp::with_scoring(MockScoringService::new().with_error(ScoringError::Status {
        status: 503,
        body: "model warming up".into(),
    }));

    let (status, body) = app.submit(Some(ALICE), complete_answers()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "SCORING_SERVICE_ERROR");
    assert!(app.reports.is_empty());
}

// ────────────────────────────────────────────────────────────────────────────
// Reports
// ────────────────────────────────────────────────────────────────────────────

async fn submitted_record(app: &TestApp, token: &str) -> String {
    let (_, body) = app.submit(Some(token), complete_answers()).await;
    body["recordId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn report_detail_defaults_to_first_condition() {
    let app = TestApp::new();
    let id = submitted_record(&app, ALICE).await;

    let (status, body) = app.get(&format!("/api/reports/{}", id), Some(ALICE)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activeCondition"], "Diabetes");
    assert_eq!(body["active"]["band"], "Low");
    assert_eq!(body["active"]["reduced"][0]["factor"], "PhysicalActivity");
    assert_eq!(body["conditions"].as_array().unwrap().len(), 2);
    assert_eq!(body["answers"]["age"], complete_answers()["age"]);
}

#[tokio::test]
async fn report_detail_selects_requested_condition() {
    let app = TestApp::new();
    let id = submitted_record(&app, ALICE).await;

    let (status, body) = app
        .get(&format!("/api/reports/{}?condition=HeartDisease", id), Some(ALICE))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"]["displayName"], "Heart Disease");

    let (status, body) = app
        .get(&format!("/api/reports/{}?condition=Gout", id), Some(ALICE))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CONDITION_NOT_FOUND");
}

#[tokio::test]
async fn another_users_record_is_forbidden() {
    let app = TestApp::new();
    let id = submitted_record(&app, ALICE).await;

    let (status, _) = app.get(&format!("/api/reports/{}", id), Some(BOB)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_record_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app
        .get(&format!("/api/reports/{}", uuid::Uuid::new_v4()), Some(ALICE))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RECORD_NOT_FOUND");
}

#[tokio::test]
async fn report_routes_require_a_session() {
    let app = TestApp::new();
    let (status, _) = app.get("/api/reports", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/reports", Some("forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn history_lists_only_the_callers_records() {
    let app = TestApp::new();
    submitted_record(&app, ALICE).await;
    submitted_record(&app, ALICE).await;
    submitted_record(&app, BOB).await;

    let (status, body) = app.get("/api/reports", Some(ALICE)).await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["wellnessScore"], 100);
    assert_eq!(entries[0]["conditionCount"], 2);
}

#[tokio::test]
async fn trend_needs_two_records() {
    let app = TestApp::new();
    submitted_record(&app, ALICE).await;

    let (status, body) = app.get("/api/reports/trend", Some(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "insufficient_history");
    assert_eq!(body["available"], 1);

    submitted_record(&app, ALICE).await;
    let (_, body) = app.get("/api/reports/trend", Some(ALICE)).await;
    assert_eq!(body["status"], "computed");
    assert_eq!(body["series"].as_array().unwrap().len(), 2);
    assert_eq!(body["delta"], 0);
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn profile_overview_merges_profile_and_history() {
    let app = TestApp::new();
    app.profiles.upsert(
        UserId::new("alice").unwrap(),
        Profile {
            name: Some("Alice".into()),
            age: Some(34),
            gender: None,
        },
    );
    let id = submitted_record(&app, ALICE).await;

    let (status, body) = app.get("/api/profile", Some(ALICE)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["name"], "Alice");
    assert_eq!(body["reportCount"], 1);
    assert_eq!(body["latestRecordId"], id);
    assert_eq!(body["trend"]["status"], "insufficient_history");
}

#[tokio::test]
async fn profile_overview_without_profile() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/profile", Some(BOB)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["profile"].is_null());
    assert_eq!(body["reportCount"], 0);
}
