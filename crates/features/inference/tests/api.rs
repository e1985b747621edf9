//! End-to-end tests of the prediction route and the invocation binding,
//! exercised against a fake model behind the real artifact bundle.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fxhash::FxHashMap;
use homeval_artifacts::{ArtifactBundle, ColumnSchema, LinearModel, LocationEncoding};
use homeval_audit::AuditLog;
use homeval_domain::config::{ApiConfig, ValidationPolicy};
use homeval_inference::{PredictResponse, inference_router};
use homeval_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

fn test_bundle() -> ArtifactBundle {
    let columns = ColumnSchema::new(
        [
            "total_sqft",
            "bath",
            "balcony",
            "BHK",
            "location_encoded",
            "area_type_Plot  Area",
            "area_type_Super built-up  Area",
        ]
        .map(ToOwned::to_owned)
        .to_vec(),
    );
    let model = LinearModel::new(10.0, vec![0.05, 1.0, 0.5, 2.0, 0.5, 4.0, 3.0]);
    let mut values = FxHashMap::default();
    values.insert("Whitefield".to_owned(), 84.2);
    values.insert("other".to_owned(), 55.0);
    ArtifactBundle::from_parts(Box::new(model), columns, LocationEncoding::new(values)).unwrap()
}

fn test_state(policy: ValidationPolicy, audit: AuditLog) -> ApiState {
    let mut config = ApiConfig::default();
    config.validation.policy = policy;
    ApiState::builder()
        .config(config)
        .artifacts(test_bundle())
        .audit(audit)
        .build()
        .unwrap()
}

fn app(state: ApiState) -> Router {
    let (router, _api) = OpenApiRouter::new()
        .merge(inference_router())
        .with_state(state)
        .split_for_parts();
    router
}

fn valid_payload() -> Value {
    json!({
        "area_type": "Super built-up  Area",
        "location": "Whitefield",
        "total_sqft": 1200,
        "bath": 2,
        "balcony": 1,
        "BHK": 2
    })
}

async fn post_predict(router: Router, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn valid_payload_yields_prediction() {
    let state = test_state(ValidationPolicy::Strict, AuditLog::default());
    let (status, body) = post_predict(app(state), valid_payload().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: PredictResponse = serde_json::from_value(body).unwrap();
    assert!(response.ok);
    assert!(response.predicted_price_lakhs.is_finite());
    assert!(response.predicted_price_lakhs > 0.0);
    assert!(!response.request_id.is_empty());
}

#[tokio::test]
async fn request_ids_are_unique_per_request() {
    let state = test_state(ValidationPolicy::Strict, AuditLog::default());
    let router = app(state);

    let (_, first) = post_predict(router.clone(), valid_payload().to_string()).await;
    let (_, second) = post_predict(router, valid_payload().to_string()).await;
    assert_ne!(first["request_id"], second["request_id"]);
}

#[tokio::test]
async fn negative_sqft_is_a_client_error() {
    let state = test_state(ValidationPolicy::Strict, AuditLog::default());
    let mut payload = valid_payload();
    payload["total_sqft"] = json!(-500);

    let (status, body) = post_predict(app(state), payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("Total area"));
}

#[tokio::test]
async fn missing_bhk_lists_the_field() {
    let state = test_state(ValidationPolicy::Strict, AuditLog::default());
    let mut payload = valid_payload();
    payload.as_object_mut().unwrap().remove("BHK");

    let (status, body) = post_predict(app(state), payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Missing required fields"));
    assert!(error.contains("BHK"));
}

#[tokio::test]
async fn strict_policy_rejects_excess_bathrooms() {
    let state = test_state(ValidationPolicy::Strict, AuditLog::default());
    let mut payload = valid_payload();
    payload["bath"] = json!(9);
    payload["BHK"] = json!(1);

    let (status, body) = post_predict(app(state), payload.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Bathrooms"));
}

#[tokio::test]
async fn lenient_policy_accepts_what_strict_rejects() {
    let state = test_state(ValidationPolicy::Lenient, AuditLog::default());
    let mut payload = valid_payload();
    payload["bath"] = json!(9);
    payload["BHK"] = json!(1);

    let (status, _) = post_predict(app(state), payload.to_string()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let state = test_state(ValidationPolicy::Strict, AuditLog::default());
    let (status, body) = post_predict(app(state), "not json at all".to_owned()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn successful_prediction_is_audited() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("requests.jsonl");
    let state = test_state(ValidationPolicy::Strict, AuditLog::new(&path));

    let (status, body) = post_predict(app(state), valid_payload().to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let content = std::fs::read_to_string(&path).unwrap();
    let record: Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(record["request_id"], body["request_id"]);
    assert_eq!(record["input"], valid_payload());
}

#[tokio::test]
async fn audit_failure_does_not_mask_the_prediction() {
    // Parent of the audit path is a file, so every append fails.
    let tmp = tempfile::TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let state =
        test_state(ValidationPolicy::Strict, AuditLog::new(blocker.join("requests.jsonl")));

    let (status, body) = post_predict(app(state), valid_payload().to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
}

mod event_binding {
    use super::*;
    use homeval_inference::event::handle_event;

    #[tokio::test]
    async fn string_body_matches_http_route() {
        let state = test_state(ValidationPolicy::Strict, AuditLog::default());
        let event = json!({ "body": valid_payload().to_string() });

        let response = handle_event(&state, &event).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body["ok"], json!(true));
        assert!(response.body["predicted_price_lakhs"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn inline_object_body_is_accepted() {
        let state = test_state(ValidationPolicy::Strict, AuditLog::default());
        let event = json!({ "body": valid_payload() });

        let response = handle_event(&state, &event).await;
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn missing_body_fails_with_all_fields_listed() {
        let state = test_state(ValidationPolicy::Strict, AuditLog::default());
        let response = handle_event(&state, &json!({})).await;

        assert_eq!(response.status_code, 400);
        let error = response.body["error"].as_str().unwrap();
        for field in ["area_type", "location", "total_sqft", "bath", "balcony", "BHK"] {
            assert!(error.contains(field), "missing-field list should name {field}");
        }
    }

    #[tokio::test]
    async fn unparsable_string_body_is_a_client_error() {
        let state = test_state(ValidationPolicy::Strict, AuditLog::default());
        let response = handle_event(&state, &json!({ "body": "{broken" })).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body["ok"], json!(false));
    }
}
