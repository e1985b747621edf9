//! The prediction endpoint and its orchestration.
//!
//! Request lifecycle: Received → Validating → Aligning → Predicting →
//! Auditing (best-effort) → Responded. Validation failures and missing or
//! malformed bodies respond 400; any other failure responds 500. The audit
//! write happens after a successful prediction and can never fail it.

use crate::error::InferenceError;
use crate::predictor::predict_price;
use crate::validator::validate;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use homeval_audit::AuditRecord;
use homeval_domain::constants::INFERENCE_TAG;
use homeval_kernel::safe_nanoid;
use homeval_kernel::server::ApiState;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Prediction request body (documentation schema; numeric fields also accept
/// numeric strings).
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
struct PredictRequest {
    /// e.g. "Super built-up  Area"
    area_type: String,
    /// e.g. "Whitefield"
    location: String,
    total_sqft: f64,
    bath: f64,
    balcony: f64,
    #[serde(rename = "BHK")]
    bhk: f64,
}

/// Successful prediction response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    pub ok: bool,
    /// Predicted price in lakhs, rounded to 2 decimals.
    pub predicted_price_lakhs: f64,
    pub request_id: String,
}

/// Error response shared by client and server failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub(crate) ok: bool,
    pub(crate) error: String,
}

pub fn inference_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(predict_handler))
}

#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictRequest,
    responses(
        (status = OK, description = "Price prediction", body = PredictResponse),
        (status = BAD_REQUEST, description = "Validation failure", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Internal failure", body = ErrorResponse),
    ),
    tag = INFERENCE_TAG,
)]
async fn predict_handler(
    State(state): State<ApiState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, format!("No JSON body: {rejection}"));
        },
    };

    match run_prediction(&state, &payload).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            if err.status().is_server_error() {
                error!(error = %err, "Prediction failed");
            }
            error_response(err.status(), err.to_string())
        },
    }
}

/// Runs the full validate → align → predict → audit pipeline.
///
/// Shared by the HTTP route and the function-invocation binding so both
/// respond identically.
///
/// # Errors
/// Validation errors for user-caused problems; artifact errors for internal
/// faults. Audit failures are logged at warn and swallowed.
pub async fn run_prediction(
    state: &ApiState,
    payload: &Value,
) -> Result<PredictResponse, InferenceError> {
    let listing = validate(payload, state.config.validation.policy)?;
    let prediction = predict_price(&listing, &state.artifacts)?;

    let request_id = safe_nanoid!();

    let record = AuditRecord::new(&request_id, payload.clone(), prediction);
    if let Err(err) = state.audit.insert(&record).await {
        // Best-effort: a failed audit write must not discard a valid result.
        warn!(request_id = %request_id, error = %err, "Audit write failed");
    }

    Ok(PredictResponse {
        ok: true,
        predicted_price_lakhs: (prediction * 100.0).round() / 100.0,
        request_id,
    })
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { ok: false, error })).into_response()
}
