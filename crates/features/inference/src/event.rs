//! Function-invocation binding.
//!
//! Equivalent to `POST /predict` for event-driven wrappers (e.g. a function
//! platform invoking the service with `{"body": "<json string>"}`). The body
//! may be a JSON-encoded string or an inline object; a missing body behaves
//! like an empty object and fails validation with the full missing-field
//! list.

use crate::routes::run_prediction;
use homeval_kernel::server::ApiState;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

/// Status code plus serialized JSON body, ready for the invoking wrapper.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: Value,
}

/// Handles one invocation event.
///
/// Never fails: every outcome, including malformed events, is encoded in
/// the response's status code and body.
pub async fn handle_event(state: &ApiState, event: &Value) -> InvocationResponse {
    let payload = match decode_body(event) {
        Ok(payload) => payload,
        Err(message) => {
            return InvocationResponse {
                status_code: 400,
                body: json!({ "ok": false, "error": message }),
            };
        },
    };

    match run_prediction(state, &payload).await {
        Ok(response) => InvocationResponse {
            status_code: 200,
            body: serde_json::to_value(response).unwrap_or_else(|_| json!({ "ok": true })),
        },
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                error!(error = %err, "Prediction failed");
            }
            InvocationResponse {
                status_code: status.as_u16(),
                body: json!({ "ok": false, "error": err.to_string() }),
            }
        },
    }
}

fn decode_body(event: &Value) -> Result<Value, String> {
    match event.get("body") {
        None | Some(Value::Null) => Ok(json!({})),
        Some(Value::String(raw)) => {
            serde_json::from_str(raw).map_err(|e| format!("No JSON body: {e}"))
        },
        Some(other) => Ok(other.clone()),
    }
}
