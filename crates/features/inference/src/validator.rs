//! Payload validation against the configured ruleset.
//!
//! Validation performs no side effects and is idempotent: the same payload
//! always yields the same `Listing` or the same error. Errors name the
//! offending field and constraint so clients can fix their input.

use crate::error::InferenceError;
use homeval_domain::config::ValidationPolicy;
use serde_json::{Map, Value};

/// The six fields every prediction request must carry.
pub const REQUIRED_FIELDS: [&str; 6] =
    ["area_type", "location", "total_sqft", "bath", "balcony", "BHK"];

/// A validated prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub area_type: String,
    pub location: String,
    pub total_sqft: f64,
    pub bath: f64,
    pub balcony: f64,
    pub bhk: f64,
}

/// Validates a decoded request body under the given policy.
///
/// # Errors
/// * [`InferenceError::MissingFields`] listing exactly the absent keys;
/// * [`InferenceError::Validation`] for type, emptiness, and range
///   violations, with a message naming the failing constraint.
pub fn validate(payload: &Value, policy: ValidationPolicy) -> Result<Listing, InferenceError> {
    let map = payload
        .as_object()
        .ok_or_else(|| InferenceError::validation("Request body must be a JSON object"))?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|key| !map.contains_key(**key))
        .map(|key| (*key).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(InferenceError::MissingFields(missing));
    }

    let total_sqft = coerce_number(map, "total_sqft")?;
    let bath = coerce_number(map, "bath")?;
    let balcony = coerce_number(map, "balcony")?;
    let bhk = coerce_number(map, "BHK")?;

    match policy {
        ValidationPolicy::Lenient => {
            if total_sqft <= 0.0 {
                return Err(InferenceError::validation("total_sqft must be > 0"));
            }
            if bhk <= 0.0 {
                return Err(InferenceError::validation("BHK must be > 0"));
            }
            if bath <= 0.0 {
                return Err(InferenceError::validation("bath must be > 0"));
            }
            if balcony < 0.0 {
                return Err(InferenceError::validation("balcony must be >= 0"));
            }
        },
        ValidationPolicy::Strict => {
            if !(300.0..=10_000.0).contains(&total_sqft) {
                return Err(InferenceError::validation(
                    "Total area must be between 300 and 10,000 sq.ft",
                ));
            }
            if !(1.0..=10.0).contains(&bhk) {
                return Err(InferenceError::validation("BHK must be between 1 and 10"));
            }
            if !(1.0..=10.0).contains(&bath) {
                return Err(InferenceError::validation("Bathrooms must be between 1 and 10"));
            }
            if !(0.0..=3.0).contains(&balcony) {
                return Err(InferenceError::validation("Balconies must be between 0 and 3"));
            }
            if bath > bhk + 2.0 {
                return Err(InferenceError::validation(format!(
                    "Bathrooms ({}) cannot exceed BHK ({}) + 2",
                    bath.trunc(),
                    bhk.trunc()
                )));
            }
            if total_sqft / bhk < 300.0 {
                return Err(InferenceError::validation("Minimum 300 sq.ft per BHK required"));
            }
        },
    }

    let area_type = coerce_trimmed_string(map, "area_type")?;
    let location = coerce_trimmed_string(map, "location")?;

    Ok(Listing { area_type, location, total_sqft, bath, balcony, bhk })
}

/// Coerces a field to f64, accepting JSON numbers and numeric strings.
fn coerce_number(map: &Map<String, Value>, field: &str) -> Result<f64, InferenceError> {
    let value = &map[field];
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|n| n.is_finite()).ok_or_else(|| {
        InferenceError::validation(format!("{field} must be a number"))
    })
}

fn coerce_trimmed_string(map: &Map<String, Value>, field: &str) -> Result<String, InferenceError> {
    map[field]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| InferenceError::validation(format!("{field} must be a non-empty string")))
}
