//! Inference feature slice.
//!
//! Turns a raw JSON payload into a feature vector matching the model's
//! training-time column schema and returns a scalar price prediction:
//!
//! 1. [`validator`] checks required fields, types, and the configured range
//!    policy;
//! 2. [`aligner`] expands the validated listing onto the cached column
//!    schema (one-hot area type, target-encoded location, zero fill);
//! 3. [`predictor`] invokes the opaque regression model.
//!
//! The slice exposes the `POST /predict` route and an equivalent
//! function-invocation binding in [`event`].

pub mod aligner;
mod error;
pub mod event;
pub mod predictor;
mod routes;
pub mod validator;

pub use crate::error::InferenceError;
pub use crate::routes::{PredictResponse, inference_router, run_prediction};
