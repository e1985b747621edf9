//! The opaque regression model handle.
//!
//! The inference slice only ever sees [`Regressor::predict`]; the concrete
//! model format is irrelevant to request handling and tests substitute a
//! fake implementation.

use crate::error::ArtifactError;
use serde::Deserialize;
use std::fmt::Debug;

/// A trained regression model treated as a black box.
pub trait Regressor: Debug + Send + Sync {
    /// Invokes the model on a feature vector in training-time column order
    /// and returns its single scalar output.
    ///
    /// # Errors
    /// Returns [`ArtifactError::SchemaMismatch`] when the vector length does
    /// not match the training schema. Such a mismatch is a programming error
    /// upstream, not a user fault.
    fn predict(&self, features: &[f64]) -> Result<f64, ArtifactError>;

    /// Number of input features the model expects.
    fn num_features(&self) -> usize;
}

/// Linear-form regressor exported by the training pipeline.
///
/// The exported JSON carries an intercept and one coefficient per schema
/// column, in schema order.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearModel {
    #[must_use]
    pub const fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self { intercept, coefficients }
    }
}

impl Regressor for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<f64, ArtifactError> {
        if features.len() != self.coefficients.len() {
            return Err(ArtifactError::SchemaMismatch {
                message: format!(
                    "model expects {} features, got {}",
                    self.coefficients.len(),
                    features.len()
                ),
            });
        }

        let dot: f64 = self.coefficients.iter().zip(features).map(|(c, x)| c * x).sum();
        Ok(self.intercept + dot)
    }

    fn num_features(&self) -> usize {
        self.coefficients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_model_predicts_dot_product_plus_intercept() {
        let model = LinearModel::new(10.0, vec![1.0, 2.0, 0.5]);
        let out = model.predict(&[1.0, 1.0, 4.0]).unwrap();
        assert!((out - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let model = LinearModel::new(0.0, vec![1.0, 2.0]);
        let err = model.predict(&[1.0]).unwrap_err();
        assert!(matches!(err, ArtifactError::SchemaMismatch { .. }));
    }

    #[test]
    fn deserializes_from_exported_json() {
        let model: LinearModel =
            serde_json::from_str(r#"{"intercept": 3.5, "coefficients": [0.1, 0.2]}"#).unwrap();
        assert_eq!(model.num_features(), 2);
        let out = model.predict(&[10.0, 10.0]).unwrap();
        assert!((out - 6.5).abs() < 1e-12);
    }
}
