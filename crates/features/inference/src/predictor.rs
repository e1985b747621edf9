//! Prediction glue: align a validated listing and invoke the model.

use crate::aligner::align;
use crate::error::InferenceError;
use crate::validator::Listing;
use homeval_artifacts::ArtifactBundle;

/// Predicts the price (in lakhs) for a validated listing.
///
/// No validation happens here; a feature/schema shape mismatch is an
/// unrecoverable internal error surfaced as 500.
pub fn predict_price(listing: &Listing, bundle: &ArtifactBundle) -> Result<f64, InferenceError> {
    let features = align(listing, bundle.columns(), bundle.locations());
    Ok(bundle.model().predict(&features)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashMap;
    use homeval_artifacts::{ColumnSchema, LinearModel, LocationEncoding};

    #[test]
    fn prediction_flows_through_aligned_features() {
        let columns = ColumnSchema::new(vec![
            "total_sqft".to_owned(),
            "location_encoded".to_owned(),
            "area_type_Plot  Area".to_owned(),
        ]);
        let mut values = FxHashMap::default();
        values.insert("Whitefield".to_owned(), 80.0);
        let bundle = ArtifactBundle::from_parts(
            Box::new(LinearModel::new(1.0, vec![0.01, 1.0, 5.0])),
            columns,
            LocationEncoding::new(values),
        )
        .unwrap();

        let listing = Listing {
            area_type: "Plot  Area".to_owned(),
            location: "Whitefield".to_owned(),
            total_sqft: 1000.0,
            bath: 2.0,
            balcony: 1.0,
            bhk: 2.0,
        };

        // 1.0 + 0.01*1000 + 1.0*80 + 5.0*1
        let prediction = predict_price(&listing, &bundle).unwrap();
        assert!((prediction - 96.0).abs() < 1e-9);
    }
}
