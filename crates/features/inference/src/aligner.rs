//! Feature alignment onto the training-time column schema.
//!
//! The schema artifact carries the canonical column list, including every
//! `area_type_*` indicator column the training pipeline produced
//! (drop-first: the baseline category has no column). Columns are never
//! inferred from the request; a single request cannot know the training
//! categories. Any schema column the payload does not populate is 0.0.

use crate::validator::Listing;
use homeval_artifacts::{ColumnSchema, LocationEncoding};

/// Prefix of the one-hot indicator columns for `area_type`.
pub const AREA_TYPE_PREFIX: &str = "area_type_";

/// Name of the target-encoded location column.
pub const LOCATION_ENCODED_COLUMN: &str = "location_encoded";

/// Expands a validated listing into a feature vector in schema order.
///
/// The output's column set and order exactly equal the schema; the predictor
/// relies on this invariant. Pure and idempotent.
#[must_use]
pub fn align(listing: &Listing, columns: &ColumnSchema, locations: &LocationEncoding) -> Vec<f64> {
    columns
        .iter()
        .map(|column| match column {
            "total_sqft" => listing.total_sqft,
            "bath" => listing.bath,
            "balcony" => listing.balcony,
            "BHK" => listing.bhk,
            LOCATION_ENCODED_COLUMN => locations.encode(&listing.location),
            other => match other.strip_prefix(AREA_TYPE_PREFIX) {
                Some(category) if category == listing.area_type => 1.0,
                _ => 0.0,
            },
        })
        .collect()
}
