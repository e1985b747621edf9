//! The feature-column schema and the location target-encoding table.
//!
//! Both are fixed at training time and immutable for the process lifetime.

use fxhash::FxHashMap;
use serde::Deserialize;

/// Encoding used when a location is absent from the table and the table has
/// no `"other"` entry. Matches the training pipeline's fallback.
pub const DEFAULT_UNSEEN_ENCODING: f64 = 70.0;

/// Key the training pipeline stores the fallback encoding under.
const OTHER_LOCATION: &str = "other";

/// Ordered sequence of feature-column names the model expects as input.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Column names in training-time order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.columns
    }
}

/// Mapping from location name to its target-encoded numeric value.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LocationEncoding {
    values: FxHashMap<String, f64>,
}

impl LocationEncoding {
    #[must_use]
    pub fn new(values: FxHashMap<String, f64>) -> Self {
        Self { values }
    }

    /// Looks up the encoded value for a location.
    ///
    /// Unseen locations fall back to the table's `"other"` entry, and to
    /// [`DEFAULT_UNSEEN_ENCODING`] if even that is missing.
    #[must_use]
    pub fn encode(&self, location: &str) -> f64 {
        self.values
            .get(location)
            .or_else(|| self.values.get(OTHER_LOCATION))
            .copied()
            .unwrap_or(DEFAULT_UNSEEN_ENCODING)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LocationEncoding {
        let mut values = FxHashMap::default();
        values.insert("Whitefield".to_owned(), 84.2);
        values.insert(OTHER_LOCATION.to_owned(), 55.0);
        LocationEncoding::new(values)
    }

    #[test]
    fn known_location_uses_its_entry() {
        assert!((table().encode("Whitefield") - 84.2).abs() < f64::EPSILON);
    }

    #[test]
    fn unseen_location_falls_back_to_other() {
        assert!((table().encode("Atlantis") - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_other_entry_uses_hardcoded_default() {
        let empty = LocationEncoding::new(FxHashMap::default());
        assert!((empty.encode("Atlantis") - DEFAULT_UNSEEN_ENCODING).abs() < f64::EPSILON);
    }

    #[test]
    fn schema_preserves_order() {
        let schema: ColumnSchema =
            serde_json::from_str(r#"["total_sqft", "bath", "location_encoded"]"#).unwrap();
        let names: Vec<_> = schema.iter().collect();
        assert_eq!(names, vec!["total_sqft", "bath", "location_encoded"]);
    }
}
