//! Shared string constants used across slices and routers.

/// OpenAPI tag for system endpoints (health, docs).
pub const SYSTEM_TAG: &str = "system";

/// OpenAPI tag for inference endpoints.
pub const INFERENCE_TAG: &str = "inference";

/// Default artifact key for the serialized regression model.
pub const MODEL_KEY: &str = "models/regressor.json";

/// Default artifact key for the ordered feature-column schema.
pub const COLUMNS_KEY: &str = "models/model_columns.json";

/// Default artifact key for the location target-encoding table.
pub const LOCATION_ENCODING_KEY: &str = "models/location_encoding.json";
