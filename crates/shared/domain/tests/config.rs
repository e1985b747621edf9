use homeval_domain::config::{
    ApiConfig, ArtifactSource, ArtifactsConfig, ServerConfig, ValidationPolicy,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4710);
    assert!(server.ssl.is_none());

    let artifacts = ArtifactsConfig::default();
    assert!(matches!(artifacts.source, ArtifactSource::Dir { .. }));
    assert_eq!(artifacts.cache_dir, std::path::PathBuf::from("artifacts"));
    assert_eq!(artifacts.model_key, "models/regressor.json");

    let cfg = ApiConfig::default();
    assert_eq!(cfg.validation.policy, ValidationPolicy::Strict);
    assert!(cfg.audit.path.is_none());
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "artifacts": {
            "source": { "kind": "http", "base_url": "https://artifacts.example.com" },
            "cache_dir": "/tmp/homeval",
            "model_key": "models/v2/regressor.json"
        },
        "audit": { "path": "/var/log/homeval/requests.jsonl" },
        "validation": { "policy": "lenient" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert!(matches!(
        &cfg.artifacts.source,
        ArtifactSource::Http { base_url } if base_url == "https://artifacts.example.com"
    ));
    assert_eq!(cfg.artifacts.model_key, "models/v2/regressor.json");
    // Unspecified keys keep their defaults
    assert_eq!(cfg.artifacts.columns_key, "models/model_columns.json");
    assert_eq!(cfg.validation.policy, ValidationPolicy::Lenient);
    assert!(cfg.audit.path.is_some());
}
