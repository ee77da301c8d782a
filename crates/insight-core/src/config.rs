//! Configuration management for Insight services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`INSIGHT_` prefix, `__` between sections,
//!    e.g. `INSIGHT_GREMLIN__URI`)
//! 2. Config file (`insight.toml`)
//! 3. Defaults

use serde::Deserialize;

use crate::error::InsightError;

/// Default config file prefix.
pub const DEFAULT_CONFIG_PREFIX: &str = "insight";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightConfig {
    /// `[gremlin]` section.
    #[serde(default)]
    pub gremlin: GremlinSettings,
}

/// Connection settings for the Gremlin Server HTTP endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GremlinSettings {
    /// Base URL of the Gremlin Server (default: "http://localhost:8182").
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Basic auth user, if the server requires authentication.
    #[serde(default)]
    pub user: Option<String>,

    /// Basic auth password.
    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response serializer requested in the `Accept` header. Must be an
    /// untyped GraphSON format.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_uri() -> String {
    "http://localhost:8182".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_mime_type() -> String {
    "application/vnd.gremlin-v1.0+json;types=false".to_string()
}

impl Default for GremlinSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            mime_type: default_mime_type(),
        }
    }
}

impl InsightConfig {
    /// Load configuration from `<file_prefix>.{toml,json,yaml,...}` and the
    /// environment. A missing file is not an error; a malformed one is.
    pub fn load(file_prefix: &str) -> Result<Self, InsightError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("INSIGHT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: InsightConfig = cfg.try_deserialize()?;
        tracing::debug!(uri = %loaded.gremlin.uri, "Loaded configuration");
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InsightConfig::default();
        assert_eq!(config.gremlin.uri, "http://localhost:8182");
        assert_eq!(config.gremlin.user, None);
        assert_eq!(config.gremlin.password, None);
        assert_eq!(config.gremlin.timeout_secs, 30);
        assert_eq!(
            config.gremlin.mime_type,
            "application/vnd.gremlin-v1.0+json;types=false"
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("absent");
        let config = InsightConfig::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config.gremlin.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("insight.toml"),
            "[gremlin]\nuri = \"http://janus:8182\"\nuser = \"reader\"\npassword = \"secret\"\n\
             mime_type = \"application/json\"\n",
        )
        .unwrap();

        let prefix = dir.path().join("insight");
        let config = InsightConfig::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config.gremlin.uri, "http://janus:8182");
        assert_eq!(config.gremlin.user.as_deref(), Some("reader"));
        assert_eq!(config.gremlin.password.as_deref(), Some("secret"));
        assert_eq!(config.gremlin.mime_type, "application/json");
        // Keys absent from the file keep their defaults.
        assert_eq!(config.gremlin.timeout_secs, 30);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("insight.toml"), "[gremlin\nuri = ").unwrap();

        let prefix = dir.path().join("insight");
        let err = InsightConfig::load(prefix.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, InsightError::Config(_)));
    }
}
