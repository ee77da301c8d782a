use thiserror::Error;

/// Top-level error type for the Insight services.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for InsightError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
