use thiserror::Error;

/// Failure raised by an endpoint handler. The message becomes the
/// `{"error": ..}` envelope returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("endpoint `{0}` is already registered")]
    DuplicateEndpoint(String),
    #[error("no endpoint registered at `{0}`")]
    UnknownEndpoint(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("command line json is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid command line json: {0}")]
    Invalid(String),
    #[error("at JSON path {path} → {message}")]
    Deserialize { path: String, message: String },
}
