//! Startup configuration passed as a single JSON document on the command line.
//!
//! The document is checked against a [`Structure`] before anything else runs,
//! then deserialized into a typed value with JSON-path context in errors.
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ConfigError;
use crate::structure::Structure;

pub fn load<T: DeserializeOwned>(raw: &str, structure: &Structure) -> Result<T, ConfigError> {
    let json = serde_json::from_str::<Value>(raw)?;
    if !structure.validate(&json) {
        tracing::warn!(%json, "command line json did not validate");
        return Err(ConfigError::Invalid(json.to_string()));
    }
    from_value_with_path(json)
}

/// Deserialize an already parsed document with JSON-path context in errors.
pub fn from_value_with_path<T: DeserializeOwned>(json: Value) -> Result<T, ConfigError> {
    serde_path_to_error::deserialize::<_, T>(json).map_err(|err| ConfigError::Deserialize {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}
