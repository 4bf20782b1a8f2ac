//! Structural validation: `Structure × Value → bool`.
//!
//! Failure is a plain `false`; no location or reason is reported.
//!
//! Recursion follows the structure tree, which is finite and acyclic, so the
//! depth is bounded by how deeply the structure itself nests.
use serde_json::{Map, Value};

use super::{Fields, Structure};

impl Structure {
    pub fn validate(&self, json: &Value) -> bool {
        match self {
            Structure::String => json.is_string(),
            // `Value::Bool` is its own variant, so booleans never land here.
            Structure::Number => matches!(json, Value::Number(_)),
            Structure::Bool => json.is_boolean(),
            Structure::Empty => json.as_object().is_some_and(Map::is_empty),
            Structure::Map(of) => json
                .as_object()
                .is_some_and(|map| map.values().all(|value| of.validate(value))),
            Structure::Array(of) => json
                .as_array()
                .is_some_and(|xs| xs.iter().all(|element| of.validate(element))),
            Structure::AllOf(fields) => json
                .as_object()
                .is_some_and(|map| validate_all_of(fields, map)),
            Structure::OneOf(options) => json
                .as_object()
                .is_some_and(|map| validate_one_of(options, map)),
        }
    }
}

fn validate_all_of(fields: &Fields, map: &Map<String, Value>) -> bool {
    // Object keys are unique, so equal sizes plus every field present is
    // exact key-set equality: nothing missing, nothing extra.
    if map.len() != fields.len() {
        return false;
    }
    if !fields.keys().all(|name| map.contains_key(name)) {
        return false;
    }
    map.iter().all(|(name, value)| {
        fields
            .get(name)
            .is_some_and(|structure| structure.validate(value))
    })
}

fn validate_one_of(options: &Fields, map: &Map<String, Value>) -> bool {
    if map.len() != 1 {
        return false;
    }
    map.iter().all(|(tag, value)| {
        options
            .get(tag)
            .is_some_and(|structure| structure.validate(value))
    })
}
