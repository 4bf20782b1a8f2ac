//! Endpoint registry with input/output contract checking.
//!
//! Each endpoint reads a JSON argument, checks it against `structure_in`, runs
//! its handler, and checks the result against
//! `success_or_error(structure_out)`. Callers always get one of the two
//! envelope shapes back; the transport that carries them lives elsewhere.
pub mod doc;

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::error::{ApiError, HandlerError};
use crate::structure::{success_or_error, Structure};

/// Uploaded files by form field name.
pub type Files = IndexMap<String, Vec<u8>>;

pub const MISSING_JSON_ARGUMENT: &str = "The json_argument argument was missing in the request";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Request body of an endpoint call.
#[derive(Debug, Clone, Default)]
pub struct Form {
    /// raw JSON text of the `json_argument` form variable
    pub json_argument: Option<String>,
    pub files: Files,
}

/// What an endpoint accepts and promises to return.
#[derive(Debug, Clone)]
pub struct Signature {
    pub path: String,
    /// Markdown shown above the generated structure docs
    pub doc: String,
    pub structure_in: Structure,
    pub structure_out: Structure,
}

/// Produces the full envelope (`{"success": ..}` or `{"error": ..}`).
pub trait Handler: Send + Sync {
    fn call(&self, json_in: &Value, files: &Files) -> Result<Value, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&Value, &Files) -> Result<Value, HandlerError> + Send + Sync,
{
    fn call(&self, json_in: &Value, files: &Files) -> Result<Value, HandlerError> {
        self(json_in, files)
    }
}

pub struct Endpoint {
    signature: Signature,
    envelope: Structure,
    handler: Box<dyn Handler>,
}

#[derive(Default)]
pub struct Api {
    endpoints: IndexMap<String, Endpoint>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Form {
    pub fn json(json_argument: impl Into<String>) -> Self {
        Self {
            json_argument: Some(json_argument.into()),
            files: Files::new(),
        }
    }
    pub fn with_file(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.files.insert(name.into(), bytes);
        self
    }
}

impl Signature {
    pub fn new(path: impl Into<String>, structure_in: Structure, structure_out: Structure) -> Self {
        Self {
            path: path.into(),
            doc: String::new(),
            structure_in,
            structure_out,
        }
    }
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

impl Endpoint {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
    /// `success_or_error(structure_out)`, built once at registration.
    pub fn envelope(&self) -> &Structure {
        &self.envelope
    }

    /// Run one request through the contract. Every outcome is an envelope.
    pub fn call(&self, form: &Form) -> Value {
        let path = self.signature.path.as_str();
        let Some(raw) = form.json_argument.as_deref() else {
            tracing::warn!(path, "request without json_argument");
            return error_envelope(MISSING_JSON_ARGUMENT);
        };
        let json_in = match serde_json::from_str::<Value>(raw) {
            Ok(x) => x,
            Err(error) => {
                tracing::warn!(path, %error, "json_argument is not JSON");
                return error_envelope(error.to_string());
            }
        };
        if !self.signature.structure_in.validate(&json_in) {
            tracing::warn!(path, %json_in, "json input did not validate");
            return error_envelope(format!("json input did not validate {json_in}"));
        }
        let json_out = match self.handler.call(&json_in, &form.files) {
            Ok(x) => x,
            Err(error) => {
                tracing::debug!(path, %error, "handler reported an error");
                return error_envelope(error.0);
            }
        };
        if self.envelope.validate(&json_out) {
            json_out
        } else {
            tracing::warn!(path, %json_out, "json output did not validate");
            error_envelope(format!("json output did not validate {json_out}"))
        }
    }
}

impl Api {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        signature: Signature,
        handler: impl Handler + 'static,
    ) -> Result<(), ApiError> {
        if self.endpoints.contains_key(&signature.path) {
            return Err(ApiError::DuplicateEndpoint(signature.path));
        }
        tracing::info!(path = %signature.path, "registered endpoint");
        let envelope = success_or_error(signature.structure_out.clone());
        let path = signature.path.clone();
        let endpoint = Endpoint {
            signature,
            envelope,
            handler: Box::new(handler),
        };
        self.endpoints.insert(path, endpoint);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Endpoint> {
        self.endpoints.get(path)
    }

    /// Endpoints in registration order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    pub fn call(&self, path: &str, form: &Form) -> Result<Value, ApiError> {
        let endpoint = self
            .get(path)
            .ok_or_else(|| ApiError::UnknownEndpoint(path.to_owned()))?;
        tracing::debug!(path, "dispatching");
        Ok(endpoint.call(form))
    }
}

pub fn success_envelope(value: impl Into<Value>) -> Value {
    json!({ "success": value.into() })
}

pub fn error_envelope(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}
