//! JSON-validated endpoints with generated documentation.
//!
//! - [`structure`]: declarative JSON structures, validation and help text
//! - [`api`]: endpoint contracts and their Markdown docs
//! - [`config`]: command-line JSON configuration
pub mod api;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod structure;

pub use api::{Api, Endpoint, Files, Form, Handler, Signature};
pub use error::{ApiError, ConfigError, HandlerError};
pub use structure::{success_or_error, Fields, Structure};
