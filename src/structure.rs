//! Declarative JSON structures.
//!
//! A [`Structure`] describes the shape a JSON value must have. Trees are built
//! once (usually next to endpoint registration) and only read afterwards:
//! - [`Structure::validate`] decides whether a value conforms.
//! - [`Structure::help`] renders the shape as nested pseudo-JSON lines.
//!
//! The structures are deliberately restrictive; there are freeform JSON
//! formats they cannot express. In exchange they are simple and precise,
//! which makes compatibility bugs between producer and consumer easy to find.
pub mod help;
pub mod validate;

use indexmap::IndexMap;

/// Named members of an `AllOf` / `OneOf`, in declaration order.
///
/// Order is irrelevant for validation but drives help output, so this must
/// stay an insertion-ordered map.
pub type Fields = IndexMap<String, Structure>;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    /// any string
    String,
    /// any integer or float (never a boolean)
    Number,
    Bool,
    /// exactly `{}`
    Empty,
    /// object with unconstrained keys; every value matches `of`
    Map(Box<Structure>),
    /// list; every element matches `of`
    Array(Box<Structure>),
    /// object whose key set is exactly the field set
    AllOf(Fields),
    /// object with exactly one key, naming one of the options
    OneOf(Fields),
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTORS
// ————————————————————————————————————————————————————————————————————————————

impl Structure {
    pub fn map(of: Structure) -> Self {
        Self::Map(Box::new(of))
    }
    pub fn array(of: Structure) -> Self {
        Self::Array(Box::new(of))
    }
    /// Build an `AllOf` from `(name, structure)` pairs, keeping their order.
    ///
    /// A repeated name keeps its first position and takes the last structure.
    pub fn all_of<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Structure)>,
        K: Into<String>,
    {
        Self::AllOf(collect_fields(fields))
    }
    /// Build a `OneOf` (tagged union) from `(tag, structure)` pairs.
    pub fn one_of<I, K>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, Structure)>,
        K: Into<String>,
    {
        Self::OneOf(collect_fields(options))
    }
}

/// The envelope every endpoint output is wrapped in:
/// `{"success": <of>}` or `{"error": <string>}`.
pub fn success_or_error(of: Structure) -> Structure {
    Structure::one_of([("success", of), ("error", Structure::String)])
}

fn collect_fields<I, K>(fields: I) -> Fields
where
    I: IntoIterator<Item = (K, Structure)>,
    K: Into<String>,
{
    fields.into_iter().map(|(k, s)| (k.into(), s)).collect()
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_of_keeps_declaration_order() {
        let s = Structure::all_of([
            ("zeta", Structure::Number),
            ("alpha", Structure::String),
            ("mid", Structure::Bool),
        ]);
        let Structure::AllOf(fields) = s else {
            panic!("expected AllOf")
        };
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn envelope_has_success_then_error() {
        let s = success_or_error(Structure::Number);
        let Structure::OneOf(options) = &s else {
            panic!("expected OneOf")
        };
        let tags: Vec<&str> = options.keys().map(String::as_str).collect();
        assert_eq!(tags, ["success", "error"]);
        assert_eq!(options["success"], Structure::Number);
        assert_eq!(options["error"], Structure::String);
    }

    #[test]
    fn envelope_accepts_either_shape_but_not_both() {
        let s = success_or_error(Structure::String);
        assert!(s.validate(&json!({"success": "ok"})));
        assert!(s.validate(&json!({"error": "bad"})));
        assert!(!s.validate(&json!({"success": "ok", "error": "bad"})));
        assert!(!s.validate(&json!({"success": 1})));
        assert!(!s.validate(&json!({})));
    }

    #[test]
    fn structures_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Structure>();
    }
}
