//! Sample API served by the `json-structure` binary.
//!
//! Run it with a command-line JSON matching [`COMMAND_LINE`], e.g.
//! `{"port": 7700, "value": 10}`.
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::api::{success_envelope, Api, Files, Signature};
use crate::error::{ApiError, HandlerError};
use crate::structure::Structure;

pub const DEFAULT_COMMAND_LINE: &str = r#"{"port": 7700, "value": 0}"#;

pub static COMMAND_LINE: Lazy<Structure> = Lazy::new(|| {
    Structure::all_of([
        ("port", Structure::Number),
        ("value", Structure::Number),
    ])
});

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub value: Number,
}

fn point() -> Structure {
    Structure::all_of([("x", Structure::Number), ("y", Structure::Number)])
}

pub fn bounding_box_structure() -> Structure {
    Structure::all_of([
        ("x1", Structure::Number),
        ("y1", Structure::Number),
        ("x2", Structure::Number),
        ("y2", Structure::Number),
    ])
}

pub fn build(settings: &Settings) -> Result<Api, ApiError> {
    let mut api = Api::new();

    api.register(
        Signature::new("/hello_world", Structure::Empty, Structure::String),
        |_: &Value, _: &Files| -> Result<Value, HandlerError> {
            Ok(success_envelope("Hello world!"))
        },
    )?;

    let value = settings.value.clone();
    api.register(
        Signature::new("/add_value", Structure::Number, Structure::String)
            .doc("Add the number to the `value` given on the command line."),
        move |json_in: &Value, _: &Files| -> Result<Value, HandlerError> {
            let Value::Number(n) = json_in else {
                return Err(HandlerError::new(format!("expected a number, got {json_in}")));
            };
            Ok(success_envelope(format!("The sum is {}", add(&value, n))))
        },
    )?;

    api.register(
        Signature::new("/filenames", Structure::Empty, Structure::array(Structure::String))
            .doc("List the names of the uploaded files."),
        |_: &Value, files: &Files| -> Result<Value, HandlerError> {
            let names: Vec<Value> = files.keys().cloned().map(Value::String).collect();
            Ok(success_envelope(names))
        },
    )?;

    api.register(
        Signature::new("/bounding_box", Structure::array(point()), bounding_box_structure())
            .doc("Smallest axis-aligned box containing every point. Needs at least one point."),
        |json_in: &Value, _: &Files| -> Result<Value, HandlerError> {
            let points = json_in.as_array().map(Vec::as_slice).unwrap_or_default();
            let Some((first, rest)) = points.split_first() else {
                return Err(HandlerError::new("at least one point is required"));
            };
            let (x, y) = coordinates(first)?;
            let (mut x1, mut y1, mut x2, mut y2) = (x, y, x, y);
            for p in rest {
                let (x, y) = coordinates(p)?;
                x1 = x1.min(x);
                y1 = y1.min(y);
                x2 = x2.max(x);
                y2 = y2.max(y);
            }
            Ok(success_envelope(serde_json::json!({"x1": x1, "y1": y1, "x2": x2, "y2": y2})))
        },
    )?;

    Ok(api)
}

/// Integers add exactly; anything involving a float adds as `f64`.
fn add(a: &Number, b: &Number) -> String {
    match (as_integer(a), as_integer(b)) {
        (Some(a), Some(b)) => (a + b).to_string(),
        _ => {
            let sum = a.as_f64().unwrap_or_default() + b.as_f64().unwrap_or_default();
            sum.to_string()
        }
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn as_number(json: &Value) -> Result<f64, HandlerError> {
    json.as_f64()
        .ok_or_else(|| HandlerError::new(format!("expected a number, got {json}")))
}

fn coordinates(p: &Value) -> Result<(f64, f64), HandlerError> {
    Ok((as_number(&p["x"])?, as_number(&p["y"])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Form;
    use serde_json::json;

    fn api(value: impl Into<Number>) -> Api {
        let settings = Settings {
            port: 7700,
            value: value.into(),
        };
        build(&settings).unwrap()
    }

    #[test]
    fn command_line_structure() {
        assert!(COMMAND_LINE.validate(&json!({"port": 7700, "value": 10})));
        assert!(!COMMAND_LINE.validate(&json!({"port": 7700})));
        let settings: Settings = crate::config::load(DEFAULT_COMMAND_LINE, &COMMAND_LINE).unwrap();
        assert_eq!(settings.port, 7700);
    }

    #[test]
    fn hello_world() {
        let out = api(0).call("/hello_world", &Form::json("{}")).unwrap();
        assert_eq!(out, json!({"success": "Hello world!"}));
    }

    #[test]
    fn add_value() {
        let out = api(10).call("/add_value", &Form::json("100")).unwrap();
        assert_eq!(out, json!({"success": "The sum is 110"}));
        let out = api(10).call("/add_value", &Form::json("0.5")).unwrap();
        assert_eq!(out, json!({"success": "The sum is 10.5"}));
        let out = api(-3).call("/add_value", &Form::json("1.5")).unwrap();
        assert_eq!(out, json!({"success": "The sum is -1.5"}));
    }

    #[test]
    fn add_value_keeps_large_integers_exact() {
        let out = api(0).call("/add_value", &Form::json("9007199254740993")).unwrap();
        assert_eq!(out, json!({"success": "The sum is 9007199254740993"}));
        let out = api(u64::MAX).call("/add_value", &Form::json("1")).unwrap();
        assert_eq!(out, json!({"success": "The sum is 18446744073709551616"}));
    }

    #[test]
    fn filenames() {
        let form = Form::json("{}")
            .with_file("file1", b"a".to_vec())
            .with_file("file2", Vec::new());
        let out = api(0).call("/filenames", &form).unwrap();
        assert_eq!(out, json!({"success": ["file1", "file2"]}));
    }

    #[test]
    fn bounding_box() {
        let input = r#"[{"x": 1, "y": 5}, {"x": -2, "y": 3}, {"x": 4, "y": 4.5}]"#;
        let out = api(0).call("/bounding_box", &Form::json(input)).unwrap();
        assert_eq!(out, json!({"success": {"x1": -2.0, "y1": 3.0, "x2": 4.0, "y2": 5.0}}));

        let out = api(0).call("/bounding_box", &Form::json("[]")).unwrap();
        assert_eq!(out, json!({"error": "at least one point is required"}));
    }
}
