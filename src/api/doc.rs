//! Markdown documentation for registered endpoints.
//!
//! Rendering the Markdown to HTML is left to whoever serves it.
use super::{Api, Endpoint};
use crate::structure::Structure;

impl Endpoint {
    /// The handler doc followed by the input and output structure help.
    pub fn doc_markdown(&self) -> String {
        let signature = self.signature();
        let mut out = String::new();
        out.push_str(&signature.doc);
        out.push_str("\n\n");
        out.push_str("* Input JSON in POST variable `json_argument`\n");
        out.push('\n');
        push_fenced(&mut out, &signature.structure_in);
        out.push('\n');
        out.push('\n');
        out.push_str("* Output\n");
        out.push('\n');
        push_fenced(&mut out, self.envelope());
        out
    }
}

impl Api {
    pub fn doc_markdown(&self) -> String {
        let mut lines = vec!["Make a POST request to\n".to_owned()];
        for endpoint in self.endpoints() {
            lines.push(format!("## `{}`\n\n", endpoint.signature().path));
            lines.extend(endpoint.doc_markdown().split('\n').map(str::to_owned));
            lines.push("\n\n".to_owned());
        }
        lines.join("\n")
    }
}

fn push_fenced(out: &mut String, structure: &Structure) {
    out.push_str("```\n");
    out.push_str(&structure.to_string());
    out.push('\n');
    out.push_str("```");
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::api::{Api, Files, Signature};
    use crate::error::HandlerError;
    use crate::structure::Structure;

    fn hello() -> Api {
        let mut api = Api::new();
        api.register(
            Signature::new("/hello_world", Structure::Empty, Structure::String)
                .doc("Say hello."),
            |_: &Value, _: &Files| -> Result<Value, HandlerError> {
                Ok(json!({"success": "Hello world!"}))
            },
        )
        .unwrap();
        api
    }

    #[test]
    fn endpoint_markdown() {
        let api = hello();
        let endpoint = api.get("/hello_world").unwrap();
        let expected = "\
Say hello.

* Input JSON in POST variable `json_argument`

```
{} (Yes, literally an empty record)
```

* Output

```
{ <one of>
  \"success\":
        <string>
  \"error\":
        <string>
}
```";
        assert_eq!(endpoint.doc_markdown(), expected);
    }

    #[test]
    fn api_markdown_lists_endpoints_in_order() {
        let mut api = hello();
        api.register(
            Signature::new("/add_value", Structure::Number, Structure::String),
            |_: &Value, _: &Files| -> Result<Value, HandlerError> {
                Ok(json!({"success": ""}))
            },
        )
        .unwrap();
        let md = api.doc_markdown();
        let head = "Make a POST request to\n\n## `/hello_world`\n\n\nSay hello.\n";
        assert!(md.starts_with(head), "{md}");
        let hello_at = md.find("## `/hello_world`").unwrap();
        let add_at = md.find("## `/add_value`").unwrap();
        assert!(hello_at < add_at);
        assert!(md.ends_with("```\n\n\n"));
    }

    #[test]
    fn empty_api_markdown() {
        assert_eq!(Api::new().doc_markdown(), "Make a POST request to\n");
    }
}
