//! Help text: a structure rendered as nested pseudo-JSON, one line per item.
//!
//! Output is consumed verbatim by the API docs, so the exact strings and
//! indent widths below are part of the contract.
use std::fmt;
use std::iter::once;

use super::{Fields, Structure};

/// A lazily produced sequence of help lines.
pub type Lines<'a> = Box<dyn Iterator<Item = String> + 'a>;

const MAP_INDENT: usize = 2;
const ARRAY_INDENT: usize = 4;
const FIELD_INDENT: usize = 8;

impl Structure {
    /// Fresh line iterator on every call; nothing is cached.
    pub fn help(&self) -> Lines<'_> {
        match self {
            Structure::String => line("<string>"),
            Structure::Number => line("<number>"),
            Structure::Bool => line("<bool>"),
            Structure::Empty => line("{} (Yes, literally an empty record)"),
            Structure::Map(of) => Box::new(
                once("{".to_owned())
                    .chain(once("\"<string>\": ".to_owned()))
                    .chain(indent(of.help(), MAP_INDENT))
                    .chain(once("}".to_owned())),
            ),
            Structure::Array(of) => Box::new(
                once("[ <array>".to_owned())
                    .chain(indent(of.help(), ARRAY_INDENT))
                    .chain(once("]".to_owned())),
            ),
            Structure::AllOf(fields) => members("{ <all of>", fields),
            Structure::OneOf(options) => members("{ <one of>", options),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, help_line) in self.help().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&help_line)?;
        }
        Ok(())
    }
}

fn line(text: &'static str) -> Lines<'static> {
    Box::new(once(text.to_owned()))
}

fn indent(lines: Lines<'_>, width: usize) -> impl Iterator<Item = String> + '_ {
    lines.map(move |l| format!("{:width$}{l}", ""))
}

fn members<'a>(header: &'static str, fields: &'a Fields) -> Lines<'a> {
    let body = fields.iter().flat_map(|(name, structure)| {
        once(format!("  \"{name}\":")).chain(indent(structure.help(), FIELD_INDENT))
    });
    Box::new(
        once(header.to_owned())
            .chain(body)
            .chain(once("}".to_owned())),
    )
}

#[cfg(test)]
mod tests {
    use crate::structure::{success_or_error, Structure};

    fn lines(s: &Structure) -> Vec<String> {
        s.help().collect()
    }

    #[test]
    fn leaves_are_one_line() {
        assert_eq!(lines(&Structure::String), ["<string>"]);
        assert_eq!(lines(&Structure::Number), ["<number>"]);
        assert_eq!(lines(&Structure::Bool), ["<bool>"]);
        assert_eq!(lines(&Structure::Empty), ["{} (Yes, literally an empty record)"]);
    }

    #[test]
    fn array_indents_by_four() {
        assert_eq!(
            lines(&Structure::array(Structure::String)),
            ["[ <array>", "    <string>", "]"]
        );
    }

    #[test]
    fn map_indents_by_two() {
        assert_eq!(
            lines(&Structure::map(Structure::array(Structure::Bool))),
            ["{", "\"<string>\": ", "  [ <array>", "      <bool>", "  ]", "}"]
        );
    }

    #[test]
    fn all_of_follows_declaration_order() {
        let s = Structure::all_of([("port", Structure::Number), ("name", Structure::String)]);
        assert_eq!(
            lines(&s),
            [
                "{ <all of>",
                "  \"port\":",
                "        <number>",
                "  \"name\":",
                "        <string>",
                "}",
            ]
        );
    }

    #[test]
    fn envelope_help() {
        let s = success_or_error(Structure::array(Structure::String));
        assert_eq!(
            lines(&s),
            [
                "{ <one of>",
                "  \"success\":",
                "        [ <array>",
                "            <string>",
                "        ]",
                "  \"error\":",
                "        <string>",
                "}",
            ]
        );
    }

    #[test]
    fn empty_members() {
        assert_eq!(lines(&Structure::all_of::<_, &str>([])), ["{ <all of>", "}"]);
    }

    #[test]
    fn help_is_restartable() {
        let s = Structure::one_of([
            ("a", Structure::map(Structure::Number)),
            ("b", Structure::all_of([("c", Structure::Empty)])),
        ]);
        let first = lines(&s);
        let second = lines(&s);
        assert_eq!(first, second);
        assert_eq!(s.to_string(), first.join("\n"));
    }
}
