//! Minimal CLI: describe → call → check against the sample API
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use crate::api::{Api, Files, Form};
use crate::demo;
use crate::structure::Structure;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// document, call, and check JSON-validated endpoints of the sample API
#[derive(Parser, Debug)]
#[command(name = "json-structure", version, about)]
pub struct CommandLineInterface {
    /// command-line JSON for the API, e.g. '{"port": 7700, "value": 10}'
    #[arg(long, global = true, default_value = demo::DEFAULT_COMMAND_LINE)]
    config: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the Markdown API documentation
    Describe(DescribeOut),
    /// run one request through an endpoint and print the resulting envelope
    Call(CallIn),
    /// validate JSON files against an endpoint's input (or output) structure
    Check(CheckIn),
}

#[derive(Args, Debug)]
struct DescribeOut {
    /// only document this endpoint path
    #[arg(long)]
    endpoint: Option<String>,
}

#[derive(Args, Debug)]
struct CallIn {
    /// endpoint path, e.g. /hello_world
    endpoint: String,

    /// JSON text of the `json_argument` form variable
    #[arg(long)]
    json_argument: Option<String>,

    /// uploaded files as NAME=PATH
    #[arg(long = "file", value_parser = parse_upload)]
    files: Vec<(String, PathBuf)>,
}

#[derive(Args, Debug)]
struct CheckIn {
    /// endpoint path whose structure to check against
    #[arg(long)]
    endpoint: String,

    /// check against the output envelope instead of the input structure
    #[arg(long, default_value_t = false)]
    output: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        let settings: demo::Settings = crate::config::load(&self.config, &demo::COMMAND_LINE)
            .context("Invalid command line json")?;
        tracing::debug!(?settings, "loaded settings");
        let api = demo::build(&settings)?;
        match &self.cmd {
            Command::Describe(target) => println!("{}", describe(&api, target)?),
            Command::Call(target) => {
                let envelope = call(&api, target)?;
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            }
            Command::Check(target) => check(&api, target)?,
        }
        Ok(())
    }
}

fn describe(api: &Api, target: &DescribeOut) -> Result<String> {
    match target.endpoint.as_deref() {
        None => Ok(api.doc_markdown()),
        Some(path) => {
            let endpoint = api
                .get(path)
                .ok_or_else(|| anyhow!("no endpoint registered at `{path}`"))?;
            Ok(endpoint.doc_markdown())
        }
    }
}

fn call(api: &Api, target: &CallIn) -> Result<Value> {
    let mut files = Files::new();
    for (name, path) in &target.files {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read upload {}", path.display()))?;
        files.insert(name.clone(), bytes);
    }
    let form = Form {
        json_argument: target.json_argument.clone(),
        files,
    };
    Ok(api.call(&target.endpoint, &form)?)
}

fn check(api: &Api, target: &CheckIn) -> Result<()> {
    let endpoint = api
        .get(&target.endpoint)
        .ok_or_else(|| anyhow!("no endpoint registered at `{}`", target.endpoint))?;
    let structure: &Structure = if target.output {
        endpoint.envelope()
    } else {
        &endpoint.signature().structure_in
    };
    let source_paths = resolve_file_path_patterns(&target.input)?;

    let verdicts: Vec<(PathBuf, Result<bool>)> = source_paths
        .into_par_iter()
        .map(|path| {
            let verdict = load_json(&path).map(|json| structure.validate(&json));
            (path, verdict)
        })
        .collect();

    let mut failed = 0usize;
    for (path, verdict) in &verdicts {
        let path = path.display();
        match verdict {
            Ok(true) => println!("{} {path}", "✅ valid".green()),
            Ok(false) => {
                failed += 1;
                println!("{} {path}", "❌ invalid".red());
            }
            Err(error) => {
                failed += 1;
                println!("{} {path}: {error:#}", "❌ unreadable".red());
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} file(s) did not validate", verdicts.len());
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn load_json(path: &std::path::Path) -> Result<Value> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file {}", path.display()))?;
    serde_json::from_str::<Value>(&source)
        .with_context(|| format!("Failed to parse JSON source file ({})", path.display()))
}

fn parse_upload(raw: &str) -> Result<(String, PathBuf), String> {
    match raw.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_owned(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got `{raw}`")),
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
