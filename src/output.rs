//! Shared output formatting for kanbo CLI commands.
//!
//! Every command emits either a schema-versioned JSON envelope or a short
//! human report: a header line, indented key/value fields, then free-form
//! body lines. Errors go to stderr (human) or stdout (JSON envelope).

use serde::Serialize;

use crate::error::{Error, Result};

pub const SCHEMA_VERSION: &str = "kanbo.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Human-facing command report.
#[derive(Debug, Clone, Default)]
pub struct Report {
    header: String,
    fields: Vec<(String, String)>,
    lines: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    pub fn field(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn line(&mut self, value: impl Into<String>) -> &mut Self {
        self.lines.push(value.into());
        self
    }

    pub fn warning(&mut self, value: impl Into<String>) -> &mut Self {
        self.warnings.push(value.into());
        self
    }

    pub fn render(&self) -> String {
        let mut out = self.header.clone();
        for (key, value) in &self.fields {
            out.push_str(&format!("\n  {key}: {value}"));
        }
        if !self.lines.is_empty() {
            out.push('\n');
            for line in &self.lines {
                out.push_str(&format!("\n{line}"));
            }
        }
        for warning in &self.warnings {
            out.push_str(&format!("\nwarning: {warning}"));
        }
        out
    }
}

/// Print a successful command result: the JSON envelope under `--json`, the
/// human report otherwise (unless `--quiet`).
pub fn emit<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    report: &Report,
) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            warnings: Vec<String>,
        }

        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
            warnings: report.warnings.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else if !options.quiet {
        println!("{}", report.render());
    }

    Ok(())
}

/// Print a failed command result. Human errors go to stderr with an optional
/// hint; JSON errors share the success envelope shape.
pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let hint = error_hint(err);

    if json {
        let envelope = serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "command": command,
            "status": "error",
            "error": {
                "message": err.to_string(),
                "code": err.exit_code(),
                "kind": error_kind(err),
            },
            "hint": hint,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// First non-flag argument, used to label error envelopes even when clap
/// parsing itself fails.
pub fn infer_command_name_from_args() -> String {
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        if arg.starts_with('-') {
            // Skip the value of flags that take one.
            if matches!(arg.as_str(), "--config" | "--file") {
                args.next();
            }
            continue;
        }
        return arg;
    }

    "kanbo".to_string()
}

fn error_kind(err: &Error) -> &'static str {
    match err.exit_code() {
        2 => "user_error",
        _ => "operation_failed",
    }
}

fn error_hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::TaskNotFound(_) => Some("kanbo list"),
        Error::UnknownColumn(_) => Some("kanbo columns"),
        Error::InvalidConfig(_) => Some("fix config.toml then retry"),
        _ => None,
    }
}
