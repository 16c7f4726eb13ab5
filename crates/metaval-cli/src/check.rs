//! # Check Subcommand
//!
//! Loads one metadata record from a JSON or YAML file, applies a built-in
//! schema, and prints the converted record.
//!
//! Exit codes: 0 when the record is valid, 1 on a validation failure.
//! Unreadable or unparsable input is an operational error returned as `Err`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use metaval_core::MetavalError;
use metaval_schema::apply_schema;
use serde_json::{Map, Value};

use crate::schemas::SchemaName;

/// Serialization format of an input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl InputFormat {
    /// Infer the format from a file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Arguments for the `metaval check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Built-in schema to apply.
    #[arg(long, value_enum)]
    pub schema: SchemaName,

    /// Label prefixed to error messages. Defaults to the schema name.
    #[arg(long)]
    pub description: Option<String>,

    /// Input format. Inferred from the file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Do not print the converted record on success.
    #[arg(long)]
    pub quiet: bool,

    /// Record file to check.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Read a record file into a JSON object.
///
/// # Errors
///
/// Fails if the file cannot be read, does not parse, or is not a mapping.
pub fn load_record(path: &Path, format: InputFormat) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document: Value = match format {
        InputFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        InputFormat::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
    };
    match document {
        Value::Object(record) => Ok(record),
        other => bail!(
            "{} must contain a mapping at the top level, found {}",
            path.display(),
            metaval_core::value::type_name(&other)
        ),
    }
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let format = args
        .format
        .unwrap_or_else(|| InputFormat::from_path(&args.path));
    let mut record = load_record(&args.path, format)?;
    let description = args
        .description
        .clone()
        .unwrap_or_else(|| args.schema.to_string());

    tracing::info!(path = %args.path.display(), schema = %args.schema, "checking record");

    match apply_schema(&description, || args.schema.fields(), &mut record) {
        Ok(field_count) => {
            tracing::info!(field_count, "record valid");
            if !args.quiet {
                println!("{}", serde_json::to_string_pretty(&Value::Object(record))?);
            }
            Ok(0)
        }
        Err(MetavalError::Validation(err)) => {
            println!("FAIL: {} — {err}", args.path.display());
            Ok(1)
        }
        Err(err @ MetavalError::Schema(_)) => {
            Err(err).with_context(|| format!("built-in schema {} is malformed", args.schema))
        }
    }
}
