//! # metaval-cli — Metadata Validation Command-Line Interface
//!
//! Loads metadata records from JSON or YAML files and validates them with
//! the built-in field schemas.
//!
//! ## Subcommands
//!
//! - `check` — Validate one record and print the converted result
//! - `schemas` — List the built-in schemas and their fields
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Validation itself lives in `metaval-schema`; this crate only loads
//!   records, picks a schema, and reports.

pub mod check;
pub mod schemas;
