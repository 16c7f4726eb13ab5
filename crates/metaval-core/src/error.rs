//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout metaval. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Schema-authoring defects ([`SchemaError`]) are raised while building
//!   field descriptors and never depend on record data.
//! - Data violations ([`ValidationError`]) carry the caller's description
//!   label, the field name, and the offending value (and element index for
//!   list fields), so a single message is enough to locate the problem.
//! - Conversion and format failures are kept as the `source()` of the
//!   validation error that wraps them.

use thiserror::Error;

/// Top-level error type for metaval.
#[derive(Error, Debug)]
pub enum MetavalError {
    /// The schema itself is malformed.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A record violated the schema.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A malformed field descriptor.
///
/// Raised only while a schema is being authored. It indicates a programming
/// defect, never a data problem, and must not be retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A list-typed field was declared without an element type.
    #[error("list field {field} must specify element type")]
    MissingElementType {
        /// Name of the offending field.
        field: String,
    },
}

/// A record's data violated a field descriptor.
///
/// The rendered messages follow a fixed layout: the description label, then
/// `field <name>`, then the specific complaint.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A non-optional field is absent from the record.
    #[error("{description} field {field} is required")]
    Required {
        /// Caller-supplied label of the entity being validated.
        description: String,
        /// Name of the missing field.
        field: String,
    },

    /// A field that disallows empty values has length zero.
    #[error("{description} field {field} must be a non-empty {kind}")]
    Empty {
        /// Caller-supplied label of the entity being validated.
        description: String,
        /// Name of the empty field.
        field: String,
        /// Name of the field's declared kind.
        kind: &'static str,
    },

    /// A value is not an instance of a kind that is never converted.
    #[error("{description} field {field}{} must be {} {kind}", index_suffix(.index), article(.kind))]
    WrongKind {
        /// Caller-supplied label of the entity being validated.
        description: String,
        /// Name of the field.
        field: String,
        /// Element position, for list fields.
        index: Option<usize>,
        /// Name of the expected kind.
        kind: &'static str,
    },

    /// A value could not be converted into the declared kind.
    #[error("{description} field {field}{} is not a valid {kind}: {value}", index_suffix(.index))]
    Unconvertible {
        /// Caller-supplied label of the entity being validated.
        description: String,
        /// Name of the field.
        field: String,
        /// Element position, for list fields.
        index: Option<usize>,
        /// Name of the target kind.
        kind: &'static str,
        /// Rendered offending value.
        value: String,
        /// Why the conversion failed.
        #[source]
        source: ConversionError,
    },

    /// An attached value validator rejected the (converted) value.
    #[error("{description} field {field} is not valid: {value}")]
    Invalid {
        /// Caller-supplied label of the entity being validated.
        description: String,
        /// Name of the field.
        field: String,
        /// Rendered offending value.
        value: String,
        /// The validator's own complaint.
        #[source]
        source: InvalidValue,
    },

    /// A list-typed field holds something other than a sequence.
    #[error("{description} field {field} must be a list")]
    NotList {
        /// Caller-supplied label of the entity being validated.
        description: String,
        /// Name of the field.
        field: String,
    },

    /// A converted list element equals an earlier accepted element.
    #[error("{description} [{index}] field {field} duplicate value {value}")]
    Duplicate {
        /// Caller-supplied label of the entity being validated.
        description: String,
        /// Name of the field.
        field: String,
        /// Position of the repeated element.
        index: usize,
        /// Rendered converted value.
        value: String,
    },
}

impl ValidationError {
    /// Name of the field the violation was reported against.
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field, .. }
            | Self::Empty { field, .. }
            | Self::WrongKind { field, .. }
            | Self::Unconvertible { field, .. }
            | Self::Invalid { field, .. }
            | Self::NotList { field, .. }
            | Self::Duplicate { field, .. } => field,
        }
    }

    /// The description label supplied by the caller.
    pub fn description(&self) -> &str {
        match self {
            Self::Required { description, .. }
            | Self::Empty { description, .. }
            | Self::WrongKind { description, .. }
            | Self::Unconvertible { description, .. }
            | Self::Invalid { description, .. }
            | Self::NotList { description, .. }
            | Self::Duplicate { description, .. } => description,
        }
    }

    /// Element index the violation refers to, if it concerns a list element.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::WrongKind { index, .. } | Self::Unconvertible { index, .. } => *index,
            Self::Duplicate { index, .. } => Some(*index),
            _ => None,
        }
    }
}

fn index_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("[{i}]"),
        None => String::new(),
    }
}

fn article(kind: &str) -> &'static str {
    match kind.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    }
}

/// Failure of a kind conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConversionError(String);

impl ConversionError {
    /// Create a conversion error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// The reason the conversion failed.
    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Rejection of a value by a [`ValueValidator`](crate::ValueValidator).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InvalidValue(String);

impl InvalidValue {
    /// Create a rejection with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The validator's message.
    pub fn message(&self) -> &str {
        &self.0
    }
}
