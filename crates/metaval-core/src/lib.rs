//! # metaval-core — Foundational Types for metaval
//!
//! This crate defines the data model of the declarative field-validation
//! engine. Every other crate in the workspace depends on `metaval-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed kind enumeration.** A field's kind is one of `Text`,
//!    `Integer`, `Mapping` (never converted) or `Converted(Conversion)`,
//!    wrapped as `Scalar` or `List`. Whether a value needs conversion is
//!    decided by the tag, never by inspecting the value.
//!
//! 2. **Schema defects fail at construction.** A list field without an
//!    element type cannot be built; [`FieldBuilder::build`] returns
//!    [`SchemaError`] before any record is seen.
//!
//! 3. **Typed validators.** Format checks are plain function pointers with
//!    the fixed signature [`ValueValidator`].
//!
//! 4. **Explicit record access.** Records are reached only through the
//!    [`MetadataRecord`] trait.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `metaval-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod kind;
pub mod record;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{ConversionError, InvalidValue, MetavalError, SchemaError, ValidationError};
pub use field::{Field, FieldBuilder, ValueValidator};
pub use kind::{Conversion, ConvertFn, DeclaredType, FieldKind, ScalarKind};
pub use record::MetadataRecord;
pub use value::{render, value_len};
