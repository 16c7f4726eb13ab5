//! # metaval-schema — Declarative Field Validation
//!
//! Applies a schema (an ordered slice of [`Field`](metaval_core::Field)
//! descriptors) to a metadata record: checks presence, non-emptiness, kind,
//! and format, and writes converted values back onto the record.
//!
//! ## Dispatcher (`defs`)
//!
//! - [`check_from_defs`] — the entry point. Fail-fast, in schema order.
//! - [`apply_schema`] — builds the descriptors, then checks; either failure
//!   comes back as a [`MetavalError`](metaval_core::MetavalError).
//!
//! ## Checkers (`check`)
//!
//! - [`check_scalar`] — one value against a field's kind and validator.
//! - [`check_list`] — a sequence, element by element, rejecting duplicates
//!   after conversion.
//!
//! ## Validators (`validators`)
//!
//! Email, public URL, HTTP URL, and MD5-format predicates that plug into a
//! field descriptor.
//!
//! ## Crate Policy
//!
//! - Depends only on `metaval-core` internally.
//! - Synchronous and free of global mutable state; concurrent calls on
//!   independent records need no coordination.
//! - Only the first violation is reported per call.

pub mod check;
pub mod defs;
pub mod validators;

pub use check::{check_list, check_scalar};
pub use defs::{apply_schema, check_from_defs};
pub use validators::{validate_email, validate_http_url, validate_md5, validate_url};
