//! # Schema Dispatcher
//!
//! [`check_from_defs`] applies an ordered slice of [`Field`] descriptors to
//! one record. Each field is checked independently in schema order:
//!
//! - **Present:** reject a zero-length value unless the field allows empty
//!   values, run the list or scalar checker, and write the returned value
//!   back under the same name.
//! - **Absent:** fail unless the field is optional; optional fields stay
//!   absent.
//!
//! Checking is fail-fast. The first violation aborts the call, so schema
//! order decides which error the caller sees. Fields checked before the
//! failure have already been written back; the record is not restored.
//!
//! [`apply_schema`] builds the descriptors first and then runs
//! [`check_from_defs`], reporting either failure as a [`MetavalError`].

use metaval_core::{Field, MetadataRecord, MetavalError, SchemaError, ValidationError};

use crate::check::{check_list, check_scalar};

/// Validate `target` against `fields`, writing converted values back.
///
/// `description` labels the entity being checked and prefixes every error
/// message (e.g. `"entry"`, `"experiment"`).
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered in schema order.
pub fn check_from_defs<R>(
    description: &str,
    fields: &[Field],
    target: &mut R,
) -> Result<(), ValidationError>
where
    R: MetadataRecord + ?Sized,
{
    tracing::debug!(description, field_count = fields.len(), "checking record");
    for field in fields {
        if let Err(err) = check_field(description, field, target) {
            tracing::debug!(description, field = field.name(), error = %err, "field rejected");
            return Err(err);
        }
    }
    Ok(())
}

/// Build a schema with `schema` and apply it to `target`.
///
/// Returns the number of fields checked.
///
/// # Errors
///
/// - [`MetavalError::Schema`] if a descriptor is malformed. The record is
///   not touched.
/// - [`MetavalError::Validation`] for the first violation in schema order.
pub fn apply_schema<R, S>(
    description: &str,
    schema: S,
    target: &mut R,
) -> Result<usize, MetavalError>
where
    R: MetadataRecord + ?Sized,
    S: FnOnce() -> Result<Vec<Field>, SchemaError>,
{
    let fields = schema()?;
    check_from_defs(description, &fields, target)?;
    Ok(fields.len())
}

fn check_field<R>(description: &str, field: &Field, target: &mut R) -> Result<(), ValidationError>
where
    R: MetadataRecord + ?Sized,
{
    tracing::trace!(field = field.name(), kind = field.kind().name(), "checking field");
    if target.has_field(field.name()) {
        check_present_field(description, field, target)
    } else {
        check_missing_field(description, field)
    }
}

fn check_present_field<R>(
    description: &str,
    field: &Field,
    target: &mut R,
) -> Result<(), ValidationError>
where
    R: MetadataRecord + ?Sized,
{
    let name = field.name();
    if !field.allow_empty() && target.field_len(name) == Some(0) {
        return Err(ValidationError::Empty {
            description: description.to_string(),
            field: name.to_string(),
            kind: field.kind().name(),
        });
    }

    let checked = {
        let Some(value) = target.field_value(name) else {
            return check_missing_field(description, field);
        };
        if field.kind().is_list() {
            check_list(description, field, value)?
        } else {
            check_scalar(description, field, value)?
        }
    };
    tracing::trace!(field = name, value = %checked, "storing checked value");
    target.set_field(name, checked);
    Ok(())
}

fn check_missing_field(description: &str, field: &Field) -> Result<(), ValidationError> {
    if field.optional() {
        tracing::trace!(field = field.name(), "optional field absent");
        Ok(())
    } else {
        Err(ValidationError::Required {
            description: description.to_string(),
            field: field.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metaval_core::{Conversion, DeclaredType, ScalarKind};
    use serde_json::{json, Map, Value};

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn missing_required_field() {
        let fields = [Field::text("team_id")];
        let mut target = record(json!({}));
        let err = check_from_defs("team", &fields, &mut target).unwrap_err();
        assert_eq!(err.to_string(), "team field team_id is required");
    }

    #[test]
    fn missing_optional_field_stays_absent() {
        let fields = [Field::builder("notes").optional(true).build().unwrap()];
        let mut target = record(json!({}));
        check_from_defs("entry", &fields, &mut target).unwrap();
        assert!(!target.contains_key("notes"));
    }

    #[test]
    fn converted_value_written_back() {
        let fields = [Field::builder("replicates")
            .declared_type(Conversion::Int)
            .build()
            .unwrap()];
        let mut target = record(json!({"replicates": "3"}));
        check_from_defs("experiment", &fields, &mut target).unwrap();
        assert_eq!(target["replicates"], json!(3));
    }

    #[test]
    fn empty_value_rules() {
        let strict = [Field::text("notes")];
        let mut target = record(json!({"notes": ""}));
        let err = check_from_defs("entry", &strict, &mut target).unwrap_err();
        assert_eq!(err.to_string(), "entry field notes must be a non-empty string");

        let lenient = [Field::builder("notes").allow_empty(true).build().unwrap()];
        check_from_defs("entry", &lenient, &mut target).unwrap();
        assert_eq!(target["notes"], json!(""));
    }

    #[test]
    fn empty_list_names_list_kind() {
        let fields = [Field::list("samples", ScalarKind::Text)];
        let mut target = record(json!({"samples": []}));
        let err = check_from_defs("entry", &fields, &mut target).unwrap_err();
        assert_eq!(err.to_string(), "entry field samples must be a non-empty list");
    }

    #[test]
    fn first_failure_in_schema_order_wins() {
        let fields = [
            Field::builder("count")
                .declared_type(Conversion::Int)
                .build()
                .unwrap(),
            Field::text("first"),
            Field::text("second"),
        ];
        let mut target = record(json!({"count": "7", "second": 5}));
        let err = check_from_defs("entry", &fields, &mut target).unwrap_err();
        assert_eq!(err.field(), "first");
        // Fields checked before the failure keep their converted values.
        assert_eq!(target["count"], json!(7));
        assert_eq!(target["second"], json!(5));
    }

    #[test]
    fn apply_schema_reports_malformed_schema_before_touching_record() {
        let mut target = record(json!({"count": "7"}));
        let err = apply_schema(
            "entry",
            || {
                Ok(vec![
                    Field::builder("count").declared_type(Conversion::Int).build()?,
                    Field::builder("samples").declared_type(DeclaredType::List).build()?,
                ])
            },
            &mut target,
        )
        .unwrap_err();
        assert!(matches!(err, MetavalError::Schema(SchemaError::MissingElementType { .. })));
        assert_eq!(
            err.to_string(),
            "schema error: list field samples must specify element type"
        );
        assert_eq!(target["count"], json!("7"));
    }

    #[test]
    fn apply_schema_wraps_validation_failure() {
        let mut target = record(json!({"count": "x"}));
        let schema = || -> Result<Vec<Field>, SchemaError> {
            Ok(vec![Field::builder("count").declared_type(Conversion::Int).build()?])
        };
        let err = apply_schema("entry", schema, &mut target).unwrap_err();
        let MetavalError::Validation(inner) = &err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(inner.field(), "count");
        assert_eq!(
            err.to_string(),
            "validation error: entry field count is not a valid int: x"
        );

        let mut target = record(json!({"count": "7"}));
        assert_eq!(apply_schema("entry", schema, &mut target).unwrap(), 1);
        assert_eq!(target["count"], json!(7));
    }
}
