//! # Scalar and List Checkers
//!
//! Validate (and where the kind calls for it, convert) one field's value
//! against its [`Field`] descriptor. Both checkers return the value that
//! should be stored back on the record; neither touches the record itself.
//!
//! Per value, in order:
//!
//! 1. Strict kinds (`Text`, `Integer`, `Mapping`) must already hold an
//!    instance of the kind.
//! 2. Converted kinds run their [`Conversion`](metaval_core::Conversion).
//! 3. The field's validator, if any, runs on the (converted) value.
//!
//! List elements additionally must be unique after conversion.

use metaval_core::{render, Field, FieldKind, ScalarKind, ValidationError};
use serde_json::Value;

/// Check one value against the field's scalar kind and validator.
///
/// Returns the value to store: converted for converted kinds, otherwise an
/// identical copy. A list field is routed to [`check_list`].
///
/// # Errors
///
/// - [`ValidationError::WrongKind`] if a strict kind does not match.
/// - [`ValidationError::Unconvertible`] if the conversion fails.
/// - [`ValidationError::Invalid`] if the validator rejects the value.
pub fn check_scalar(
    description: &str,
    field: &Field,
    value: &Value,
) -> Result<Value, ValidationError> {
    match field.kind() {
        FieldKind::Scalar(kind) => check_value(description, field, kind, None, value),
        FieldKind::List(_) => check_list(description, field, value),
    }
}

/// Check every element of a sequence against the field's element kind and
/// validator, rejecting duplicates.
///
/// Elements are compared after conversion, so raw values that convert to the
/// same canonical value are duplicates. The returned sequence preserves the
/// original order. A scalar field's own kind is applied to each element.
///
/// # Errors
///
/// - [`ValidationError::NotList`] if `values` is not an array.
/// - Any error of [`check_scalar`], naming the element index where the
///   message format allows.
/// - [`ValidationError::Duplicate`] on the first repeated element.
pub fn check_list(
    description: &str,
    field: &Field,
    values: &Value,
) -> Result<Value, ValidationError> {
    let kind = match field.kind() {
        FieldKind::List(element) | FieldKind::Scalar(element) => element,
    };
    let Value::Array(items) = values else {
        return Err(ValidationError::NotList {
            description: description.to_string(),
            field: field.name().to_string(),
        });
    };

    let mut accepted: Vec<Value> = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let converted = check_value(description, field, kind, Some(index), item)?;
        if accepted.contains(&converted) {
            return Err(ValidationError::Duplicate {
                description: description.to_string(),
                field: field.name().to_string(),
                index,
                value: render(&converted),
            });
        }
        accepted.push(converted);
    }
    Ok(Value::Array(accepted))
}

fn check_value(
    description: &str,
    field: &Field,
    kind: ScalarKind,
    index: Option<usize>,
    value: &Value,
) -> Result<Value, ValidationError> {
    let checked = match kind.conversion() {
        Some(conversion) => {
            conversion
                .convert(value)
                .map_err(|source| ValidationError::Unconvertible {
                    description: description.to_string(),
                    field: field.name().to_string(),
                    index,
                    kind: kind.name(),
                    value: render(value),
                    source,
                })?
        }
        None if kind.is_instance(value) => value.clone(),
        None => {
            return Err(ValidationError::WrongKind {
                description: description.to_string(),
                field: field.name().to_string(),
                index,
                kind: kind.name(),
            })
        }
    };

    if let Some(validator) = field.validator() {
        validator(&checked).map_err(|source| ValidationError::Invalid {
            description: description.to_string(),
            field: field.name().to_string(),
            value: render(&checked),
            source,
        })?;
    }
    Ok(checked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{validate_email, validate_md5};
    use metaval_core::{Conversion, DeclaredType};
    use proptest::prelude::*;
    use serde_json::json;
    use std::error::Error as _;

    const SPECIES: Conversion = Conversion::Symbol {
        name: "Species",
        members: &["human", "mouse", "manatee"],
    };

    fn field(kind: impl Into<DeclaredType>) -> Field {
        Field::builder("f").declared_type(kind).build().unwrap()
    }

    #[test]
    fn strict_kind_returns_identical_value() {
        let value = json!("some text");
        let out = check_scalar("entry", &Field::text("f"), &value).unwrap();
        assert_eq!(out, value);

        let mapping = json!({"name": "tool", "version": "1.0"});
        let out = check_scalar("entry", &field(ScalarKind::Mapping), &mapping).unwrap();
        assert_eq!(out, mapping);
    }

    #[test]
    fn strict_kind_mismatch() {
        let err = check_scalar("entry", &field(ScalarKind::Integer), &json!("3")).unwrap_err();
        assert_eq!(err.to_string(), "entry field f must be an integer");
        assert!(matches!(err, ValidationError::WrongKind { index: None, .. }));
    }

    #[test]
    fn converted_kind_converts() {
        let out = check_scalar("entry", &field(Conversion::Int), &json!("3")).unwrap();
        assert_eq!(out, json!(3));
        let out = check_scalar("entry", &field(SPECIES), &json!("mouse")).unwrap();
        assert_eq!(out, json!("mouse"));
    }

    #[test]
    fn unconvertible_value() {
        let err = check_scalar("experiment", &field(SPECIES), &json!("rat")).unwrap_err();
        assert_eq!(err.to_string(), "experiment field f is not a valid Species: rat");
        assert_eq!(
            err.source().map(|s| s.to_string()).as_deref(),
            Some("expected one of: human, mouse, manatee")
        );
    }

    #[test]
    fn validator_runs_on_converted_value() {
        let contact = Field::builder("contact")
            .validator(validate_email)
            .build()
            .unwrap();
        assert!(check_scalar("team", &contact, &json!("user@example.com")).is_ok());

        let err = check_scalar("team", &contact, &json!("not-an-email")).unwrap_err();
        assert_eq!(err.to_string(), "team field contact is not valid: not-an-email");
        assert_eq!(
            err.source().map(|s| s.to_string()).as_deref(),
            Some("invalid email address: not-an-email")
        );
    }

    #[test]
    fn list_rejects_non_sequence() {
        let samples = Field::list("samples", ScalarKind::Text);
        let err = check_list("entry", &samples, &json!("a")).unwrap_err();
        assert_eq!(err.to_string(), "entry field samples must be a list");
    }

    #[test]
    fn list_accepts_unique_values_in_order() {
        let samples = Field::list("samples", ScalarKind::Text);
        let out = check_list("entry", &samples, &json!(["b", "a", "c"])).unwrap();
        assert_eq!(out, json!(["b", "a", "c"]));
    }

    #[test]
    fn list_duplicate_reports_index() {
        let samples = Field::list("samples", ScalarKind::Text);
        let err = check_list("entry", &samples, &json!(["a", "a"])).unwrap_err();
        assert_eq!(err.to_string(), "entry [1] field samples duplicate value a");
        assert_eq!(err.index(), Some(1));
    }

    #[test]
    fn list_duplicates_compared_after_conversion() {
        let counts = Field::list("counts", Conversion::Int);
        let err = check_list("entry", &counts, &json!(["3", 3])).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { index: 1, .. }));
    }

    #[test]
    fn list_element_kind_mismatch_names_index() {
        let samples = Field::list("samples", ScalarKind::Text);
        let err = check_list("entry", &samples, &json!(["a", 2])).unwrap_err();
        assert_eq!(err.to_string(), "entry field samples[1] must be a string");

        let counts = Field::list("counts", Conversion::Int);
        let err = check_list("entry", &counts, &json!(["1", "x"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "entry field counts[1] is not a valid int: x"
        );
    }

    #[test]
    fn list_validator_applies_to_each_element() {
        let digests = Field::builder("md5s")
            .declared_type(DeclaredType::List)
            .element_type(ScalarKind::Text)
            .validator(validate_md5)
            .build()
            .unwrap();
        let ok = json!([
            "d41d8cd98f00b204e9800998ecf8427e",
            "0cc175b9c0f1b6a831c399e269772661"
        ]);
        assert_eq!(check_list("file", &digests, &ok).unwrap(), ok);
        let err = check_list("file", &digests, &json!(["d41d8cd98f00b204e9800998ecf8427e", "nope"]))
            .unwrap_err();
        assert_eq!(err.to_string(), "file field md5s is not valid: nope");
    }

    #[test]
    fn scalar_check_routes_list_fields() {
        let samples = Field::list("samples", ScalarKind::Text);
        let out = check_scalar("entry", &samples, &json!(["x"])).unwrap();
        assert_eq!(out, json!(["x"]));
    }

    proptest! {
        /// Distinct inputs survive unchanged; appending a repeat fails at its index.
        #[test]
        fn duplicate_detected_at_repeat(
            items in prop::collection::btree_set("[a-z]{1,8}", 1..12),
            pick in any::<prop::sample::Index>(),
        ) {
            let items: Vec<String> = items.into_iter().collect();
            let samples = Field::list("samples", ScalarKind::Text);

            let unique = Value::from(items.clone());
            prop_assert_eq!(check_list("entry", &samples, &unique).unwrap(), unique);

            let mut repeated = items.clone();
            repeated.push(pick.get(&items).clone());
            let err = check_list("entry", &samples, &Value::from(repeated)).unwrap_err();
            prop_assert_eq!(err.index(), Some(items.len()));
        }
    }
}
