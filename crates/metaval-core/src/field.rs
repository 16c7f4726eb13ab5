//! # Field Descriptors
//!
//! A [`Field`] is the immutable declaration of one metadata field: its name,
//! kind, emptiness and presence rules, and an optional value validator.
//! An ordered slice of fields forms a schema.
//!
//! ## Construction
//!
//! Fields are built through [`FieldBuilder`], which mirrors the defaults of a
//! plain text field: non-empty, required, no validator. A list field without
//! an element type is a schema-authoring defect and is rejected by
//! [`FieldBuilder::build`] before any record is examined.
//!
//! ```
//! use metaval_core::{Conversion, DeclaredType, Field, ScalarKind};
//!
//! let samples = Field::builder("samples")
//!     .declared_type(DeclaredType::List)
//!     .element_type(ScalarKind::Text)
//!     .build()
//!     .unwrap();
//! assert!(samples.kind().is_list());
//!
//! let replicates = Field::builder("replicates")
//!     .declared_type(Conversion::Int)
//!     .optional(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(replicates.kind().name(), "int");
//! ```

use serde_json::Value;

use crate::error::{InvalidValue, SchemaError};
use crate::kind::{DeclaredType, FieldKind, ScalarKind};

/// A format check applied to a field's (converted) value.
///
/// For list fields the validator is applied to every element.
pub type ValueValidator = fn(&Value) -> Result<(), InvalidValue>;

/// Declaration of one field's shape and rules.
#[derive(Clone)]
pub struct Field {
    name: String,
    kind: FieldKind,
    allow_empty: bool,
    optional: bool,
    validator: Option<ValueValidator>,
}

impl Field {
    /// Start building a field with the given name.
    pub fn builder(name: impl Into<String>) -> FieldBuilder {
        FieldBuilder::new(name)
    }

    /// A required, non-empty text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar(ScalarKind::Text),
            allow_empty: false,
            optional: false,
            validator: None,
        }
    }

    /// A required, non-empty list field with the given element kind.
    pub fn list(name: impl Into<String>, element: impl Into<ScalarKind>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::List(element.into()),
            allow_empty: false,
            optional: false,
            validator: None,
        }
    }

    /// Field name, as looked up on the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved kind of the field.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Element kind, for list fields.
    pub fn element_kind(&self) -> Option<ScalarKind> {
        match self.kind {
            FieldKind::List(element) => Some(element),
            FieldKind::Scalar(_) => None,
        }
    }

    /// Whether a zero-length value is accepted.
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// Whether the field may be absent from the record.
    pub fn optional(&self) -> bool {
        self.optional
    }

    /// The attached value validator, if any.
    pub fn validator(&self) -> Option<ValueValidator> {
        self.validator
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("allow_empty", &self.allow_empty)
            .field("optional", &self.optional)
            .field("validator", &self.validator.map(|_| "<fn>"))
            .finish()
    }
}

/// Builder for [`Field`].
#[derive(Clone)]
pub struct FieldBuilder {
    name: String,
    declared: DeclaredType,
    element: Option<ScalarKind>,
    allow_empty: bool,
    optional: bool,
    validator: Option<ValueValidator>,
}

impl FieldBuilder {
    /// A builder with the defaults of a required, non-empty text field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: DeclaredType::default(),
            element: None,
            allow_empty: false,
            optional: false,
            validator: None,
        }
    }

    /// Set the declared type.
    pub fn declared_type(mut self, declared: impl Into<DeclaredType>) -> Self {
        self.declared = declared.into();
        self
    }

    /// Set the element type. Only meaningful for list fields; ignored otherwise.
    pub fn element_type(mut self, element: impl Into<ScalarKind>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Accept zero-length values.
    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Allow the field to be absent.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Attach a value validator.
    pub fn validator(mut self, validator: ValueValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Finish the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingElementType`] if the declared type is
    /// [`DeclaredType::List`] and no element type was given.
    pub fn build(self) -> Result<Field, SchemaError> {
        let kind = match self.declared {
            DeclaredType::Scalar(kind) => FieldKind::Scalar(kind),
            DeclaredType::List => match self.element {
                Some(element) => FieldKind::List(element),
                None => return Err(SchemaError::MissingElementType { field: self.name }),
            },
        };
        Ok(Field {
            name: self.name,
            kind,
            allow_empty: self.allow_empty,
            optional: self.optional,
            validator: self.validator,
        })
    }
}
