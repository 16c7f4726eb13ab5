//! # Value Kinds — Closed Type Tags for Fields
//!
//! Every field declares the kind of value it holds, fixed when the schema is
//! authored. Kinds fall into two groups:
//!
//! - **Strict kinds** (`Text`, `Integer`, `Mapping`) are never converted;
//!   the record must already hold a value of that kind.
//! - **Converted kinds** carry a [`Conversion`] that coerces the raw value
//!   into its canonical form (e.g. the string `"3"` into the integer `3`).
//!
//! A list field is a [`FieldKind::List`] of one scalar kind, applied
//! uniformly to every element. Nested lists are not representable.

use serde_json::{Number, Value};

use crate::error::ConversionError;
use crate::value::type_name;

/// A schema-author supplied conversion function.
pub type ConvertFn = fn(&Value) -> Result<Value, ConversionError>;

/// A conversion into a canonical value, attached to a converted kind.
#[derive(Clone, Copy)]
pub enum Conversion {
    /// Integers; integral floats are narrowed and numeric strings parsed.
    Int,
    /// Finite floating-point numbers; numeric strings are parsed.
    Float,
    /// Booleans; the strings `true` and `false` are accepted in any case.
    Bool,
    /// Text; numbers and booleans are rendered to their textual form.
    Text,
    /// A closed set of symbolic names. The value must be one of `members`.
    Symbol {
        /// Name of the enumeration, used in error messages.
        name: &'static str,
        /// Accepted member names.
        members: &'static [&'static str],
    },
    /// A conversion supplied by the schema author.
    Custom {
        /// Name of the target kind, used in error messages.
        name: &'static str,
        /// The conversion function.
        convert: ConvertFn,
    },
}

impl Conversion {
    /// Name of the target kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Text => "str",
            Self::Symbol { name, .. } | Self::Custom { name, .. } => *name,
        }
    }

    /// Convert `value` into this conversion's canonical form.
    pub fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        match self {
            Self::Int => to_int(value),
            Self::Float => to_float(value),
            Self::Bool => to_bool(value),
            Self::Text => to_text(value),
            Self::Symbol { members, .. } => match value {
                Value::String(s) if members.iter().any(|m| *m == s) => Ok(value.clone()),
                _ => Err(ConversionError::new(format!(
                    "expected one of: {}",
                    members.join(", ")
                ))),
            },
            Self::Custom { convert, .. } => convert(value),
        }
    }
}

impl std::fmt::Debug for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbol { name, members } => f
                .debug_struct("Symbol")
                .field("name", name)
                .field("members", members)
                .finish(),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
            Self::Int => f.write_str("Int"),
            Self::Float => f.write_str("Float"),
            Self::Bool => f.write_str("Bool"),
            Self::Text => f.write_str("Text"),
        }
    }
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn mismatch(expected: &str, value: &Value) -> ConversionError {
    ConversionError::new(format!("expected {expected}, found {}", type_name(value)))
}

fn to_int(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f)
                if f.is_finite()
                    && f.fract() == 0.0
                    && f >= i64::MIN as f64
                    && f < i64::MAX as f64 =>
            {
                Ok(Value::from(f as i64))
            }
            _ => Err(ConversionError::new(format!("{n} is not integral"))),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| ConversionError::new(e.to_string())),
        other => Err(mismatch("a number or numeric string", other)),
    }
}

fn to_float(value: &Value) -> Result<Value, ConversionError> {
    let f = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ConversionError::new(format!("{n} is not representable as float")))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| ConversionError::new(e.to_string()))?,
        other => return Err(mismatch("a number or numeric string", other)),
    };
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| ConversionError::new("non-finite float"))
}

fn to_bool(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
        Value::String(_) => Err(ConversionError::new("expected true or false")),
        other => Err(mismatch("a boolean", other)),
    }
}

fn to_text(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(mismatch("a scalar", other)),
    }
}

/// The kind of a single value.
#[derive(Debug, Clone, Copy)]
pub enum ScalarKind {
    /// A string, never converted.
    Text,
    /// An integer, never converted.
    Integer,
    /// A JSON object, never converted.
    Mapping,
    /// A kind reached by conversion.
    Converted(Conversion),
}

impl ScalarKind {
    /// Name of the kind, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Integer => "integer",
            Self::Mapping => "mapping",
            Self::Converted(conversion) => conversion.name(),
        }
    }

    /// The conversion attached to this kind, if it is a converted kind.
    pub fn conversion(&self) -> Option<&Conversion> {
        match self {
            Self::Converted(conversion) => Some(conversion),
            _ => None,
        }
    }

    /// Whether `value` is already an instance of a strict kind.
    ///
    /// Always `false` for converted kinds; those go through
    /// [`Conversion::convert`] instead.
    pub fn is_instance(&self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Mapping => value.is_object(),
            Self::Converted(_) => false,
        }
    }
}

impl From<Conversion> for ScalarKind {
    fn from(conversion: Conversion) -> Self {
        Self::Converted(conversion)
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The resolved kind of a field: one value, or a list of values.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A single value of the given kind.
    Scalar(ScalarKind),
    /// A sequence whose every element has the given kind.
    List(ScalarKind),
}

impl FieldKind {
    /// Name of the declared kind; `"list"` for list fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.name(),
            Self::List(_) => "list",
        }
    }

    /// Whether this is a list field.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

/// The declared type of a field as written by the schema author.
///
/// `List` only becomes a [`FieldKind`] once an element kind is supplied;
/// see [`FieldBuilder::build`](crate::FieldBuilder::build).
#[derive(Debug, Clone, Copy)]
pub enum DeclaredType {
    /// A single value of the given kind.
    Scalar(ScalarKind),
    /// A sequence; requires an element type.
    List,
}

impl Default for DeclaredType {
    fn default() -> Self {
        Self::Scalar(ScalarKind::Text)
    }
}

impl From<ScalarKind> for DeclaredType {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<Conversion> for DeclaredType {
    fn from(conversion: Conversion) -> Self {
        Self::Scalar(ScalarKind::Converted(conversion))
    }
}
