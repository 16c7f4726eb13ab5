//! # Built-in Metadata Schemas
//!
//! Field definitions for the submission metadata records the CLI can check,
//! and the `metaval schemas` listing.

use std::fmt;

use anyhow::Result;
use clap::ValueEnum;
use metaval_core::{Conversion, DeclaredType, Field, FieldKind, ScalarKind, SchemaError};
use metaval_schema::{validate_email, validate_http_url, validate_md5};

const CHALLENGE: Conversion = Conversion::Symbol {
    name: "Challenge",
    members: &["iso_detect_ref", "iso_quant", "iso_detect_de_novo"],
};

const DATA_CATEGORY: Conversion = Conversion::Symbol {
    name: "DataCategory",
    members: &["long_only", "long_short", "freestyle"],
};

const LIBRARY_PREP: Conversion = Conversion::Symbol {
    name: "LibraryPrep",
    members: &["CapTrap", "R2C2", "dRNA", "cDNA"],
};

const PLATFORM: Conversion = Conversion::Symbol {
    name: "Platform",
    members: &["Illumina", "PacBio", "ONT"],
};

const SPECIES: Conversion = Conversion::Symbol {
    name: "Species",
    members: &["human", "mouse", "manatee"],
};

/// A built-in schema selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaName {
    /// Challenge entry metadata.
    Entry,
    /// Experiment metadata.
    Experiment,
}

impl SchemaName {
    /// All built-in schemas, in listing order.
    pub const ALL: [SchemaName; 2] = [SchemaName::Entry, SchemaName::Experiment];

    /// Label used as the error-message description.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Experiment => "experiment",
        }
    }

    /// Build the field definitions for this schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if a definition is malformed.
    pub fn fields(&self) -> Result<Vec<Field>, SchemaError> {
        match self {
            Self::Entry => entry_fields(),
            Self::Experiment => experiment_fields(),
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn symbol_list(name: &str, element: Conversion) -> Result<Field, SchemaError> {
    Field::builder(name)
        .declared_type(DeclaredType::List)
        .element_type(element)
        .build()
}

/// Fields of a challenge entry record.
pub fn entry_fields() -> Result<Vec<Field>, SchemaError> {
    Ok(vec![
        Field::text("entry_id"),
        Field::builder("challenge_id").declared_type(CHALLENGE).build()?,
        Field::text("team_id"),
        Field::builder("data_category")
            .declared_type(DATA_CATEGORY)
            .build()?,
        Field::list("samples", ScalarKind::Text),
        symbol_list("library_preps", LIBRARY_PREP)?,
        symbol_list("platforms", PLATFORM)?,
        Field::list("experiment_ids", ScalarKind::Text),
        Field::builder("notes").allow_empty(true).optional(true).build()?,
    ])
}

/// Fields of an experiment record.
pub fn experiment_fields() -> Result<Vec<Field>, SchemaError> {
    Ok(vec![
        Field::text("experiment_id"),
        Field::builder("challenge_id").declared_type(CHALLENGE).build()?,
        Field::text("description"),
        Field::builder("species").declared_type(SPECIES).build()?,
        Field::builder("data_category")
            .declared_type(DATA_CATEGORY)
            .build()?,
        Field::list("libraries", ScalarKind::Text),
        Field::builder("md5").validator(validate_md5).build()?,
        Field::builder("units")
            .declared_type(DeclaredType::List)
            .element_type(ScalarKind::Text)
            .optional(true)
            .build()?,
        Field::builder("software")
            .declared_type(DeclaredType::List)
            .element_type(ScalarKind::Mapping)
            .optional(true)
            .build()?,
        Field::builder("contact").validator(validate_email).build()?,
        Field::builder("url")
            .validator(validate_http_url)
            .optional(true)
            .build()?,
        Field::builder("notes").allow_empty(true).optional(true).build()?,
    ])
}

/// One-line description of a field for the schema listing.
pub fn describe_field(field: &Field) -> String {
    let kind = match field.kind() {
        FieldKind::Scalar(kind) => kind.name().to_string(),
        FieldKind::List(element) => format!("list of {}", element.name()),
    };
    let mut flags = Vec::new();
    if field.optional() {
        flags.push("optional");
    }
    if field.allow_empty() {
        flags.push("allow-empty");
    }
    if field.validator().is_some() {
        flags.push("validated");
    }
    if flags.is_empty() {
        format!("{}: {kind}", field.name())
    } else {
        format!("{}: {kind} ({})", field.name(), flags.join(", "))
    }
}

/// Execute the `schemas` subcommand: list every built-in schema.
pub fn run_schemas() -> Result<u8> {
    for schema in SchemaName::ALL {
        println!("{schema}:");
        for field in schema.fields()? {
            println!("  {}", describe_field(&field));
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_schemas_build() {
        for schema in SchemaName::ALL {
            let fields = schema.fields().unwrap();
            assert!(!fields.is_empty(), "{schema} has no fields");
        }
    }

    #[test]
    fn builtin_field_names_are_unique() {
        for schema in SchemaName::ALL {
            let fields = schema.fields().unwrap();
            let mut names: Vec<&str> = fields.iter().map(Field::name).collect();
            names.sort_unstable();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "{schema} repeats a field name");
        }
    }

    #[test]
    fn describe_field_lists_flags() {
        let fields = experiment_fields().unwrap();
        let url = fields.iter().find(|f| f.name() == "url").unwrap();
        assert_eq!(describe_field(url), "url: string (optional, validated)");
        let software = fields.iter().find(|f| f.name() == "software").unwrap();
        assert_eq!(describe_field(software), "software: list of mapping (optional)");
        let species = fields.iter().find(|f| f.name() == "species").unwrap();
        assert_eq!(describe_field(species), "species: Species");
    }
}
