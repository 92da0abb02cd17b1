//! Entity and field descriptors
//!
//! An [`Entity`] is the declarative description every generator consumes.
//! It decodes from the camelCase JSON produced by the entity form
//! (`tableName`, `isRequired`, `timeStamps`, ...) and can also be assembled
//! from field spec strings on the command line.
//!
//! # Field spec format
//!
//! ```text
//! name:type[:modifier]*
//!
//! email:string:required:unique:email
//! age:int:min=18:max=130
//! owner_id:bigint:required:fk=users
//! slug:string:pattern=^[a-z0-9-]+$
//! ```
//!
//! `pattern=` must be the last modifier; it consumes the rest of the spec so
//! the expression may itself contain `:`.

use super::field_type::FieldType;
use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional value constraints attached to a field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Validations {
    /// Minimum value / length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum value / length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression the value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Value must be an email address
    #[serde(default)]
    pub email: bool,
}

impl Validations {
    /// Pattern, treating an empty string as absent
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }
}

/// One column/property descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Column name, used verbatim in generated identifiers
    pub name: String,
    /// Logical type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Column is `NOT NULL`
    #[serde(default)]
    pub is_required: bool,
    /// Column is `UNIQUE` (also yields a `Get<E>By<Field>` query)
    #[serde(default)]
    pub is_unique: bool,
    /// Column is a foreign key
    #[serde(default)]
    pub is_fk: bool,
    /// Referenced table when `is_fk` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    /// Value constraints
    #[serde(default)]
    pub validations: Validations,
}

impl Field {
    /// Create a plain optional field
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            is_required: false,
            is_unique: false,
            is_fk: false,
            references: None,
            validations: Validations::default(),
        }
    }

    /// Mark the field `NOT NULL`
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Mark the field `UNIQUE`
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Make the field a foreign key to `table`
    #[must_use]
    pub fn references(mut self, table: impl Into<String>) -> Self {
        self.is_fk = true;
        self.references = Some(table.into());
        self
    }

    /// Set the minimum constraint
    #[must_use]
    pub const fn with_min(mut self, min: f64) -> Self {
        self.validations.min = Some(min);
        self
    }

    /// Set the maximum constraint
    #[must_use]
    pub const fn with_max(mut self, max: f64) -> Self {
        self.validations.max = Some(max);
        self
    }

    /// Require the value to match `pattern`
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.validations.pattern = Some(pattern.into());
        self
    }

    /// Require the value to be an email address
    #[must_use]
    pub const fn email(mut self) -> Self {
        self.validations.email = true;
        self
    }

    /// Foreign key target, if this field is a foreign key with a named target
    #[must_use]
    pub fn fk_target(&self) -> Option<&str> {
        if !self.is_fk {
            return None;
        }
        self.references.as_deref().filter(|t| !t.is_empty())
    }

    /// Parse a field from a spec string
    ///
    /// Format: `name:type[:modifier]*`
    ///
    /// # Examples
    ///
    /// ```
    /// # use entity_scaffold::scaffold::{Field, FieldType};
    /// let field = Field::parse("email:string:required:unique").unwrap();
    /// assert_eq!(field.name, "email");
    /// assert_eq!(field.field_type, FieldType::String);
    /// assert!(field.is_required && field.is_unique);
    ///
    /// let field = Field::parse("owner_id:bigint:fk=users").unwrap();
    /// assert_eq!(field.fk_target(), Some("users"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidFieldSpec`] if:
    /// - The spec has fewer than 2 parts (missing name or type)
    /// - The name or type is empty
    /// - A modifier is unknown or is missing its value
    /// - `min`/`max` is not a number
    pub fn parse(input: &str) -> Result<Self> {
        let (head, pattern) = match input.find(":pattern=") {
            Some(pos) => (&input[..pos], Some(&input[pos + ":pattern=".len()..])),
            None => (input, None),
        };

        let parts: Vec<&str> = head.split(':').collect();
        if parts.len() < 2 {
            return Err(ScaffoldError::InvalidFieldSpec(format!(
                "'{input}'. Expected format: name:type[:modifiers]"
            )));
        }

        let name = parts[0].trim();
        if name.is_empty() {
            return Err(ScaffoldError::InvalidFieldSpec(format!(
                "'{input}'. Field name cannot be empty"
            )));
        }

        let type_str = parts[1].trim();
        if type_str.is_empty() {
            return Err(ScaffoldError::InvalidFieldSpec(format!(
                "'{input}'. Field type cannot be empty"
            )));
        }

        let mut field = Self::new(name, FieldType::parse(type_str));

        for modifier in parts.iter().skip(2).map(|m| m.trim()) {
            let (key, value) = match modifier.split_once('=') {
                Some((key, value)) => (key.trim().to_lowercase(), Some(value.trim())),
                None => (modifier.to_lowercase(), None),
            };

            match (key.as_str(), value) {
                ("required", None) => field.is_required = true,
                ("unique", None) => field.is_unique = true,
                ("email", None) => field.validations.email = true,
                ("fk" | "references", Some(table)) if !table.is_empty() => {
                    field.is_fk = true;
                    field.references = Some(table.to_string());
                }
                ("min", Some(raw)) => field.validations.min = Some(parse_bound(input, "min", raw)?),
                ("max", Some(raw)) => field.validations.max = Some(parse_bound(input, "max", raw)?),
                _ => {
                    return Err(ScaffoldError::InvalidFieldSpec(format!(
                        "unknown modifier '{modifier}' in '{input}'. Valid modifiers: required, unique, email, fk=<table>, min=<n>, max=<n>, pattern=<regex>"
                    )));
                }
            }
        }

        if let Some(pattern) = pattern {
            field.validations.pattern = Some(pattern.to_string());
        }

        Ok(field)
    }
}

fn parse_bound(input: &str, key: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            ScaffoldError::InvalidFieldSpec(format!(
                "'{key}={raw}' in '{input}' is not a number"
            ))
        })
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.field_type)?;
        if self.is_required {
            write!(f, ":required")?;
        }
        if self.is_unique {
            write!(f, ":unique")?;
        }
        if let Some(table) = self.fk_target() {
            write!(f, ":fk={table}")?;
        }
        if let Some(min) = self.validations.min {
            write!(f, ":min={min}")?;
        }
        if let Some(max) = self.validations.max {
            write!(f, ":max={max}")?;
        }
        if self.validations.email {
            write!(f, ":email")?;
        }
        if let Some(pattern) = self.validations.pattern() {
            write!(f, ":pattern={pattern}")?;
        }
        Ok(())
    }
}

/// A secondary index over one or more columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Indexed column names, in order
    pub fields: Vec<String>,
    /// `CREATE UNIQUE INDEX` instead of `CREATE INDEX`
    #[serde(default)]
    pub unique: bool,
}

impl Index {
    /// Create a non-unique index over `fields`
    #[must_use]
    pub fn on<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            unique: false,
        }
    }

    /// Make the index unique
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// One table/resource descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Logical name, used for Go type and query names (e.g. `User`)
    pub name: String,
    /// Physical table name (e.g. `users`)
    pub table_name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Add `created_at` / `updated_at`
    #[serde(default)]
    pub time_stamps: bool,
    /// Add `deleted_at` and soft-delete filtering
    #[serde(default)]
    pub is_soft_delete: bool,
    /// Add `created_by` / `updated_by` (and `deleted_by` with soft delete)
    #[serde(default)]
    pub audited: bool,
    /// Secondary indexes in declaration order
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl Entity {
    /// Create an entity with no fields and every implicit column disabled
    #[must_use]
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            fields: Vec::new(),
            time_stamps: false,
            is_soft_delete: false,
            audited: false,
            indexes: Vec::new(),
        }
    }

    /// Decode an entity from its JSON representation
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Json`] if the input is not a valid entity document.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Append a field
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Toggle `created_at` / `updated_at`
    #[must_use]
    pub const fn with_timestamps(mut self, enabled: bool) -> Self {
        self.time_stamps = enabled;
        self
    }

    /// Toggle soft delete
    #[must_use]
    pub const fn with_soft_delete(mut self, enabled: bool) -> Self {
        self.is_soft_delete = enabled;
        self
    }

    /// Toggle audit columns
    #[must_use]
    pub const fn with_audit(mut self, enabled: bool) -> Self {
        self.audited = enabled;
        self
    }

    /// Append an index
    #[must_use]
    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Whether `deleted_by` is emitted (audited and soft-deleted)
    #[must_use]
    pub const fn tracks_deleted_by(&self) -> bool {
        self.audited && self.is_soft_delete
    }

    /// Names of the implicit columns this entity emits, in schema order
    ///
    /// The surrogate `id` key is not included.
    #[must_use]
    pub fn implicit_columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        if self.time_stamps {
            columns.extend(["created_at", "updated_at"]);
        }
        if self.is_soft_delete {
            columns.push("deleted_at");
        }
        if self.audited {
            columns.extend(["created_by", "updated_by"]);
        }
        if self.tracks_deleted_by() {
            columns.push("deleted_by");
        }
        columns
    }

    /// Go properties the record type gets for the implicit columns, in order
    ///
    /// Gated exactly like [`Entity::implicit_columns`].
    #[must_use]
    pub fn implicit_properties(&self) -> Vec<&'static str> {
        self.implicit_columns()
            .into_iter()
            .map(|column| match column {
                "created_at" => "CreatedAt",
                "updated_at" => "UpdatedAt",
                "deleted_at" => "DeletedAt",
                "created_by" => "CreatedBy",
                "updated_by" => "UpdatedBy",
                _ => "DeletedBy",
            })
            .collect()
    }

    /// Fields marked unique, in declaration order
    pub fn unique_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_unique)
    }
}
