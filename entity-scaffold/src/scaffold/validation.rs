//! Boundary validation for entities
//!
//! The generators accept any [`Entity`] and never fail. Everything that would
//! make the generated text wrong or injectable is rejected here, before the
//! entity reaches them.

use super::entity::Entity;
use super::helpers::NamingHelpers;
use crate::error::{Result, ScaffoldError};
use std::collections::HashSet;

/// Name of the surrogate key every table and record type receives
pub const ID_COLUMN: &str = "id";

/// Go property holding the surrogate key on the record type
pub const ID_PROPERTY: &str = "ID";

/// PostgreSQL keywords that cannot be used as unquoted table or column names
pub const RESERVED_KEYWORDS: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
    "authorization", "binary", "both", "case", "cast", "check", "collate", "collation",
    "column", "concurrently", "constraint", "create", "cross", "current_catalog",
    "current_date", "current_role", "current_schema", "current_time", "current_timestamp",
    "current_user", "default", "deferrable", "desc", "distinct", "do", "else", "end",
    "except", "false", "fetch", "for", "foreign", "freeze", "from", "full", "grant", "group",
    "having", "ilike", "in", "initially", "inner", "intersect", "into", "is", "isnull", "join",
    "lateral", "leading", "left", "like", "limit", "localtime", "localtimestamp", "natural",
    "not", "notnull", "null", "offset", "on", "only", "or", "order", "outer", "overlaps",
    "placing", "primary", "references", "returning", "right", "select", "session_user",
    "similar", "some", "symmetric", "system_user", "table", "tablesample", "then", "to",
    "trailing", "true", "union", "unique", "user", "using", "variadic", "verbose", "when",
    "where", "window", "with",
];

/// Knobs for [`Entity::validate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject unknown field types instead of falling back to `UUID` / `interface{}`
    pub strict_types: bool,
}

impl ValidationOptions {
    /// Options that reject unknown field types
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict_types: true }
    }
}

impl Entity {
    /// Check that this entity produces well-formed, non-injectable output
    ///
    /// # Errors
    ///
    /// Returns the first problem found:
    /// - [`ScaffoldError::InvalidEntity`] for an entity name not starting with an
    ///   uppercase letter, a field name not starting with a letter, a foreign
    ///   key without a target, or `min` greater than `max`
    /// - [`ScaffoldError::UnsafeIdentifier`] for a table, field or referenced
    ///   table name that is not a plain identifier
    /// - [`ScaffoldError::ReservedKeyword`] for a table, field or referenced
    ///   table name that is a PostgreSQL reserved keyword
    /// - [`ScaffoldError::ReservedFieldName`] for a field whose column or Go
    ///   property name collides with `id`/`ID` or an implicit column/property
    ///   this entity emits (`createdAt` clashes with `CreatedAt`)
    /// - [`ScaffoldError::DuplicateField`] for a repeated field name
    /// - [`ScaffoldError::UnsafePattern`] for a pattern containing quotes,
    ///   backticks or line breaks
    /// - [`ScaffoldError::UnknownIndexField`] for an index over a missing column
    /// - [`ScaffoldError::UnknownFieldType`] for an unknown type in strict mode
    pub fn validate(&self, options: &ValidationOptions) -> Result<()> {
        if !self.name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            return Err(ScaffoldError::InvalidEntity(format!(
                "entity name '{}' must start with an uppercase letter",
                self.name
            )));
        }
        if !NamingHelpers::is_identifier(&self.name) {
            return Err(ScaffoldError::UnsafeIdentifier {
                context: "entity name",
                value: self.name.clone(),
            });
        }
        if !NamingHelpers::is_identifier(&self.table_name) {
            return Err(ScaffoldError::UnsafeIdentifier {
                context: "table name",
                value: self.table_name.clone(),
            });
        }
        check_keyword("table name", &self.table_name)?;

        let implicit = self.implicit_columns();
        let mut seen = HashSet::new();

        for field in &self.fields {
            self.validate_field_name(&field.name, &implicit)?;

            if !seen.insert(field.name.to_ascii_lowercase()) {
                return Err(ScaffoldError::DuplicateField(field.name.clone()));
            }

            if field.is_fk {
                let target = field.fk_target().ok_or_else(|| {
                    ScaffoldError::InvalidEntity(format!(
                        "field '{}' is a foreign key but names no referenced table",
                        field.name
                    ))
                })?;
                if !NamingHelpers::is_identifier(target) {
                    return Err(ScaffoldError::UnsafeIdentifier {
                        context: "referenced table",
                        value: target.to_string(),
                    });
                }
                check_keyword("referenced table", target)?;
            }

            if let Some(pattern) = field.validations.pattern() {
                if pattern.contains(['"', '`']) {
                    return Err(ScaffoldError::UnsafePattern {
                        field: field.name.clone(),
                        reason: "quotes and backticks would terminate the struct tag",
                    });
                }
                if pattern.contains(['\n', '\r']) {
                    return Err(ScaffoldError::UnsafePattern {
                        field: field.name.clone(),
                        reason: "line breaks are not allowed",
                    });
                }
            }

            if let (Some(min), Some(max)) = (field.validations.min, field.validations.max) {
                if min > max {
                    return Err(ScaffoldError::InvalidEntity(format!(
                        "field '{}' has min {min} greater than max {max}",
                        field.name
                    )));
                }
            }

            if !field.field_type.is_known() {
                if options.strict_types {
                    return Err(ScaffoldError::UnknownFieldType {
                        field: field.name.clone(),
                        field_type: field.field_type.to_string(),
                    });
                }
                tracing::warn!(
                    entity = %self.name,
                    field = %field.name,
                    field_type = %field.field_type,
                    "unknown field type, falling back to UUID / interface{{}}"
                );
            }
        }

        for index in &self.indexes {
            if index.fields.is_empty() {
                return Err(ScaffoldError::InvalidEntity(format!(
                    "index on '{}' has no columns",
                    self.table_name
                )));
            }
            for column in &index.fields {
                let known = column == ID_COLUMN
                    || implicit.iter().any(|c| *c == column.as_str())
                    || self.fields.iter().any(|f| &f.name == column);
                if !known {
                    return Err(ScaffoldError::UnknownIndexField {
                        column: column.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_field_name(&self, name: &str, implicit: &[&str]) -> Result<()> {
        if !NamingHelpers::is_identifier(name) {
            return Err(ScaffoldError::UnsafeIdentifier {
                context: "field name",
                value: name.to_string(),
            });
        }
        // Property names must be exported Go identifiers
        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(ScaffoldError::InvalidEntity(format!(
                "field name '{name}' must start with a letter"
            )));
        }
        check_keyword("field name", name)?;

        let property = NamingHelpers::capitalize_first(name);
        let reserved = name.eq_ignore_ascii_case(ID_COLUMN)
            || implicit.iter().any(|c| name.eq_ignore_ascii_case(c))
            || property == ID_PROPERTY
            || self.implicit_properties().iter().any(|p| *p == property);
        if reserved {
            tracing::debug!(entity = %self.name, field = name, "field name collides with generated column");
            return Err(ScaffoldError::ReservedFieldName(name.to_string()));
        }
        Ok(())
    }
}

fn check_keyword(context: &'static str, value: &str) -> Result<()> {
    let lowered = value.to_ascii_lowercase();
    if RESERVED_KEYWORDS.iter().any(|k| *k == lowered) {
        return Err(ScaffoldError::ReservedKeyword {
            context,
            value: value.to_string(),
        });
    }
    Ok(())
}
