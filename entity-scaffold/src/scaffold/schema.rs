//! `CREATE TABLE` / `CREATE INDEX` generation
//!
//! Column definitions are collected first and joined with `,\n`, so the last
//! column never carries a trailing comma no matter which implicit columns
//! are enabled.

use super::entity::{Entity, Field, Index};

const TIMESTAMP_COLUMN: &str = "TIMESTAMP WITH TIME ZONE";
const AUDIT_COLUMN: &str = "INTEGER REFERENCES users(id)";
const INDENT: &str = "  ";

/// Generate the DDL for one table and its indexes
///
/// # Examples
///
/// ```
/// # use entity_scaffold::scaffold::{generate_schema, Entity, Field, FieldType};
/// let entity = Entity::new("Tag", "tags")
///     .with_field(Field::new("label", FieldType::String).required().unique());
///
/// assert_eq!(
///     generate_schema(&entity),
///     "CREATE TABLE tags (\n  id SERIAL PRIMARY KEY,\n  label TEXT NOT NULL UNIQUE\n);"
/// );
/// ```
#[must_use]
pub fn generate_schema(entity: &Entity) -> String {
    let columns = column_definitions(entity);

    let mut lines = Vec::with_capacity(3 + entity.indexes.len());
    lines.push(format!("CREATE TABLE {} (", entity.table_name));
    lines.push(
        columns
            .iter()
            .map(|column| format!("{INDENT}{column}"))
            .collect::<Vec<_>>()
            .join(",\n"),
    );
    lines.push(");".to_string());

    lines.extend(
        entity
            .indexes
            .iter()
            .map(|index| index_statement(&entity.table_name, index)),
    );

    lines.join("\n")
}

/// Column definitions in table order, without separators
///
/// Surrogate key first, then user fields in declaration order, then the
/// implicit timestamp, soft-delete and audit columns.
#[must_use]
pub fn column_definitions(entity: &Entity) -> Vec<String> {
    let mut columns = vec!["id SERIAL PRIMARY KEY".to_string()];
    columns.extend(entity.fields.iter().map(field_column));

    if entity.time_stamps {
        columns.push(format!("created_at {TIMESTAMP_COLUMN} DEFAULT CURRENT_TIMESTAMP"));
        columns.push(format!("updated_at {TIMESTAMP_COLUMN} DEFAULT CURRENT_TIMESTAMP"));
    }

    if entity.is_soft_delete {
        columns.push(format!("deleted_at {TIMESTAMP_COLUMN}"));
    }

    if entity.audited {
        columns.push(format!("created_by {AUDIT_COLUMN}"));
        columns.push(format!("updated_by {AUDIT_COLUMN}"));
        if entity.tracks_deleted_by() {
            columns.push(format!("deleted_by {AUDIT_COLUMN}"));
        }
    }

    columns
}

fn field_column(field: &Field) -> String {
    let mut column = format!("{} {}", field.name, field.field_type.schema_type());
    if field.is_required {
        column.push_str(" NOT NULL");
    }
    if field.is_unique {
        column.push_str(" UNIQUE");
    }
    if let Some(target) = field.fk_target() {
        column.push_str(&format!(" REFERENCES {target}(id)"));
    }
    column
}

fn index_statement(table: &str, index: &Index) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };
    let name = format!("idx_{table}_{}", index.fields.join("_"));
    let columns = index.fields.join(", ");
    format!("CREATE {unique}INDEX {name} ON {table}({columns});")
}
