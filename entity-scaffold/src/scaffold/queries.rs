//! Parameterized CRUD query generation (sqlc annotation style)
//!
//! The suite is always emitted in the same order:
//! 1. `Create<E>`
//! 2. `Get<E>ByID`
//! 3. `List<E>s`
//! 4. `Update<E>`
//! 5. `Delete<E>` (soft delete only)
//! 6. `Get<E>By<Field>` for every unique field
//!
//! Placeholders follow field declaration order. In `Update<E>` `$1` is the
//! row id, so the `SET` placeholders start at `$2`.

use super::entity::Entity;
use super::helpers::NamingHelpers;
use std::fmt;

const NOT_DELETED: &str = "deleted_at IS NULL";

/// sqlc result cardinality annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Returns exactly one row
    One,
    /// Returns any number of rows
    Many,
    /// Returns no rows
    Exec,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, ":one"),
            Self::Many => write!(f, ":many"),
            Self::Exec => write!(f, ":exec"),
        }
    }
}

/// One named statement of the query suite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
    /// Query name, e.g. `GetUserByEmail`
    pub name: String,
    /// Result cardinality
    pub kind: QueryKind,
    /// Statement text, ending in `;`
    pub sql: String,
}

impl fmt::Display for NamedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-- name: {} {}\n{}", self.name, self.kind, self.sql)
    }
}

/// Generate the full query suite as one text block
///
/// Statements are separated by a blank line and the text ends with a newline.
#[must_use]
pub fn generate_queries(entity: &Entity) -> String {
    let blocks: Vec<String> = build_queries(entity)
        .iter()
        .map(ToString::to_string)
        .collect();
    format!("{}\n", blocks.join("\n\n"))
}

/// Build the query suite as structured statements
#[must_use]
pub fn build_queries(entity: &Entity) -> Vec<NamedQuery> {
    let mut queries = vec![
        create_query(entity),
        get_by_id_query(entity),
        list_query(entity),
        update_query(entity),
    ];

    if entity.is_soft_delete {
        queries.push(delete_query(entity));
    }

    queries.extend(entity.unique_fields().map(|field| {
        let mut lines = vec![
            format!("SELECT * FROM {}", entity.table_name),
            format!("WHERE {} = $1", field.name),
        ];
        if entity.is_soft_delete {
            lines.push(format!("AND {NOT_DELETED}"));
        }
        NamedQuery {
            name: format!(
                "Get{}By{}",
                entity.name,
                NamingHelpers::capitalize_first(&field.name)
            ),
            kind: QueryKind::One,
            sql: terminate(&lines),
        }
    }));

    queries
}

fn create_query(entity: &Entity) -> NamedQuery {
    let columns: Vec<&str> = entity.fields.iter().map(|f| f.name.as_str()).collect();
    let placeholders: Vec<String> = (1..=entity.fields.len()).map(|i| format!("${i}")).collect();

    let lines = [
        format!("INSERT INTO {} (", entity.table_name),
        format!("  {}", columns.join(", ")),
        ") VALUES (".to_string(),
        format!("  {}", placeholders.join(", ")),
        ") RETURNING *".to_string(),
    ];

    NamedQuery {
        name: format!("Create{}", entity.name),
        kind: QueryKind::One,
        sql: terminate(&lines),
    }
}

fn get_by_id_query(entity: &Entity) -> NamedQuery {
    let mut lines = vec![
        format!("SELECT * FROM {}", entity.table_name),
        "WHERE id = $1".to_string(),
    ];
    if entity.is_soft_delete {
        lines.push(format!("AND {NOT_DELETED}"));
    }

    NamedQuery {
        name: format!("Get{}ByID", entity.name),
        kind: QueryKind::One,
        sql: terminate(&lines),
    }
}

fn list_query(entity: &Entity) -> NamedQuery {
    let mut lines = vec![format!("SELECT * FROM {}", entity.table_name)];
    if entity.is_soft_delete {
        lines.push(format!("WHERE {NOT_DELETED}"));
    }
    lines.push("ORDER BY created_at DESC".to_string());
    lines.push("LIMIT $1 OFFSET $2".to_string());

    NamedQuery {
        name: format!("List{}", NamingHelpers::pluralize(&entity.name)),
        kind: QueryKind::Many,
        sql: terminate(&lines),
    }
}

fn update_query(entity: &Entity) -> NamedQuery {
    let mut assignments: Vec<String> = entity
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| format!("  {name} = COALESCE(${n}, {name})", name = field.name, n = i + 2))
        .collect();
    if entity.time_stamps {
        assignments.push("  updated_at = CURRENT_TIMESTAMP".to_string());
    }

    let mut lines = vec![
        format!("UPDATE {}", entity.table_name),
        "SET".to_string(),
        assignments.join(",\n"),
        "WHERE id = $1".to_string(),
    ];
    if entity.is_soft_delete {
        lines.push(format!("AND {NOT_DELETED}"));
    }
    lines.push("RETURNING *".to_string());

    NamedQuery {
        name: format!("Update{}", entity.name),
        kind: QueryKind::One,
        sql: terminate(&lines),
    }
}

fn delete_query(entity: &Entity) -> NamedQuery {
    let mut assignments = vec!["  deleted_at = CURRENT_TIMESTAMP".to_string()];
    if entity.audited {
        assignments.push("  deleted_by = $2".to_string());
    }

    let lines = [
        format!("UPDATE {}", entity.table_name),
        "SET".to_string(),
        assignments.join(",\n"),
        "WHERE id = $1".to_string(),
        format!("AND {NOT_DELETED}"),
    ];

    NamedQuery {
        name: format!("Delete{}", entity.name),
        kind: QueryKind::Exec,
        sql: terminate(&lines),
    }
}

fn terminate(lines: &[String]) -> String {
    format!("{};", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::{Field, FieldType};

    fn user() -> Entity {
        Entity::new("User", "users")
            .with_field(Field::new("email", FieldType::String).required().unique())
            .with_field(Field::new("name", FieldType::String))
            .with_field(Field::new("age", FieldType::Int))
    }

    fn query<'a>(queries: &'a [NamedQuery], name: &str) -> &'a NamedQuery {
        queries
            .iter()
            .find(|q| q.name == name)
            .unwrap_or_else(|| panic!("missing query {name}"))
    }

    #[test]
    fn test_create_placeholders() {
        let queries = build_queries(&user());
        assert_eq!(
            query(&queries, "CreateUser").sql,
            "INSERT INTO users (\n  email, name, age\n) VALUES (\n  $1, $2, $3\n) RETURNING *;"
        );
    }

    #[test]
    fn test_update_placeholders_start_at_two() {
        let entity = user().with_timestamps(true);
        let queries = build_queries(&entity);
        assert_eq!(
            query(&queries, "UpdateUser").sql,
            "UPDATE users\nSET\n  email = COALESCE($2, email),\n  name = COALESCE($3, name),\n  age = COALESCE($4, age),\n  updated_at = CURRENT_TIMESTAMP\nWHERE id = $1\nRETURNING *;"
        );
    }

    #[test]
    fn test_suite_order_without_soft_delete() {
        let names: Vec<String> = build_queries(&user()).into_iter().map(|q| q.name).collect();
        assert_eq!(
            names,
            vec!["CreateUser", "GetUserByID", "ListUsers", "UpdateUser", "GetUserByEmail"]
        );
    }

    #[test]
    fn test_soft_delete_filters() {
        let entity = user().with_soft_delete(true);
        let queries = build_queries(&entity);

        assert_eq!(
            query(&queries, "GetUserByID").sql,
            "SELECT * FROM users\nWHERE id = $1\nAND deleted_at IS NULL;"
        );
        assert_eq!(
            query(&queries, "ListUsers").sql,
            "SELECT * FROM users\nWHERE deleted_at IS NULL\nORDER BY created_at DESC\nLIMIT $1 OFFSET $2;"
        );
        assert_eq!(
            query(&queries, "DeleteUser").sql,
            "UPDATE users\nSET\n  deleted_at = CURRENT_TIMESTAMP\nWHERE id = $1\nAND deleted_at IS NULL;"
        );
        assert_eq!(query(&queries, "DeleteUser").kind, QueryKind::Exec);
        assert_eq!(
            query(&queries, "GetUserByEmail").sql,
            "SELECT * FROM users\nWHERE email = $1\nAND deleted_at IS NULL;"
        );
    }

    #[test]
    fn test_audited_delete_records_actor() {
        let entity = user().with_soft_delete(true).with_audit(true);
        let queries = build_queries(&entity);
        assert_eq!(
            query(&queries, "DeleteUser").sql,
            "UPDATE users\nSET\n  deleted_at = CURRENT_TIMESTAMP,\n  deleted_by = $2\nWHERE id = $1\nAND deleted_at IS NULL;"
        );
    }

    #[test]
    fn test_no_soft_delete_no_delete_query() {
        let text = generate_queries(&user().with_audit(true));
        assert!(!text.contains("deleted_at"));
        assert!(!text.contains("DeleteUser"));
    }

    #[test]
    fn test_rendered_layout() {
        let entity = Entity::new("Tag", "tags")
            .with_field(Field::new("label", FieldType::String).unique());
        let expected = "\
-- name: CreateTag :one
INSERT INTO tags (
  label
) VALUES (
  $1
) RETURNING *;

-- name: GetTagByID :one
SELECT * FROM tags
WHERE id = $1;

-- name: ListTags :many
SELECT * FROM tags
ORDER BY created_at DESC
LIMIT $1 OFFSET $2;

-- name: UpdateTag :one
UPDATE tags
SET
  label = COALESCE($2, label)
WHERE id = $1
RETURNING *;

-- name: GetTagByLabel :one
SELECT * FROM tags
WHERE label = $1;
";
        assert_eq!(generate_queries(&entity), expected);
    }

    #[test]
    fn test_unique_query_uses_full_capitalized_name() {
        let entity = Entity::new("Account", "accounts")
            .with_field(Field::new("userName", FieldType::String).unique());
        let queries = build_queries(&entity);
        assert!(queries.iter().any(|q| q.name == "GetAccountByUserName"));
    }
}
