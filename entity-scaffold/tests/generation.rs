//! End-to-end generation tests over entity JSON documents

use entity_scaffold::prelude::*;
use entity_scaffold::scaffold::build_queries;

const USER_JSON: &str = r#"{
    "name": "User",
    "tableName": "users",
    "fields": [
        {"name": "email", "type": "string", "isRequired": true, "isUnique": true, "isFk": false}
    ],
    "timeStamps": true,
    "isSoftDelete": true,
    "audited": false
}"#;

fn generate(json: &str) -> GeneratedArtifacts {
    let entity = Entity::from_json(json).unwrap();
    ScaffoldGenerator::new(entity, GenerationOptions::default())
        .unwrap()
        .generate()
}

fn table_body(schema: &str) -> Vec<&str> {
    let lines: Vec<&str> = schema.lines().collect();
    let close = lines.iter().position(|l| *l == ");").unwrap();
    lines[1..close].iter().copied().filter(|l| !l.trim().is_empty()).collect()
}

#[test]
fn test_user_example_schema() {
    let artifacts = generate(USER_JSON);
    let body = table_body(&artifacts.schema);

    assert_eq!(
        body,
        vec![
            "  id SERIAL PRIMARY KEY,",
            "  email TEXT NOT NULL UNIQUE,",
            "  created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,",
            "  updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,",
            "  deleted_at TIMESTAMP WITH TIME ZONE",
        ]
    );

    let email = body.iter().position(|l| l.contains("email TEXT")).unwrap();
    let deleted = body.iter().position(|l| l.contains("deleted_at")).unwrap();
    assert!(email < deleted);
    assert_eq!(deleted, body.len() - 1);
    assert_eq!(artifacts.schema.matches(");").count(), 1);
    assert!(!artifacts.schema.contains(",\n);"));
}

#[test]
fn test_user_example_queries() {
    let artifacts = generate(USER_JSON);

    assert_eq!(artifacts.queries.matches("-- name: GetUserByEmail ").count(), 1);
    assert_eq!(artifacts.queries.matches("-- name: DeleteUser ").count(), 1);

    let entity = Entity::from_json(USER_JSON).unwrap();
    let queries = build_queries(&entity);
    let delete = queries.iter().find(|q| q.name == "DeleteUser").unwrap();
    assert!(delete.sql.contains("deleted_at IS NULL"));
    assert!(!delete.sql.contains("deleted_by"));
}

#[test]
fn test_user_example_dto() {
    let artifacts = generate(USER_JSON);

    let create: Vec<&str> = artifacts
        .dto
        .lines()
        .skip_while(|l| !l.starts_with("type CreateUserRequest struct"))
        .skip(1)
        .take_while(|l| *l != "}")
        .collect();

    assert_eq!(create, vec!["\tEmail string `json:\"email\" validate:\"required\"`"]);
}

#[test]
fn test_user_example_types() {
    let artifacts = generate(USER_JSON);
    let expected = "\
package types

import \"time\"

type User struct {
\tID        int64      `json:\"id\"`
\tEmail     string     `json:\"email\"`
\tCreatedAt time.Time  `json:\"created_at\"`
\tUpdatedAt time.Time  `json:\"updated_at\"`
\tDeletedAt *time.Time `json:\"deleted_at,omitempty\"`
}
";
    assert_eq!(artifacts.types, expected);
}

#[test]
fn test_three_field_placeholders() {
    let entity = Entity::new("Product", "products")
        .with_field(Field::new("sku", FieldType::String).required())
        .with_field(Field::new("price", FieldType::Float))
        .with_field(Field::new("stock", FieldType::Int));
    let queries = build_queries(&entity);

    let create = queries.iter().find(|q| q.name == "CreateProduct").unwrap();
    assert!(create.sql.contains("  sku, price, stock\n) VALUES (\n  $1, $2, $3\n"));

    let update = queries.iter().find(|q| q.name == "UpdateProduct").unwrap();
    assert!(update.sql.contains("sku = COALESCE($2, sku)"));
    assert!(update.sql.contains("price = COALESCE($3, price)"));
    assert!(update.sql.contains("stock = COALESCE($4, stock)"));
    assert!(!update.sql.contains("$5"));
}

#[test]
fn test_unique_field_queries() {
    let entity = Entity::new("Member", "members")
        .with_field(Field::new("email", FieldType::String).unique())
        .with_field(Field::new("name", FieldType::String));
    let text = generate_queries(&entity);

    assert_eq!(text.matches("GetMemberByEmail").count(), 1);
    assert!(!text.contains("GetMemberByName"));
}

#[test]
fn test_audit_gating() {
    let audited = Entity::new("Doc", "docs")
        .with_field(Field::new("title", FieldType::String))
        .with_audit(true);

    let schema = generate_schema(&audited.clone().with_soft_delete(true));
    assert!(schema.contains("deleted_by INTEGER REFERENCES users(id)"));

    let schema = generate_schema(&audited);
    assert!(!schema.contains("deleted_by"));
}

#[test]
fn test_invalid_entity_is_rejected_before_generation() {
    let json = r#"{"name": "User", "tableName": "users", "fields": [
        {"name": "email", "type": "string"},
        {"name": "email", "type": "string"}
    ]}"#;
    let entity = Entity::from_json(json).unwrap();
    let err = ScaffoldGenerator::new(entity, GenerationOptions::default()).err().unwrap();
    assert!(matches!(err, ScaffoldError::DuplicateField(name) if name == "email"));
}

#[test]
fn test_strict_mode_rejects_unknown_types() {
    let json = r#"{"name": "Place", "tableName": "places", "fields": [
        {"name": "location", "type": "point"}
    ]}"#;
    let entity = Entity::from_json(json).unwrap();

    let lenient = ScaffoldGenerator::new(entity.clone(), GenerationOptions::default())
        .unwrap()
        .generate();
    assert!(lenient.schema.contains("location UUID"));
    assert!(lenient.dto.contains("Location interface{}"));

    let err = ScaffoldGenerator::new(entity, GenerationOptions { strict_types: true })
        .err()
        .unwrap();
    assert!(matches!(err, ScaffoldError::UnknownFieldType { .. }));
}

#[test]
fn test_generators_do_not_mutate_input() {
    let entity = Entity::from_json(USER_JSON).unwrap();
    let before = entity.clone();
    let _ = generate_schema(&entity);
    let _ = generate_queries(&entity);
    let _ = generate_dto(&entity);
    let _ = generate_types(&entity);
    assert_eq!(entity, before);
}

#[test]
fn test_camel_case_implicit_property_is_rejected() {
    let entity = Entity::new("User", "users")
        .with_field(Field::new("createdAt", FieldType::Timestamp))
        .with_timestamps(true);
    let err = ScaffoldGenerator::new(entity, GenerationOptions::default()).err().unwrap();
    assert!(matches!(err, ScaffoldError::ReservedFieldName(name) if name == "createdAt"));

    // Without timestamps the record has no CreatedAt of its own
    let entity = Entity::new("User", "users").with_field(Field::new("createdAt", FieldType::Timestamp));
    let types = ScaffoldGenerator::new(entity, GenerationOptions::default())
        .unwrap()
        .generate()
        .types;
    assert_eq!(types.matches("\tCreatedAt ").count(), 1);
}

#[test]
fn test_keywords_and_unexported_names_are_rejected() {
    let keyword = Entity::new("Order", "order").with_field(Field::new("total", FieldType::Float));
    let err = ScaffoldGenerator::new(keyword, GenerationOptions::default()).err().unwrap();
    assert!(matches!(err, ScaffoldError::ReservedKeyword { .. }));

    let lowercase = Entity::new("user", "users")
        .with_field(Field::new("email", FieldType::String).required());
    assert!(ScaffoldGenerator::new(lowercase, GenerationOptions::default()).is_err());
}
