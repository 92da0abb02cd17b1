//! Go request DTO and record type generation
//!
//! Produces two Go source files:
//! - `package dto`: `Create<E>Request` and `Update<E>Request`, with `json`
//!   and `validate` struct tags
//! - `package types`: the full `<E>` record with its identity, timestamp,
//!   soft-delete and audit properties
//!
//! Property names are the field names with their first character
//! upper-cased ([`NamingHelpers::capitalize_first`]). Struct bodies are
//! column-aligned the way `gofmt` lays them out, and only the imports that
//! are actually referenced are emitted.

use super::entity::Entity;
use super::field_type::TIME_IMPORT;
use super::helpers::NamingHelpers;
use super::validation_tag::validation_tag;
use std::collections::BTreeSet;

/// Generate the create/update request DTOs
///
/// # Examples
///
/// ```
/// # use entity_scaffold::scaffold::{generate_dto, Entity, Field, FieldType};
/// let entity = Entity::new("User", "users")
///     .with_field(Field::new("email", FieldType::String).required());
/// let dto = generate_dto(&entity);
///
/// assert!(dto.contains("\tEmail string `json:\"email\" validate:\"required\"`"));
/// assert!(dto.contains("\tEmail *string `json:\"email,omitempty\" validate:\"required\"`"));
/// ```
#[must_use]
pub fn generate_dto(entity: &Entity) -> String {
    let imports: BTreeSet<&str> = entity
        .fields
        .iter()
        .filter_map(|f| f.field_type.host_import())
        .collect();

    let create = GoStruct {
        name: format!("Create{}Request", entity.name),
        fields: entity
            .fields
            .iter()
            .map(|field| GoField {
                name: NamingHelpers::capitalize_first(&field.name),
                go_type: field.field_type.host_type().to_string(),
                tag: format!("json:\"{}\"{}", field.name, validation_tag(field)),
            })
            .collect(),
    };

    let update = GoStruct {
        name: format!("Update{}Request", entity.name),
        fields: entity
            .fields
            .iter()
            .map(|field| {
                let host = field.field_type.host_type();
                let go_type = if field.field_type.host_is_nilable() {
                    host.to_string()
                } else {
                    format!("*{host}")
                };
                GoField {
                    name: NamingHelpers::capitalize_first(&field.name),
                    go_type,
                    tag: format!("json:\"{},omitempty\"{}", field.name, validation_tag(field)),
                }
            })
            .collect(),
    };

    render_file("dto", &imports, &[create, update])
}

/// Generate the full record type
///
/// # Examples
///
/// ```
/// # use entity_scaffold::scaffold::{generate_types, Entity, Field, FieldType};
/// let entity = Entity::new("Tag", "tags")
///     .with_field(Field::new("label", FieldType::String));
///
/// assert_eq!(
///     generate_types(&entity),
///     "package types\n\ntype Tag struct {\n\tID    int64  `json:\"id\"`\n\tLabel string `json:\"label\"`\n}\n"
/// );
/// ```
#[must_use]
pub fn generate_types(entity: &Entity) -> String {
    let mut imports: BTreeSet<&str> = entity
        .fields
        .iter()
        .filter_map(|f| f.field_type.host_import())
        .collect();
    if entity.time_stamps || entity.is_soft_delete {
        imports.insert(TIME_IMPORT);
    }

    let mut fields = vec![GoField::new("ID", "int64", "json:\"id\"")];

    fields.extend(entity.fields.iter().map(|field| GoField {
        name: NamingHelpers::capitalize_first(&field.name),
        go_type: field.field_type.host_type().to_string(),
        tag: format!("json:\"{}\"", field.name),
    }));

    if entity.time_stamps {
        fields.push(GoField::new("CreatedAt", "time.Time", "json:\"created_at\""));
        fields.push(GoField::new("UpdatedAt", "time.Time", "json:\"updated_at\""));
    }

    if entity.is_soft_delete {
        fields.push(GoField::new("DeletedAt", "*time.Time", "json:\"deleted_at,omitempty\""));
    }

    if entity.audited {
        fields.push(GoField::new("CreatedBy", "*int64", "json:\"created_by,omitempty\""));
        fields.push(GoField::new("UpdatedBy", "*int64", "json:\"updated_by,omitempty\""));
        if entity.tracks_deleted_by() {
            fields.push(GoField::new("DeletedBy", "*int64", "json:\"deleted_by,omitempty\""));
        }
    }

    let record = GoStruct {
        name: entity.name.clone(),
        fields,
    };

    render_file("types", &imports, &[record])
}

struct GoField {
    name: String,
    go_type: String,
    tag: String,
}

impl GoField {
    fn new(name: &str, go_type: &str, tag: &str) -> Self {
        Self {
            name: name.to_string(),
            go_type: go_type.to_string(),
            tag: tag.to_string(),
        }
    }
}

struct GoStruct {
    name: String,
    fields: Vec<GoField>,
}

impl GoStruct {
    fn render(&self) -> String {
        let name_width = self.fields.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
        let type_width = self.fields.iter().map(|f| f.go_type.len()).max().unwrap_or(0);

        let mut lines = vec![format!("type {} struct {{", self.name)];
        lines.extend(self.fields.iter().map(|f| {
            format!(
                "\t{:<name_width$} {:<type_width$} `{}`",
                f.name, f.go_type, f.tag
            )
        }));
        lines.push("}".to_string());
        lines.join("\n")
    }
}

fn render_file(package: &str, imports: &BTreeSet<&str>, structs: &[GoStruct]) -> String {
    let mut sections = vec![format!("package {package}")];

    if let Some(block) = import_block(imports) {
        sections.push(block);
    }

    sections.extend(structs.iter().map(GoStruct::render));

    format!("{}\n", sections.join("\n\n"))
}

/// `import` declaration with standard-library paths grouped before module paths
fn import_block(imports: &BTreeSet<&str>) -> Option<String> {
    let (stdlib, external): (Vec<&str>, Vec<&str>) = imports
        .iter()
        .partition(|path| !path.split('/').next().unwrap_or_default().contains('.'));

    match (stdlib.as_slice(), external.as_slice()) {
        ([], []) => None,
        ([single], []) | ([], [single]) => Some(format!("import \"{single}\"")),
        _ => {
            let group = |paths: &[&str]| {
                paths
                    .iter()
                    .map(|p| format!("\t\"{p}\""))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            let groups: Vec<String> = [stdlib.as_slice(), external.as_slice()]
                .into_iter()
                .filter(|g| !g.is_empty())
                .map(group)
                .collect();
            Some(format!("import (\n{}\n)", groups.join("\n\n")))
        }
    }
}
