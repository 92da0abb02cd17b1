//! Scaffold generator orchestrator
//!
//! Validates an [`Entity`] once, then runs the four independent generators:
//! - Schema DDL
//! - sqlc query suite
//! - Go request DTOs
//! - Go record type

use super::dto::{generate_dto, generate_types};
use super::entity::Entity;
use super::queries::generate_queries;
use super::schema::generate_schema;
use super::validation::ValidationOptions;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Options applied before generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Reject unknown field types instead of falling back
    pub strict_types: bool,
}

impl From<GenerationOptions> for ValidationOptions {
    fn from(options: GenerationOptions) -> Self {
        Self {
            strict_types: options.strict_types,
        }
    }
}

/// One of the generated artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// `CREATE TABLE` / `CREATE INDEX`
    Schema,
    /// sqlc query suite
    Queries,
    /// Create/update request DTOs
    Dto,
    /// Full record type
    Types,
}

impl ArtifactKind {
    /// Every artifact, in output order
    pub const ALL: [Self; 4] = [Self::Schema, Self::Queries, Self::Dto, Self::Types];

    /// File name the artifact is written to
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Schema => "schema.sql",
            Self::Queries => "queries.sql",
            Self::Dto => "dto.go",
            Self::Types => "types.go",
        }
    }

    /// Key the artifact is serialized under in JSON output
    #[must_use]
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::Schema => "sql",
            Self::Queries => "queries",
            Self::Dto => "dto",
            Self::Types => "types",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => write!(f, "schema"),
            Self::Queries => write!(f, "queries"),
            Self::Dto => write!(f, "dto"),
            Self::Types => write!(f, "types"),
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "schema" | "sql" => Ok(Self::Schema),
            "queries" => Ok(Self::Queries),
            "dto" => Ok(Self::Dto),
            "types" => Ok(Self::Types),
            other => Err(format!(
                "unknown artifact '{other}'. Expected one of: schema, queries, dto, types"
            )),
        }
    }
}

/// Information about a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File path (relative to the output directory)
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// Human-readable description
    pub description: String,
}

/// The generated text for one entity
///
/// Serializes as `{"sql", "queries", "dto", "types"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifacts {
    /// Table name the artifacts were generated for
    #[serde(skip)]
    pub table_name: String,
    /// Schema DDL
    #[serde(rename = "sql")]
    pub schema: String,
    /// Query suite
    pub queries: String,
    /// Request DTOs
    pub dto: String,
    /// Record type
    pub types: String,
}

impl GeneratedArtifacts {
    /// Text of one artifact
    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Schema => &self.schema,
            ArtifactKind::Queries => &self.queries,
            ArtifactKind::Dto => &self.dto,
            ArtifactKind::Types => &self.types,
        }
    }

    /// Map the selected artifacts to files
    ///
    /// With `per_entity_dir`, files land in `<table_name>/`.
    #[must_use]
    pub fn files(&self, kinds: &[ArtifactKind], per_entity_dir: bool) -> Vec<GeneratedFile> {
        kinds
            .iter()
            .map(|&kind| {
                let path = if per_entity_dir {
                    PathBuf::from(&self.table_name).join(kind.file_name())
                } else {
                    PathBuf::from(kind.file_name())
                };
                let table_name = &self.table_name;
                let description = match kind {
                    ArtifactKind::Schema => format!("Schema for {table_name} table"),
                    ArtifactKind::Queries => format!("sqlc queries for {table_name}"),
                    ArtifactKind::Dto => format!("Request DTOs for {table_name}"),
                    ArtifactKind::Types => format!("Record type for {table_name}"),
                };
                GeneratedFile {
                    path,
                    content: self.get(kind).to_string(),
                    description,
                }
            })
            .collect()
    }
}

/// Entity scaffold generator
pub struct ScaffoldGenerator {
    entity: Entity,
}

impl ScaffoldGenerator {
    /// Create a new scaffold generator for a validated entity
    ///
    /// # Errors
    ///
    /// Returns an error if the entity fails [`Entity::validate`].
    pub fn new(entity: Entity, options: GenerationOptions) -> Result<Self> {
        entity.validate(&options.into())?;
        Ok(Self { entity })
    }

    /// The entity being generated
    #[must_use]
    pub const fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Generate all artifacts
    #[must_use]
    pub fn generate(&self) -> GeneratedArtifacts {
        let entity = &self.entity;
        let _span = tracing::debug_span!("generate", entity = %entity.name, table = %entity.table_name).entered();

        let artifacts = GeneratedArtifacts {
            table_name: entity.table_name.clone(),
            schema: generate_schema(entity),
            queries: generate_queries(entity),
            dto: generate_dto(entity),
            types: generate_types(entity),
        };

        tracing::debug!(
            fields = entity.fields.len(),
            indexes = entity.indexes.len(),
            unique_fields = entity.unique_fields().count(),
            "generated artifacts"
        );

        artifacts
    }
}
