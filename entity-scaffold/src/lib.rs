//! entity-scaffold: generate SQL schema, sqlc queries and Go types from an entity
//!
//! Describe a table once (fields, timestamps, soft delete, audit columns,
//! indexes) and get:
//! - a `CREATE TABLE` statement with its `CREATE INDEX` statements
//! - a sqlc-annotated CRUD query suite
//! - Go create/update request DTOs with `validate` tags
//! - the Go record type
//!
//! # Quick Start
//!
//! ```rust
//! use entity_scaffold::prelude::*;
//!
//! # fn main() -> entity_scaffold::error::Result<()> {
//! let entity = Entity::new("User", "users")
//!     .with_field(Field::parse("email:string:required:unique:email")?)
//!     .with_timestamps(true)
//!     .with_soft_delete(true);
//!
//! let artifacts = ScaffoldGenerator::new(entity, GenerationOptions::default())?.generate();
//!
//! assert!(artifacts.schema.starts_with("CREATE TABLE users ("));
//! assert!(artifacts.queries.contains("-- name: GetUserByEmail :one"));
//! assert!(artifacts.dto.contains("type CreateUserRequest struct {"));
//! # Ok(())
//! # }
//! ```

// Lint configuration is handled at the workspace level in Cargo.toml
// Additional crate-specific allows:
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ScaffoldConfig;
    pub use crate::error::{Result, ScaffoldError};
    pub use crate::scaffold::{
        generate_dto, generate_queries, generate_schema, generate_types, ArtifactKind, Entity,
        Field, FieldType, GeneratedArtifacts, GeneratedFile, GenerationOptions, Index,
        ScaffoldGenerator,
    };
}
