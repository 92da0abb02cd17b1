//! Entity scaffold generator implementation
//!
//! This module turns a declarative [`Entity`] into three kinds of text:
//! a `CREATE TABLE` schema, a sqlc CRUD query suite, and Go request/record
//! types with validation tags.
//!
//! The four generator functions are pure: they never fail, never mutate the
//! entity, and return byte-identical output for the same input. Input
//! hardening lives in [`Entity::validate`], which [`ScaffoldGenerator`] runs
//! before generating.

pub mod dto;
pub mod entity;
pub mod field_type;
pub mod generator;
pub mod helpers;
pub mod queries;
pub mod schema;
pub mod validation;
pub mod validation_tag;

pub use dto::{generate_dto, generate_types};
pub use entity::{Entity, Field, Index, Validations};
pub use field_type::FieldType;
pub use generator::{ArtifactKind, GeneratedArtifacts, GeneratedFile, GenerationOptions, ScaffoldGenerator};
pub use helpers::NamingHelpers;
pub use queries::{build_queries, generate_queries, NamedQuery, QueryKind};
pub use schema::generate_schema;
pub use validation::ValidationOptions;
pub use validation_tag::{validation_rules, validation_tag};
