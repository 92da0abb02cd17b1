//! `scaffold`: artifacts from an entity described on the command line
//!
//! Timestamps, soft delete and audit columns are on unless turned off.
//!
//! # Example
//!
//! ```bash
//! entity-scaffold scaffold Post \
//!   title:string:required \
//!   slug:string:required:unique:pattern=^[a-z0-9-]+$ \
//!   author_id:bigint:required:fk=users \
//!   rating:int:min=1:max=5 \
//!   --index author_id --unique-index author_id,slug
//! ```

use super::OutputArgs;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use entity_scaffold::prelude::*;
use entity_scaffold::scaffold::NamingHelpers;

/// Generate artifacts from a name and field specs
#[derive(Debug, Clone, Args)]
pub struct ScaffoldCommand {
    /// Entity name (`PascalCase`, e.g. `Post`, `UserProfile`)
    pub name: String,

    /// Field specs (`name:type[:required][:unique][:email][:fk=table][:min=n][:max=n][:pattern=re]`)
    #[arg(required = true)]
    pub fields: Vec<String>,

    /// Table name (defaults to the pluralized snake_case entity name)
    #[arg(long)]
    pub table: Option<String>,

    /// Omit `created_at` / `updated_at`
    #[arg(long)]
    pub no_timestamps: bool,

    /// Omit soft delete (`deleted_at` and the delete query)
    #[arg(long)]
    pub no_soft_delete: bool,

    /// Omit `created_by` / `updated_by` / `deleted_by`
    #[arg(long)]
    pub no_audit: bool,

    /// Comma-separated columns of a plain index (repeatable)
    #[arg(long = "index", value_name = "COLUMNS")]
    pub indexes: Vec<String>,

    /// Comma-separated columns of a unique index (repeatable)
    #[arg(long = "unique-index", value_name = "COLUMNS")]
    pub unique_indexes: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ScaffoldCommand {
    /// Build the entity described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if a field spec cannot be parsed.
    pub fn entity(&self) -> Result<Entity> {
        let table = self
            .table
            .clone()
            .unwrap_or_else(|| NamingHelpers::to_table_name(&self.name));

        let mut entity = Entity::new(&self.name, table)
            .with_timestamps(!self.no_timestamps)
            .with_soft_delete(!self.no_soft_delete)
            .with_audit(!self.no_audit);

        for spec in &self.fields {
            let field = Field::parse(spec).with_context(|| format!("Invalid field spec: {spec}"))?;
            entity = entity.with_field(field);
        }

        for columns in &self.indexes {
            entity = entity.with_index(Index::on(split_columns(columns)));
        }
        for columns in &self.unique_indexes {
            entity = entity.with_index(Index::on(split_columns(columns)).unique());
        }

        Ok(entity)
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is invalid or the artifacts cannot be
    /// written.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<()> {
        let mode = self.output.emit();
        if mode == output::Emit::Files {
            println!(
                "\n{} {} {}",
                style("Scaffolding").cyan().bold(),
                style(&self.name).green().bold(),
                style("...").cyan().bold()
            );
        }

        let generator = ScaffoldGenerator::new(self.entity()?, self.output.options(config))
            .context("Failed to create scaffold generator")?;
        let artifacts = generator.generate();

        tracing::info!(
            entity = %self.name,
            table = %artifacts.table_name,
            fields = self.fields.len(),
            "scaffolded entity"
        );

        output::emit(
            &artifacts,
            &self.output.kinds(),
            mode,
            &self.output.target(config),
        )?;

        if mode == output::Emit::Files {
            println!(
                "\n{} Scaffold for {} is ready!",
                style("✨").green().bold(),
                style(&self.name).green().bold()
            );
            println!("\n{}", style("Next steps:").cyan().bold());
            println!("  1. Apply the schema: {}", style("psql -f schema.sql").yellow());
            println!("  2. Generate the query code: {}", style("sqlc generate").yellow());
        }

        Ok(())
    }
}

fn split_columns(columns: &str) -> Vec<String> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(ToString::to_string)
        .collect()
}
