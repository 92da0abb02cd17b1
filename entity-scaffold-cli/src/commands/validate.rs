//! `validate`: check an entity JSON document without generating anything

use crate::output;
use anyhow::Result;
use clap::Args;
use console::style;
use entity_scaffold::prelude::*;
use entity_scaffold::scaffold::ValidationOptions;

/// Validate an entity JSON document
#[derive(Debug, Clone, Args)]
pub struct ValidateCommand {
    /// Entity JSON file, or `-` for stdin
    pub input: String,

    /// Reject unknown field types
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be read or is invalid.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<()> {
        let entity = output::read_entity(&self.input)?;

        let options = ValidationOptions {
            strict_types: config.generation.strict_types || self.strict,
        };
        entity.validate(&options)?;

        println!(
            "{} {} ({} fields, table {})",
            style("✓").green(),
            style(&entity.name).green().bold(),
            entity.fields.len(),
            style(&entity.table_name).dim()
        );

        Ok(())
    }
}
