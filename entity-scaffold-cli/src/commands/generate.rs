//! `generate`: artifacts from an entity JSON document
//!
//! # Example
//!
//! ```bash
//! entity-scaffold generate user.json --out db/generated
//! cat user.json | entity-scaffold generate - --only schema,queries --stdout
//! ```

use super::OutputArgs;
use crate::output::{self, Emit};
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use entity_scaffold::prelude::*;

/// Generate artifacts from an entity JSON document
#[derive(Debug, Clone, Args)]
pub struct GenerateCommand {
    /// Entity JSON file, or `-` for stdin
    pub input: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl GenerateCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be read, fails validation, or
    /// the artifacts cannot be written.
    pub fn execute(&self, config: &ScaffoldConfig) -> Result<()> {
        let entity = output::read_entity(&self.input)?;
        let mode = self.output.emit();

        if mode == Emit::Files {
            println!(
                "\n{} {} {}",
                style("Generating").cyan().bold(),
                style(&entity.name).green().bold(),
                style("...").cyan().bold()
            );
        }

        let generator = ScaffoldGenerator::new(entity, self.output.options(config))
            .with_context(|| format!("Entity in {} is not valid", self.input))?;
        let artifacts = generator.generate();

        tracing::info!(
            entity = %generator.entity().name,
            table = %artifacts.table_name,
            "generated artifacts"
        );

        output::emit(
            &artifacts,
            &self.output.kinds(),
            mode,
            &self.output.target(config),
        )
    }
}
