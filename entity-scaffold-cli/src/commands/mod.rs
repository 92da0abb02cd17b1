//! CLI command implementations

pub mod generate;
pub mod scaffold;
pub mod validate;

pub use generate::GenerateCommand;
pub use scaffold::ScaffoldCommand;
pub use validate::ValidateCommand;

use crate::output::{Emit, OutputTarget};
use clap::Args;
use entity_scaffold::prelude::*;
use std::path::PathBuf;

/// Output flags shared by `generate` and `scaffold`
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output directory (defaults to `output.dir` from configuration)
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Only emit these artifacts (schema, queries, dto, types)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<ArtifactKind>,

    /// Print artifacts to stdout instead of writing files
    #[arg(long, conflicts_with = "json")]
    pub stdout: bool,

    /// Print all artifacts as one JSON object
    #[arg(long)]
    pub json: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Reject unknown field types
    #[arg(long)]
    pub strict: bool,
}

impl OutputArgs {
    /// Selected artifacts, all of them when `--only` is absent
    #[must_use]
    pub fn kinds(&self) -> Vec<ArtifactKind> {
        if self.only.is_empty() {
            ArtifactKind::ALL.to_vec()
        } else {
            ArtifactKind::ALL
                .into_iter()
                .filter(|kind| self.only.contains(kind))
                .collect()
        }
    }

    /// Requested emit mode
    #[must_use]
    pub const fn emit(&self) -> Emit {
        if self.json {
            Emit::Json
        } else if self.stdout {
            Emit::Stdout
        } else {
            Emit::Files
        }
    }

    /// Generation options, with `--strict` forcing strict typing on
    #[must_use]
    pub fn options(&self, config: &ScaffoldConfig) -> GenerationOptions {
        let mut options = GenerationOptions::from(&config.generation);
        options.strict_types |= self.strict;
        options
    }

    /// File destination after applying `--out` and `--force`
    #[must_use]
    pub fn target(&self, config: &ScaffoldConfig) -> OutputTarget {
        OutputTarget::resolve(&config.output, self.out.clone(), self.force)
    }
}
