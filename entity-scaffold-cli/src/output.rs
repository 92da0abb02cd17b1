//! Reading entity documents and writing generated artifacts

use anyhow::{bail, Context, Result};
use console::style;
use entity_scaffold::config::OutputSettings;
use entity_scaffold::prelude::*;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Source argument that means "read from stdin"
pub const STDIN: &str = "-";

/// How generated artifacts leave the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Write one file per artifact
    Files,
    /// Print the selected artifacts to stdout
    Stdout,
    /// Print the selected artifacts as one JSON object to stdout
    Json,
}

/// Resolved file output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Root directory
    pub dir: PathBuf,
    /// Nest files under `<table_name>/`
    pub per_entity_dir: bool,
    /// Replace existing files
    pub overwrite: bool,
}

impl OutputTarget {
    /// Layer command-line overrides on top of configured output settings
    #[must_use]
    pub fn resolve(settings: &OutputSettings, dir: Option<PathBuf>, force: bool) -> Self {
        Self {
            dir: dir.unwrap_or_else(|| settings.dir.clone()),
            per_entity_dir: settings.per_entity_dir,
            overwrite: settings.overwrite || force,
        }
    }
}

/// Read an entity JSON document from a file or, for `-`, from stdin
///
/// # Errors
///
/// Returns an error if the source cannot be read or is not a valid entity
/// document.
pub fn read_entity(source: &str) -> Result<Entity> {
    let json = if source == STDIN {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read entity from stdin")?;
        buffer
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read entity file: {source}"))?
    };

    parse_entity(&json).with_context(|| format!("Invalid entity document: {source}"))
}

/// Decode an entity JSON document
///
/// # Errors
///
/// Returns an error if the JSON does not describe an entity.
pub fn parse_entity(json: &str) -> Result<Entity> {
    Ok(Entity::from_json(json)?)
}

/// Write generated files below `target.dir`
///
/// Every destination is checked before anything is written, so a refused
/// overwrite leaves the directory untouched.
///
/// # Errors
///
/// Returns an error if a file already exists and overwriting is off, or if
/// a directory or file cannot be written.
pub fn write_files(files: &[GeneratedFile], target: &OutputTarget) -> Result<Vec<PathBuf>> {
    let destinations: Vec<PathBuf> = files.iter().map(|f| target.dir.join(&f.path)).collect();

    if !target.overwrite {
        let existing: Vec<String> = destinations
            .iter()
            .filter(|path| path.exists())
            .map(|path| path.display().to_string())
            .collect();
        if !existing.is_empty() {
            bail!(
                "Refusing to overwrite existing files (use --force): {}",
                existing.join(", ")
            );
        }
    }

    for (file, full_path) in files.iter().zip(&destinations) {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(full_path, &file.content)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

        tracing::debug!(path = %full_path.display(), bytes = file.content.len(), "wrote artifact");
    }

    Ok(destinations)
}

/// Selected artifacts as one JSON object keyed `sql`, `queries`, `dto`, `types`
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(artifacts: &GeneratedArtifacts, kinds: &[ArtifactKind]) -> Result<String> {
    let selected: Map<String, Value> = kinds
        .iter()
        .map(|&kind| {
            (
                kind.json_key().to_string(),
                Value::String(artifacts.get(kind).to_string()),
            )
        })
        .collect();
    serde_json::to_string_pretty(&selected).context("Failed to serialize generated artifacts")
}

/// Selected artifacts as plain text, separated by a blank line
#[must_use]
pub fn render_text(artifacts: &GeneratedArtifacts, kinds: &[ArtifactKind]) -> String {
    kinds
        .iter()
        .map(|&kind| artifacts.get(kind).trim_end_matches('\n'))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Emit artifacts the requested way
///
/// # Errors
///
/// Returns an error if files cannot be written or JSON serialization fails.
pub fn emit(
    artifacts: &GeneratedArtifacts,
    kinds: &[ArtifactKind],
    mode: Emit,
    target: &OutputTarget,
) -> Result<()> {
    match mode {
        Emit::Json => println!("{}", render_json(artifacts, kinds)?),
        Emit::Stdout => println!("{}", render_text(artifacts, kinds)),
        Emit::Files => {
            let files = artifacts.files(kinds, target.per_entity_dir);
            write_files(&files, target)?;

            println!(
                "\n{} {} files:",
                style("Generated").green().bold(),
                files.len()
            );
            for file in &files {
                println!(
                    "  {} {} ({})",
                    style("✓").green(),
                    style(target.dir.join(&file.path).display()).dim(),
                    style(&file.description).dim()
                );
            }
        }
    }

    Ok(())
}
