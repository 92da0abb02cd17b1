//! Configuration management for entity-scaffold
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `ENTITY_SCAFFOLD_` prefix, `__` for nesting)
//! 2. File passed with `--config`
//! 3. `./entity-scaffold.toml` (project)
//! 4. `~/.config/entity-scaffold/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # entity-scaffold.toml
//! [generation]
//! strict_types = true
//!
//! [output]
//! dir = "./db/generated"
//! per_entity_dir = true
//! overwrite = false
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use crate::error::{Result, ScaffoldError};
use crate::scaffold::GenerationOptions;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Generation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Reject unknown field types instead of falling back to `UUID` / `interface{}`
    pub strict_types: bool,
}

impl From<&GenerationSettings> for GenerationOptions {
    fn from(settings: &GenerationSettings) -> Self {
        Self {
            strict_types: settings.strict_types,
        }
    }
}

/// Where and how generated files are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Root directory for generated files
    pub dir: PathBuf,

    /// Write each entity into `<dir>/<table_name>/`
    pub per_entity_dir: bool,

    /// Replace files that already exist
    pub overwrite: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            per_entity_dir: true,
            overwrite: false,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// Single-line human-readable output
    Compact,
    /// One JSON object per event
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Complete entity-scaffold configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Generation settings
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LogSettings,
}

impl ScaffoldConfig {
    /// Prefix for environment overrides
    pub const ENV_PREFIX: &'static str = "ENTITY_SCAFFOLD_";

    /// Project-local configuration file name
    pub const LOCAL_FILE: &'static str = "entity-scaffold.toml";

    /// Load configuration from every source
    ///
    /// `explicit` is a file named on the command line; unlike the implicit
    /// locations it must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - The explicit configuration file does not exist
    /// - A configuration file contains invalid TOML syntax
    /// - Configuration values fail type conversion
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Self::defaults()?;

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from(Self::LOCAL_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ScaffoldError::Config(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(Self::ENV_PREFIX).split("__").lowercase(true));

        let config = figment.extract()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Load configuration from a TOML string layered over the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has wrongly typed values.
    pub fn load_from_str(toml: &str) -> Result<Self> {
        Ok(Self::defaults()?.merge(Toml::string(toml)).extract()?)
    }

    /// Get the recommended XDG config path
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(Self::LOCAL_FILE),
            |config_dir| config_dir.join("entity-scaffold").join("config.toml"),
        )
    }

    /// Render this configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ScaffoldError::Config(e.to_string()))
    }

    fn defaults() -> Result<Figment> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| ScaffoldError::Config(e.to_string()))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }
}
