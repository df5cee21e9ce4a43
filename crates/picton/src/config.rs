use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use picton_forms::Defaults;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PictonConfig {
    pub default_format: OutputFormat,
    /// Directory holding the LaTeX sources named by templates.
    pub templates_dir: Option<PathBuf>,
    pub year_field: String,
}

impl Default for PictonConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            templates_dir: None,
            year_field: "year".into(),
        }
    }
}

impl PictonConfig {
    /// Loads `explicit` when given, otherwise the per-user config file.
    /// A missing per-user file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn defaults(&self) -> Defaults {
        Defaults::current().with_year_field(self.year_field.clone())
    }

    pub fn format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.unwrap_or(self.default_format)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "picton").map(|dirs| dirs.config_dir().join("config.toml"))
}
