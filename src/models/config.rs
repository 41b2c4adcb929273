//! Project configuration (`changelog.toml`)

use super::changelog::{DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use crate::parser::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name, looked up in the project root
pub const CONFIG_FILE: &str = "changelog.toml";

/// Changelog configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Changelog file, relative to the project root
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// Title written by `init`
    #[serde(default = "default_title")]
    pub title: String,

    /// Description paragraphs written by `init`
    #[serde(default = "default_description")]
    pub description: Vec<String>,

    /// Keep free text directly under version headings
    #[serde(default)]
    pub retain_version_notes: bool,
}

fn default_file() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_description() -> Vec<String> {
    DEFAULT_DESCRIPTION.iter().map(|p| p.to_string()).collect()
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: default_file(),
            title: default_title(),
            description: default_description(),
            retain_version_notes: false,
        }
    }
}

impl ChangelogConfig {
    /// Load config from `changelog.toml`, falling back to defaults
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: ChangelogConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to `changelog.toml`
    pub fn save(&self, project_root: &Path) -> anyhow::Result<()> {
        let config_path = project_root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            retain_version_notes: self.retain_version_notes,
        }
    }

    /// Absolute changelog path
    pub fn changelog_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.file)
    }
}
