//! Command implementations for the `changelog` binary

pub mod change;
pub mod fmt;
pub mod init;
pub mod versions;

use crate::models::ChangelogConfig;
use crate::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Project root plus the config loaded from it
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: ChangelogConfig,
}

impl Workspace {
    /// Load `changelog.toml` from the current directory; `file` overrides the
    /// configured changelog path
    pub fn load(file: Option<PathBuf>) -> Result<Self> {
        Self::at(env::current_dir()?, file)
    }

    pub fn at(root: PathBuf, file: Option<PathBuf>) -> Result<Self> {
        let mut config = ChangelogConfig::load(&root)?;
        if let Some(file) = file {
            config.file = file;
        }
        Ok(Self { root, config })
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.config.changelog_path(&self.root)
    }

    /// Path as shown to the user, relative to the root when possible
    pub fn display_path(&self) -> String {
        let path = self.changelog_path();
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_flag_overrides_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("changelog.toml"), "file = \"HISTORY.md\"\n").unwrap();

        let ws = Workspace::at(temp.path().to_path_buf(), None).unwrap();
        assert_eq!(ws.display_path(), "HISTORY.md");

        let ws = Workspace::at(temp.path().to_path_buf(), Some(PathBuf::from("docs/CHANGES.md")))
            .unwrap();
        assert_eq!(ws.changelog_path(), temp.path().join("docs/CHANGES.md"));
    }
}
