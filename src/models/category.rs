//! The fixed six-label change taxonomy

use super::{ChangelogError, ChangelogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of change listed under a version.
///
/// Declaration order is the canonical taxonomy order, used whenever a batch
/// of categories is walked (`ChangeSet`, section batches). Sections inside a
/// version keep their own insertion order instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Added,
        Category::Changed,
        Category::Deprecated,
        Category::Removed,
        Category::Fixed,
        Category::Security,
    ];

    /// Display label used in `### ` headings
    pub fn name(&self) -> &'static str {
        match self {
            Category::Added => "Added",
            Category::Changed => "Changed",
            Category::Deprecated => "Deprecated",
            Category::Removed => "Removed",
            Category::Fixed => "Fixed",
            Category::Security => "Security",
        }
    }

    /// Lowercase lookup key
    pub fn key(&self) -> &'static str {
        match self {
            Category::Added => "added",
            Category::Changed => "changed",
            Category::Deprecated => "deprecated",
            Category::Removed => "removed",
            Category::Fixed => "fixed",
            Category::Security => "security",
        }
    }

    /// Case-insensitive lookup by label
    pub fn from_name(name: &str) -> ChangelogResult<Self> {
        let trimmed = name.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ChangelogError::InvalidCategory(trimmed.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
