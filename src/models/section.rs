//! Section: the entries of one category under a version

use super::entry::json_kind;
use super::{Category, ChangeBatch, ChangeEntry, ChangelogError, ChangelogResult};
use serde::{Deserialize, Serialize};

/// A `### Category` heading and its bullet entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub category: Category,
    entries: Vec<ChangeEntry>,
}

impl Section {
    /// Empty section for `category`
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Vec::new(),
        }
    }

    /// Empty section from a category label (case-insensitive)
    pub fn from_name(name: &str) -> ChangelogResult<Self> {
        Ok(Self::new(Category::from_name(name)?))
    }

    /// Section for `category` holding every entry of `batch`, flattened in
    /// taxonomy order regardless of the batch keys.
    pub fn from_batch(category: Category, batch: &ChangeBatch) -> Self {
        let mut section = Self::new(category);
        for entry in batch.flatten() {
            section.add(entry.clone());
        }
        section
    }

    /// Build a section from a JSON value.
    ///
    /// A string is a category label; an object needs a `category` label and
    /// may carry an `entries` array. Anything else is a type mismatch.
    pub fn try_from_json(value: &serde_json::Value) -> ChangelogResult<Self> {
        match value {
            serde_json::Value::String(name) => Self::from_name(name),
            serde_json::Value::Object(map) => {
                let name = map.get("category").and_then(|c| c.as_str()).ok_or_else(|| {
                    ChangelogError::TypeMismatch {
                        expected: "section",
                        found: "object without a category".to_string(),
                    }
                })?;
                let mut section = Self::from_name(name)?;
                if let Some(entries) = map.get("entries") {
                    let items = entries.as_array().ok_or_else(|| ChangelogError::TypeMismatch {
                        expected: "entry list",
                        found: json_kind(entries).to_string(),
                    })?;
                    for item in items {
                        section.add(ChangeEntry::try_from_json(item)?);
                    }
                }
                Ok(section)
            }
            other => Err(ChangelogError::TypeMismatch {
                expected: "section",
                found: json_kind(other).to_string(),
            }),
        }
    }

    /// Append an entry. Duplicate texts are kept.
    pub fn add(&mut self, entry: impl Into<ChangeEntry>) -> &mut Self {
        self.entries.push(entry.into());
        self
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Heading line, blank line, then one line per entry
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push(format!("### {}", self.category.name()));
        lines.push(String::new());
        lines.extend(self.entries.iter().map(|e| e.to_string()));
        lines
    }

    /// Markdown form, terminated by a blank line
    pub fn to_markdown(&self) -> String {
        if self.entries.is_empty() {
            return format!("### {}\n\n", self.category.name());
        }
        let mut out = self.render().join("\n");
        out.push_str("\n\n");
        out
    }

    /// Indented console listing
    pub(crate) fn to_text_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("  {}", self.category.name())];
        lines.extend(self.entries.iter().map(|e| format!("    {}", e)));
        lines
    }
}

impl From<Category> for Section {
    fn from(category: Category) -> Self {
        Self::new(category)
    }
}
