//! Change entry: one bullet line under a category

use super::{ChangelogError, ChangelogResult, VersionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single change description.
///
/// `target_version` and `target_date` only matter while the entry is routed
/// to a version block by `Changelog::add_entry`; they are not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    #[serde(alias = "content")]
    text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<VersionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

impl ChangeEntry {
    /// Build an entry from raw text, kept verbatim
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_version: None,
            target_date: None,
        }
    }

    /// Build an entry from a bullet line, stripping one leading `-` marker
    pub fn from_text(line: &str) -> Self {
        let text = match line.strip_prefix('-') {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                rest.trim_start()
            }
            _ => line,
        };
        Self::new(text)
    }

    /// One entry per non-empty line of `text`
    pub fn from_lines(text: &str) -> Vec<Self> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::from_text)
            .collect()
    }

    /// Build an entry from a JSON value: a string is read as a bullet line,
    /// an object must carry `text` (or `content`).
    pub fn try_from_json(value: &serde_json::Value) -> ChangelogResult<Self> {
        match value {
            serde_json::Value::String(line) => Ok(Self::from_text(line)),
            serde_json::Value::Object(_) => {
                serde_json::from_value(value.clone()).map_err(|e| ChangelogError::TypeMismatch {
                    expected: "change",
                    found: e.to_string(),
                })
            }
            other => Err(ChangelogError::TypeMismatch {
                expected: "change",
                found: json_kind(other).to_string(),
            }),
        }
    }

    /// Route this entry to a version when added through `Changelog::add_entry`
    pub fn with_target(mut self, version: VersionId, date: Option<NaiveDate>) -> Self {
        self.target_version = Some(version);
        self.target_date = date;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `- {text}` plus a newline
    pub fn to_markdown(&self) -> String {
        format!("- {}\n", self.text)
    }
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}", self.text)
    }
}

impl From<&str> for ChangeEntry {
    fn from(line: &str) -> Self {
        Self::from_text(line)
    }
}

impl From<String> for ChangeEntry {
    fn from(line: String) -> Self {
        Self::from_text(&line)
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
