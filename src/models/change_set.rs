//! Batches of change entries keyed by category

use super::{Category, ChangeEntry, VersionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw batch value: either a (possibly multi-line) bullet string or a list
/// of strings / entry objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EntriesInput {
    Text(String),
    List(Vec<EntryInput>),
}

/// A single raw batch item
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EntryInput {
    Line(String),
    Entry(ChangeEntry),
}

impl From<EntriesInput> for Vec<ChangeEntry> {
    fn from(input: EntriesInput) -> Self {
        match input {
            EntriesInput::Text(text) => ChangeEntry::from_lines(&text),
            EntriesInput::List(items) => items
                .into_iter()
                .map(|item| match item {
                    EntryInput::Line(line) => ChangeEntry::from_text(&line),
                    EntryInput::Entry(entry) => entry,
                })
                .collect(),
        }
    }
}

/// Entries grouped by category, e.g. `{ "added": [...], "fixed": "- ..." }`.
///
/// Iteration always follows the taxonomy order
/// (Added, Changed, Deprecated, Removed, Fixed, Security).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Category, EntriesInput>",
    into = "BTreeMap<Category, Vec<ChangeEntry>>"
)]
pub struct ChangeBatch {
    entries: BTreeMap<Category, Vec<ChangeEntry>>,
}

impl From<ChangeBatch> for BTreeMap<Category, Vec<ChangeEntry>> {
    fn from(batch: ChangeBatch) -> Self {
        batch.entries
    }
}

impl From<BTreeMap<Category, EntriesInput>> for ChangeBatch {
    fn from(raw: BTreeMap<Category, EntriesInput>) -> Self {
        Self {
            entries: raw.into_iter().map(|(c, input)| (c, input.into())).collect(),
        }
    }
}

impl ChangeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry under `category`
    pub fn push(&mut self, category: Category, entry: impl Into<ChangeEntry>) -> &mut Self {
        self.entries.entry(category).or_default().push(entry.into());
        self
    }

    pub fn entries(&self, category: Category) -> &[ChangeEntry] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories holding at least one entry, in taxonomy order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(|c| !self.entries(*c).is_empty())
    }

    /// Every entry, flattened in taxonomy order
    pub fn flatten(&self) -> impl Iterator<Item = &ChangeEntry> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(|c| self.entries(c).iter())
    }

    pub fn is_empty(&self) -> bool {
        self.categories().next().is_none()
    }
}

/// A change routed to one version: the target version, an optional release
/// date and the categorized entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub version: VersionId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(flatten)]
    pub batch: ChangeBatch,
}

impl ChangeSet {
    pub fn new(version: VersionId) -> Self {
        Self {
            version,
            date: None,
            batch: ChangeBatch::new(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Builder form of [`ChangeBatch::push`]
    pub fn add(mut self, category: Category, entry: impl Into<ChangeEntry>) -> Self {
        self.batch.push(category, entry);
        self
    }
}
