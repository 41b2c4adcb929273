//! Version block: one release heading and its category sections

use super::{Category, ChangelogResult, Section, VersionFormat, VersionId};
use crate::parser::markdown::Block;
use chrono::NaiveDate;
use std::fmt;

/// A `## [x.y.z] - date` heading owning its sections.
///
/// Sections are unique per category and keep first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBlock {
    pub id: VersionId,
    sections: Vec<Section>,
    notes: Vec<Block>,
}

impl VersionBlock {
    pub fn new(id: VersionId) -> Self {
        Self {
            id,
            sections: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Build from a heading body such as `[1.2.3] - 2024-01-01`
    pub fn parse(heading: &str) -> ChangelogResult<Self> {
        Ok(Self::new(VersionId::parse(heading)?))
    }

    /// `major.minor.patch`
    pub fn ver(&self) -> String {
        self.id.ver()
    }

    pub fn date(&self) -> NaiveDate {
        self.id.date
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, category: Category) -> Option<&Section> {
        self.sections.iter().find(|s| s.category == category)
    }

    pub fn section_mut(&mut self, category: Category) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.category == category)
    }

    fn position(&self, category: Category) -> Option<usize> {
        self.sections.iter().position(|s| s.category == category)
    }

    /// Existing section for `category`, or a new empty one appended last
    pub fn get_or_create_section(&mut self, category: Category) -> &mut Section {
        let idx = match self.position(category) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(category));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    /// Same as [`get_or_create_section`](Self::get_or_create_section) for a
    /// category label
    pub fn add_category(&mut self, name: &str) -> ChangelogResult<&mut Section> {
        Ok(self.get_or_create_section(Category::from_name(name)?))
    }

    /// Add `section` unless its category is already present.
    ///
    /// On a collision the existing section is returned and the entries of
    /// `section` are discarded. Use [`merge_section`](Self::merge_section) to
    /// keep them.
    pub fn add_or_get_section(&mut self, section: Section) -> &mut Section {
        match self.position(section.category) {
            Some(idx) => {
                if !section.is_empty() {
                    tracing::debug!(
                        version = %self.id,
                        category = %section.category,
                        dropped = section.len(),
                        "section already present, new entries discarded"
                    );
                }
                &mut self.sections[idx]
            }
            None => {
                self.sections.push(section);
                let last = self.sections.len() - 1;
                &mut self.sections[last]
            }
        }
    }

    /// Add `section`, appending its entries to an existing section of the
    /// same category
    pub fn merge_section(&mut self, section: Section) -> &mut Section {
        let target = self.get_or_create_section(section.category);
        for entry in section.entries() {
            target.add(entry.clone());
        }
        target
    }

    /// Dynamically-typed add: a category label or a section object
    pub fn add_value(&mut self, value: &serde_json::Value) -> ChangelogResult<&mut Section> {
        let section = Section::try_from_json(value)?;
        Ok(self.add_or_get_section(section))
    }

    /// Free text kept between the heading and the first section
    pub fn notes(&self) -> &[Block] {
        &self.notes
    }

    pub fn push_note(&mut self, block: Block) {
        self.notes.push(block);
    }

    /// Heading body, e.g. `[1.2.3] - 2024-01-01`
    pub fn heading(&self) -> String {
        self.id.format(VersionFormat::Markdown)
    }

    /// Markdown lines: heading, blank line, notes, then each section
    pub fn render(&self) -> Vec<String> {
        let markdown = self.to_markdown();
        markdown.trim_end().lines().map(str::to_string).collect()
    }

    pub fn to_markdown(&self) -> String {
        let mut out = format!("## {}\n\n", self.heading());
        for note in &self.notes {
            out.push_str(&note.to_markdown());
        }
        for section in &self.sections {
            out.push_str(&section.to_markdown());
        }
        out
    }

    /// Indented listing for the console
    pub fn to_text(&self) -> String {
        let mut lines = vec![self.id.format(VersionFormat::Plain { skip_prefix: false })];
        for section in &self.sections {
            lines.extend(section.to_text_lines());
        }
        lines.join("\n")
    }
}

impl fmt::Display for VersionBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}
