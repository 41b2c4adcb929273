//! Changelog document: the root of the tree
//!
//! The document is an ordered list of nodes (title, separators, version
//! blocks) plus an index from version string to the position of its block.
//! Every operation that inserts or removes a version block rebuilds the index
//! before returning, so the two never disagree.

use super::{
    parse_date, Category, ChangeEntry, ChangeSet, ChangelogError, ChangelogResult, VersionBlock,
    VersionId, DATE_FORMAT,
};
use crate::parser::changelog::{parse_changelog, ParseOptions};
use crate::parser::markdown::Block;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Title used by [`Changelog::init`]
pub const DEFAULT_TITLE: &str = "Changelog";

/// Description paragraphs used by [`Changelog::init`]
pub const DEFAULT_DESCRIPTION: [&str; 2] = [
    "All notable changes to this project will be documented in this file.",
    "The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/), and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).",
];

/// The `# Title` heading and the free text that follows it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleBlock {
    pub heading: Option<String>,
    content: Vec<Block>,
}

impl TitleBlock {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            content: Vec::new(),
        }
    }

    pub fn content(&self) -> &[Block] {
        &self.content
    }

    pub fn push(&mut self, block: Block) {
        self.content.push(block);
    }

    /// Drop trailing rules and blank paragraphs; version separators are
    /// synthesized by the document instead.
    pub(crate) fn trim_separators(&mut self) {
        while self.content.last().is_some_and(Block::is_separator) {
            self.content.pop();
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = match &self.heading {
            Some(heading) => format!("# {}\n\n", heading),
            None => String::new(),
        };
        for block in &self.content {
            out.push_str(&block.to_markdown());
        }
        out
    }
}

/// One top-level node of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Title(TitleBlock),
    Block(Block),
    Version(VersionBlock),
}

impl Node {
    pub fn to_markdown(&self) -> String {
        match self {
            Node::Title(title) => title.to_markdown(),
            Node::Block(block) => block.to_markdown(),
            Node::Version(version) => version.to_markdown(),
        }
    }

    fn is_separator(&self) -> bool {
        matches!(self, Node::Block(block) if block.is_separator())
    }

    fn is_footer(&self) -> bool {
        matches!(self, Node::Block(Block::Definitions { .. }))
    }
}

/// Plain view of one version, keyed by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSummary {
    pub version: String,
    pub date: String,
    pub changes: BTreeMap<Category, Vec<String>>,
}

/// A Keep a Changelog document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    blocks: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Changelog {
    /// Empty document without any blocks
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse changelog text, dropping free text directly under version
    /// headings
    pub fn parse(text: &str) -> ChangelogResult<Self> {
        parse_changelog(text, &ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: &ParseOptions) -> ChangelogResult<Self> {
        parse_changelog(text, options)
    }

    /// `[title, (rule, blank, version)*, footer*]`
    pub(crate) fn assemble(
        title: TitleBlock,
        versions: Vec<VersionBlock>,
        footer: Vec<Block>,
    ) -> Self {
        let mut blocks = Vec::with_capacity(1 + versions.len() * 3 + footer.len());
        blocks.push(Node::Title(title));
        for version in versions {
            blocks.push(Node::Block(Block::HorizontalRule));
            blocks.push(Node::Block(Block::blank()));
            blocks.push(Node::Version(version));
        }
        blocks.extend(footer.into_iter().map(Node::Block));
        let mut changelog = Self {
            blocks,
            index: HashMap::new(),
        };
        changelog.reindex();
        changelog
    }

    fn reindex(&mut self) {
        self.index = self
            .blocks
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| match node {
                Node::Version(version) => Some((version.ver(), idx)),
                _ => None,
            })
            .collect();
    }

    pub fn nodes(&self) -> &[Node] {
        &self.blocks
    }

    pub fn title(&self) -> Option<&TitleBlock> {
        self.blocks.iter().find_map(|node| match node {
            Node::Title(title) => Some(title),
            _ => None,
        })
    }

    pub fn title_mut(&mut self) -> Option<&mut TitleBlock> {
        self.blocks.iter_mut().find_map(|node| match node {
            Node::Title(title) => Some(title),
            _ => None,
        })
    }

    /// Version blocks in document order
    pub fn version_blocks(&self) -> impl Iterator<Item = &VersionBlock> + '_ {
        self.blocks.iter().filter_map(|node| match node {
            Node::Version(version) => Some(version),
            _ => None,
        })
    }

    /// Version strings in document order (newest first by convention)
    pub fn versions(&self) -> Vec<String> {
        self.version_blocks().map(VersionBlock::ver).collect()
    }

    pub fn get_version(&self, version: &str) -> Option<&VersionBlock> {
        match self.blocks.get(*self.index.get(version)?) {
            Some(Node::Version(block)) => Some(block),
            _ => None,
        }
    }

    pub fn get_version_mut(&mut self, version: &str) -> Option<&mut VersionBlock> {
        let idx = *self.index.get(version)?;
        match self.blocks.get_mut(idx) {
            Some(Node::Version(block)) => Some(block),
            _ => None,
        }
    }

    /// The last version in the file, which by convention is the oldest
    /// release rather than the numerically highest one
    pub fn latest_version(&self) -> Option<&VersionBlock> {
        self.version_blocks().last()
    }

    /// The first version in the file, the newest release by convention
    pub fn recent_version(&self) -> Option<&VersionBlock> {
        self.version_blocks().next()
    }

    pub fn newest_in_file(&self) -> Option<&VersionBlock> {
        self.recent_version()
    }

    pub fn oldest_in_file(&self) -> Option<&VersionBlock> {
        self.latest_version()
    }

    /// Date and entry texts of one version
    pub fn summary(&self, version: &str) -> Option<VersionSummary> {
        let block = self.get_version(version)?;
        let changes = block
            .sections()
            .iter()
            .map(|section| {
                let texts = section.entries().iter().map(|e| e.text().to_string()).collect();
                (section.category, texts)
            })
            .collect();

        Some(VersionSummary {
            version: block.ver(),
            date: block.date().format(DATE_FORMAT).to_string(),
            changes,
        })
    }

    /// Add an empty version ahead of every existing version.
    ///
    /// `date` defaults to the date carried by `version`, or today.
    pub fn add_version(
        &mut self,
        version: &str,
        date: Option<&str>,
    ) -> ChangelogResult<&mut VersionBlock> {
        let mut id = VersionId::parse(version)?;
        if let Some(date) = date {
            id = id.with_date(parse_date(date)?);
        }
        self.insert_version(VersionBlock::new(id))
    }

    /// Insert `version` with its rule and blank separator at the top of the
    /// version list. No numeric sorting is performed.
    pub fn insert_version(&mut self, version: VersionBlock) -> ChangelogResult<&mut VersionBlock> {
        let ver = version.ver();
        if self.index.contains_key(&ver) {
            return Err(ChangelogError::DuplicateVersion(ver));
        }

        let first = self
            .blocks
            .iter()
            .position(|node| matches!(node, Node::Version(_)));

        let slot = match first {
            Some(mut start) => {
                while start > 0 && self.blocks[start - 1].is_separator() {
                    start -= 1;
                }
                let triple = [
                    Node::Block(Block::HorizontalRule),
                    Node::Block(Block::blank()),
                    Node::Version(version),
                ];
                self.blocks.splice(start..start, triple);
                start + 2
            }
            None => {
                // ahead of a link definition footer, after everything else
                let mut end = self
                    .blocks
                    .iter()
                    .rposition(|node| !node.is_footer())
                    .map_or(0, |idx| idx + 1);
                while end > 0 && self.blocks[end - 1].is_separator() {
                    self.blocks.remove(end - 1);
                    end -= 1;
                }
                let before = end.checked_sub(1).and_then(|idx| self.blocks.get_mut(idx));
                if let Some(Node::Title(title)) = before {
                    title.trim_separators();
                }
                let triple = [
                    Node::Block(Block::HorizontalRule),
                    Node::Block(Block::blank()),
                    Node::Version(version),
                ];
                self.blocks.splice(end..end, triple);
                end + 2
            }
        };

        self.reindex();
        tracing::debug!(version = %ver, position = slot, "version inserted");

        self.get_version_mut(&ver)
            .ok_or(ChangelogError::Format(ver))
    }

    /// Remove a version block together with the separators leading it
    pub fn remove_version(&mut self, version: &str) -> Option<VersionBlock> {
        let idx = *self.index.get(version)?;
        if !matches!(self.blocks.get(idx), Some(Node::Version(_))) {
            return None;
        }
        let Node::Version(removed) = self.blocks.remove(idx) else {
            return None;
        };

        let mut start = idx;
        while start > 0 && self.blocks[start - 1].is_separator() {
            start -= 1;
        }
        self.blocks.drain(start..idx);

        self.reindex();
        Some(removed)
    }

    /// Route a change set to its version, creating the version at the top
    /// when it does not exist yet. Each non-empty category gets a section
    /// (created if needed) and the entries are appended in order.
    pub fn add_change(&mut self, change: &ChangeSet) -> ChangelogResult<&mut VersionBlock> {
        let ver = change.version.ver();
        if !self.index.contains_key(&ver) {
            let mut id = change.version;
            if let Some(date) = change.date {
                id = id.with_date(date);
            }
            self.insert_version(VersionBlock::new(id))?;
        }

        let block = self
            .get_version_mut(&ver)
            .ok_or_else(|| ChangelogError::Format(ver.clone()))?;
        for category in change.batch.categories() {
            let section = block.get_or_create_section(category);
            for entry in change.batch.entries(category) {
                section.add(entry.clone());
            }
        }
        Ok(block)
    }

    /// Route a single entry by its target version and date
    pub fn add_entry(&mut self, category: Category, entry: ChangeEntry) -> ChangelogResult<()> {
        let version = entry
            .target_version
            .ok_or_else(|| ChangelogError::Format(format!("no target version for '{}'", entry.text())))?;
        let mut change = ChangeSet::new(version);
        change.date = entry.target_date;
        change.batch.push(category, entry);
        self.add_change(&change)?;
        Ok(())
    }

    /// Seed the standard skeleton when the document has no blocks
    pub fn init(&mut self) {
        let description: Vec<String> = DEFAULT_DESCRIPTION.iter().map(|p| p.to_string()).collect();
        self.init_with(DEFAULT_TITLE, &description);
    }

    /// Seed a skeleton with a custom title and description paragraphs
    pub fn init_with(&mut self, title: &str, description: &[String]) {
        if !self.blocks.is_empty() {
            return;
        }
        let mut title_block = TitleBlock::new(title);
        for paragraph in description {
            title_block.push(Block::paragraph(paragraph.as_str()));
        }
        self.blocks.push(Node::Title(title_block));
        self.blocks.push(Node::Block(Block::HorizontalRule));
        self.reindex();
    }

    /// Concatenation of every node's markdown
    pub fn render(&self) -> String {
        self.blocks.iter().map(Node::to_markdown).collect()
    }
}

impl fmt::Display for Changelog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
