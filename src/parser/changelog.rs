//! Changelog structuring pass
//!
//! Folds the flat block sequence into a title and version blocks. The only
//! context carried between blocks (open version, open section) lives in
//! [`ParseState`], which is local to one call.

use super::markdown::{parse_blocks, Block};
use crate::models::{
    Category, ChangeEntry, Changelog, ChangelogError, ChangelogResult, Section, TitleBlock,
    VersionBlock,
};
use std::collections::HashMap;

/// Parser behaviour switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep free text found directly under a version heading (before any
    /// category heading) as version notes instead of dropping it
    pub retain_version_notes: bool,
}

#[derive(Debug, Default)]
struct ParseState {
    title: TitleBlock,
    versions: Vec<VersionBlock>,
    footer: Vec<Block>,
    positions: HashMap<String, usize>,
    current_version: Option<usize>,
    current_section: Option<Category>,
}

impl ParseState {
    /// Consume one block; `row` is its 1-based position
    fn step(mut self, row: usize, block: Block, options: &ParseOptions) -> ChangelogResult<Self> {
        match block {
            Block::Heading { level: 1, content } => {
                self.title.heading = Some(content);
            }
            Block::Heading { level: 2, content } => {
                let version = VersionBlock::parse(&content)?;
                let ver = version.ver();
                let idx = match self.positions.get(&ver) {
                    Some(&idx) => {
                        tracing::warn!(version = %ver, row, "duplicate version heading replaces earlier entry");
                        self.versions[idx] = version;
                        idx
                    }
                    None => {
                        self.versions.push(version);
                        let idx = self.versions.len() - 1;
                        self.positions.insert(ver, idx);
                        idx
                    }
                };
                self.current_version = Some(idx);
                self.current_section = None;
            }
            Block::Heading { level: 3, content } => {
                let idx = self
                    .current_version
                    .ok_or(ChangelogError::Sequence { row })?;
                let section = Section::from_name(&content)?;
                let category = section.category;
                self.versions[idx].add_or_get_section(section);
                self.current_section = Some(category);
            }
            Block::Definitions { .. } if !self.versions.is_empty() => {
                self.footer.push(block);
            }
            other => self.route(other, options),
        }
        Ok(self)
    }

    fn route(&mut self, block: Block, options: &ParseOptions) {
        match (self.current_version, self.current_section) {
            (Some(idx), Some(category)) => {
                let section = self.versions[idx].get_or_create_section(category);
                route_into_section(section, block);
            }
            (Some(idx), None) => {
                if block.is_separator() {
                    return;
                }
                if options.retain_version_notes {
                    self.versions[idx].push_note(block);
                } else {
                    tracing::debug!(
                        version = %self.versions[idx].id,
                        "dropping free text under version heading"
                    );
                }
            }
            (None, _) => self.title.push(block),
        }
    }

    fn finish(mut self) -> Changelog {
        if !self.versions.is_empty() {
            self.title.trim_separators();
        }
        Changelog::assemble(self.title, self.versions, self.footer)
    }
}

fn route_into_section(section: &mut Section, block: Block) {
    match block {
        Block::List { items, .. } => {
            for item in items {
                section.add(ChangeEntry::new(item));
            }
        }
        Block::Paragraph { content } => {
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                section.add(ChangeEntry::from_text(line));
            }
        }
        Block::HorizontalRule => {}
        other => {
            tracing::debug!(category = %section.category, block = ?other, "dropping block inside section");
        }
    }
}

/// Parse changelog text into a document
pub fn parse_changelog(text: &str, options: &ParseOptions) -> ChangelogResult<Changelog> {
    let state = parse_blocks(text)
        .into_iter()
        .enumerate()
        .try_fold(ParseState::default(), |state, (idx, block)| {
            state.step(idx + 1, block, options)
        })?;
    Ok(state.finish())
}
