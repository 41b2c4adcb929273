//! Markdown block tokenizer (AST-based)
//!
//! Turns text into a flat sequence of top-level blocks and back. Uses the
//! pulldown-cmark event stream with source offsets so that paragraphs and
//! unrecognized blocks keep their exact source text.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// One top-level markdown block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading, `content` without the `#` marks
    Heading { level: u8, content: String },
    /// Paragraph, verbatim source text
    Paragraph { content: String },
    /// Single-level list, one string per item with the marker stripped
    List { ordered: bool, items: Vec<String> },
    /// Thematic break (`---`)
    HorizontalRule,
    /// Anything else (code, quotes, tables, html), verbatim source text
    Other { raw: String },
    /// Link reference definitions (`[1.0.0]: https://...`), verbatim
    Definitions { raw: String },
}

impl Block {
    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        Block::Heading {
            level,
            content: content.into(),
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Block::Paragraph {
            content: content.into(),
        }
    }

    /// Empty paragraph placeholder
    pub fn blank() -> Self {
        Block::paragraph("")
    }

    /// Horizontal rules and empty paragraphs separate version groups
    pub fn is_separator(&self) -> bool {
        match self {
            Block::HorizontalRule => true,
            Block::Paragraph { content } => content.trim().is_empty(),
            _ => false,
        }
    }

    /// Markdown form including its own trailing blank line
    pub fn to_markdown(&self) -> String {
        match self {
            Block::Heading { level, content } => {
                format!("{} {}\n\n", "#".repeat(usize::from(*level)), content)
            }
            Block::Paragraph { content } if content.is_empty() => String::new(),
            Block::Paragraph { content } => format!("{}\n\n", content),
            Block::List { ordered, items } => {
                let mut out = String::new();
                for (idx, item) in items.iter().enumerate() {
                    if *ordered {
                        out.push_str(&format!("{}. {}\n", idx + 1, item));
                    } else {
                        out.push_str(&format!("- {}\n", item));
                    }
                }
                out.push('\n');
                out
            }
            Block::HorizontalRule => "---\n\n".to_string(),
            Block::Other { raw } | Block::Definitions { raw } => format!("{}\n\n", raw),
        }
    }
}

fn list_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:[-*+]|\d+[.)])[ \t]?").expect("marker pattern is valid"))
}

fn definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}\[[^\]]+\]:").expect("definition pattern is valid"))
}

/// Source between two top-level blocks. pulldown-cmark emits no event for
/// link reference definitions, so they only show up here.
fn gap_block(gap: &str) -> Option<Block> {
    let raw = gap.trim_matches(|c: char| c == '\n' || c == '\r').trim_end();
    if raw.trim().is_empty() {
        return None;
    }
    if definition_regex().is_match(raw) {
        Some(Block::Definitions {
            raw: raw.to_string(),
        })
    } else {
        tracing::debug!(text = raw, "ignoring source text between blocks");
        None
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Marker stripped, lines trimmed and joined by a single space
fn item_text(raw: &str) -> String {
    let stripped = list_marker_regex().replace(raw, "");
    stripped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects the items of the top-level list being walked
struct ListState {
    ordered: bool,
    items: Vec<String>,
    item: Option<Range<usize>>,
    cut: Option<usize>,
}

impl ListState {
    fn new(ordered: bool) -> Self {
        Self {
            ordered,
            items: Vec::new(),
            item: None,
            cut: None,
        }
    }

    fn begin_item(&mut self, range: Range<usize>) {
        self.item = Some(range);
        self.cut = None;
    }

    /// A nested list starts; the item text ends there
    fn cut_item(&mut self, at: usize) {
        if self.item.is_some() && self.cut.is_none() {
            self.cut = Some(at);
        }
    }

    fn finish_item(&mut self, source: &str) {
        if let Some(range) = self.item.take() {
            let end = self.cut.take().unwrap_or(range.end);
            let text = item_text(&source[range.start..end]);
            if text.is_empty() && end < range.end {
                // `- - foo`, `- 1. foo`: the item opens with a nested list
                // marker, which is the item's own text
                let raw = &source[range.start..range.end];
                let first = raw.lines().next().unwrap_or_default();
                let stripped = list_marker_regex().replace(first, "");
                self.items.push(stripped.trim().to_string());
            } else {
                self.items.push(text);
            }
        }
    }

    fn into_block(self) -> Block {
        Block::List {
            ordered: self.ordered,
            items: self.items,
        }
    }
}

/// Blocks for a heading event. Setext headings underlined with dashes are a
/// paragraph followed by a horizontal rule.
fn heading_blocks(source: &str, range: Range<usize>, level: u8) -> Vec<Block> {
    let raw = source[range.clone()].trim();
    if raw.starts_with('#') {
        return vec![Block::heading(level, atx_content(raw))];
    }

    // Setext: content lines up to the first underline line
    let mut content = Vec::new();
    let mut dashed = false;
    for line in source[range.start..].lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c == '-') {
            dashed = true;
            break;
        }
        if !trimmed.is_empty() && trimmed.chars().all(|c| c == '=') {
            break;
        }
        content.push(line.trim_end());
    }

    if dashed {
        vec![Block::paragraph(content.join("\n")), Block::HorizontalRule]
    } else {
        let joined = content.iter().map(|l| l.trim()).collect::<Vec<_>>().join(" ");
        vec![Block::heading(level, joined)]
    }
}

fn atx_content(line: &str) -> String {
    let content = line.trim_start_matches('#').trim();
    let without_closing = content.trim_end_matches('#');
    if without_closing.is_empty() || without_closing.ends_with(char::is_whitespace) {
        without_closing.trim_end().to_string()
    } else {
        content.to_string()
    }
}

/// Split markdown text into its top-level blocks
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let parser = Parser::new_ext(text, Options::empty()).into_offset_iter();
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut list: Option<ListState> = None;
    let mut last_end = 0usize;

    for (event, range) in parser {
        if depth == 0 && matches!(event, Event::Start(_) | Event::Rule) {
            if let Some(gap) = text.get(last_end..range.start).and_then(gap_block) {
                blocks.push(gap);
            }
        }

        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    match tag {
                        Tag::Heading { level, .. } => {
                            blocks.extend(heading_blocks(text, range, heading_level(level)));
                        }
                        Tag::Paragraph => {
                            blocks.push(Block::paragraph(text[range].trim_end()));
                        }
                        Tag::List(start) => list = Some(ListState::new(start.is_some())),
                        _ => blocks.push(Block::Other {
                            raw: text[range].trim_end().to_string(),
                        }),
                    }
                } else if let Some(state) = list.as_mut() {
                    match tag {
                        Tag::Item if depth == 1 => state.begin_item(range),
                        Tag::List(_) => state.cut_item(range.start),
                        _ => {}
                    }
                }
                depth += 1;
            }
            Event::End(tag) => {
                depth = depth.saturating_sub(1);
                if depth == 1 && tag == TagEnd::Item {
                    if let Some(state) = list.as_mut() {
                        state.finish_item(text);
                    }
                }
                if depth == 0 {
                    last_end = last_end.max(range.end);
                    if let Some(state) = list.take() {
                        blocks.push(state.into_block());
                    }
                }
            }
            Event::Rule if depth == 0 => {
                last_end = last_end.max(range.end);
                blocks.push(Block::HorizontalRule);
            }
            _ => {}
        }
    }

    if let Some(gap) = text.get(last_end..).and_then(gap_block) {
        blocks.push(gap);
    }

    blocks
}

/// Concatenate the markdown form of every block
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(Block::to_markdown).collect()
}
