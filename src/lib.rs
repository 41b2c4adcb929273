// changelog - Keep a Changelog document model
// Parse a changelog into a tree, query and edit it, render it back to markdown

pub mod cli;
pub mod models;
pub mod parser;
pub mod services;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{
    Category, ChangeEntry, ChangeSet, Changelog, ChangelogConfig, ChangelogError, ChangelogResult,
    Section, VersionBlock, VersionId,
};
pub use parser::ParseOptions;
