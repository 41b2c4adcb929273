//! Mutating commands: `add-version`, `add-change`

use super::Workspace;
use crate::models::{parse_date, Category, ChangeBatch, ChangeEntry, ChangeSet};
use crate::services::changelog_service;
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct AddVersionArgs {
    /// Version to add (e.g. 1.2.0)
    pub version: String,

    /// Release date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct AddChangeArgs {
    /// Target version; created at the top when missing
    pub version: String,

    /// Release date used when the version has to be created
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub added: Vec<String>,

    #[arg(long, value_name = "TEXT")]
    pub changed: Vec<String>,

    #[arg(long, value_name = "TEXT")]
    pub deprecated: Vec<String>,

    #[arg(long, value_name = "TEXT")]
    pub removed: Vec<String>,

    #[arg(long, value_name = "TEXT")]
    pub fixed: Vec<String>,

    #[arg(long, value_name = "TEXT")]
    pub security: Vec<String>,

    /// JSON file mapping category keys to entries,
    /// e.g. {"added": ["Export"], "fixed": "- Crash\n- Leak"}
    #[arg(long)]
    pub json_file: Option<PathBuf>,
}

impl AddChangeArgs {
    fn flags(&self) -> [(Category, &[String]); 6] {
        [
            (Category::Added, self.added.as_slice()),
            (Category::Changed, self.changed.as_slice()),
            (Category::Deprecated, self.deprecated.as_slice()),
            (Category::Removed, self.removed.as_slice()),
            (Category::Fixed, self.fixed.as_slice()),
            (Category::Security, self.security.as_slice()),
        ]
    }

    /// Collect entries from the JSON file first, then from the flags
    pub fn to_change_set(&self) -> Result<ChangeSet> {
        let mut change = ChangeSet::new(changelog_service::parse_version_arg(&self.version)?);
        if let Some(date) = &self.date {
            change = change.with_date(parse_date(date)?);
        }

        if let Some(path) = &self.json_file {
            let content = std::fs::read_to_string(path)?;
            let batch: ChangeBatch = serde_json::from_str(&content)?;
            for category in batch.categories() {
                for entry in batch.entries(category) {
                    change.batch.push(category, entry.clone());
                }
            }
        }

        for (category, texts) in self.flags() {
            for text in texts {
                change.batch.push(category, ChangeEntry::from_text(text));
            }
        }
        Ok(change)
    }
}

pub fn add_version(ws: &Workspace, args: &AddVersionArgs) -> Result<()> {
    let ver = changelog_service::add_version(
        &ws.root,
        &ws.config,
        &args.version,
        args.date.as_deref(),
    )?;
    println!(
        "{}",
        format!("✅ Added version {} to {}", ver, ws.display_path()).green()
    );
    Ok(())
}

pub fn add_change(ws: &Workspace, args: &AddChangeArgs) -> Result<()> {
    let change = args.to_change_set()?;
    let ver = changelog_service::add_change(&ws.root, &ws.config, &change)?;

    println!(
        "{}",
        format!("✅ Recorded changes under {}", ver).green()
    );
    for category in change.batch.categories() {
        println!("   {}", category.name().cyan());
        for entry in change.batch.entries(category) {
            println!("     {}", entry);
        }
    }
    Ok(())
}
