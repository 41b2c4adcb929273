//! Read-only commands: `versions`, `show`, `recent`, `latest`

use super::Workspace;
use crate::models::VersionBlock;
use crate::services::changelog_service;
use crate::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args)]
pub struct ShowArgs {
    /// Version to show (e.g. 1.2.3 or v1.2.3)
    pub version: String,

    /// Print as JSON
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Print as an indented plain-text listing
    #[arg(long)]
    pub text: bool,
}

pub fn list(ws: &Workspace) -> Result<()> {
    let changelog = changelog_service::read_changelog(&ws.root, &ws.config)?;
    let versions: Vec<&VersionBlock> = changelog.version_blocks().collect();

    if versions.is_empty() {
        println!("{}", "No versions yet".yellow());
        return Ok(());
    }

    println!("{}", format!("📦 Versions in {}:", ws.display_path()).cyan().bold());
    for version in versions {
        println!(
            "   {} {}",
            version.ver().green(),
            version.id.date_string().bright_black()
        );
    }
    Ok(())
}

pub fn show(ws: &Workspace, args: &ShowArgs) -> Result<()> {
    let changelog = changelog_service::read_changelog(&ws.root, &ws.config)?;
    let version = changelog_service::find_version(&changelog, &args.version)?;

    if args.json {
        let summary = changelog
            .summary(&version.ver())
            .ok_or_else(|| anyhow::anyhow!("Version '{}' not found", version.ver()))?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if args.text {
        println!("{}", version.to_text());
    } else {
        println!("{}", version.to_markdown().trim_end());
    }
    Ok(())
}

/// First version in the file
pub fn recent(ws: &Workspace) -> Result<()> {
    let changelog = changelog_service::read_changelog(&ws.root, &ws.config)?;
    print_one(changelog.recent_version())
}

/// Last version in the file
pub fn latest(ws: &Workspace) -> Result<()> {
    let changelog = changelog_service::read_changelog(&ws.root, &ws.config)?;
    print_one(changelog.latest_version())
}

fn print_one(version: Option<&VersionBlock>) -> Result<()> {
    match version {
        Some(version) => {
            println!("{}", version.ver());
            Ok(())
        }
        None => anyhow::bail!("Changelog has no versions"),
    }
}
