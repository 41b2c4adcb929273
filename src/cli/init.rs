//! `changelog init`

use super::Workspace;
use crate::services::changelog_service;
use crate::Result;
use colored::Colorize;

pub fn run(ws: &Workspace, force: bool) -> Result<()> {
    changelog_service::init_changelog(&ws.root, &ws.config, force)?;

    println!(
        "{}",
        format!("✅ Created {}", ws.display_path()).green().bold()
    );
    println!();
    println!("{}", "⏭️  Next Steps:".yellow().bold());
    println!("   {}", "changelog add-version 0.1.0".cyan());
    println!(
        "   {}",
        "changelog add-change 0.1.0 --added \"Initial release\"".cyan()
    );
    Ok(())
}
