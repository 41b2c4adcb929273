//! `changelog fmt`

use super::Workspace;
use crate::services::changelog_service;
use crate::Result;
use colored::Colorize;

pub fn run(ws: &Workspace, check: bool) -> Result<()> {
    let changed = changelog_service::format_changelog(&ws.root, &ws.config, check)?;

    match (changed, check) {
        (false, _) => println!("{}", format!("✓ {} is already formatted", ws.display_path()).green()),
        (true, false) => println!("{}", format!("✅ Reformatted {}", ws.display_path()).green()),
        (true, true) => anyhow::bail!("{} is not formatted. Run 'changelog fmt'.", ws.display_path()),
    }
    Ok(())
}
