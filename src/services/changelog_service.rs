//! Changelog service - file-backed operations shared by CLI commands

use crate::models::{
    parse_date, ChangeSet, Changelog, ChangelogConfig, ChangelogError, VersionBlock, VersionId,
};
use crate::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve a version argument.
///
/// Full semver strings go through `semver` so pre-release tags are reported
/// instead of being silently cut off; anything else uses the lenient
/// changelog parser (`v1`, `1.2`, `[1.2.3] - 2024-01-01`).
pub fn parse_version_arg(input: &str) -> Result<VersionId> {
    let trimmed = input.trim().trim_start_matches('v');
    if let Ok(version) = semver::Version::parse(trimmed) {
        return VersionId::from_semver(&version).map_err(|_| {
            anyhow::anyhow!(
                "Version '{}' has pre-release or build metadata, which a changelog heading cannot carry",
                input
            )
        });
    }
    Ok(VersionId::parse(input)?)
}

/// Read and parse the configured changelog file
pub fn read_changelog(project_root: &Path, config: &ChangelogConfig) -> Result<Changelog> {
    let path = config.changelog_path(project_root);
    if !path.exists() {
        anyhow::bail!(
            "Changelog not found: {}. Run 'changelog init' first.",
            path.display()
        );
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let changelog = match Changelog::parse_with(&content, &config.parse_options()) {
        Ok(changelog) => changelog,
        Err(ChangelogError::Format(heading)) if is_unreleased(&heading) => anyhow::bail!(
            "Failed to parse {}: '{}' has no version number. Release the pending changes \
             under a numbered heading (changelog add-change <version> ...) and remove it.",
            path.display(),
            heading
        ),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to parse {}", path.display()));
        }
    };
    tracing::debug!(path = %path.display(), versions = changelog.versions().len(), "changelog loaded");
    Ok(changelog)
}

fn is_unreleased(heading: &str) -> bool {
    heading.to_ascii_lowercase().contains("unreleased")
}

/// Render and write the changelog to the configured file
pub fn write_changelog(
    project_root: &Path,
    config: &ChangelogConfig,
    changelog: &Changelog,
) -> Result<PathBuf> {
    let path = config.changelog_path(project_root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, changelog.render())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "changelog written");
    Ok(path)
}

/// Create a new changelog with the configured skeleton
pub fn init_changelog(project_root: &Path, config: &ChangelogConfig, force: bool) -> Result<PathBuf> {
    let path = config.changelog_path(project_root);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let mut changelog = Changelog::new();
    changelog.init_with(&config.title, &config.description);
    write_changelog(project_root, config, &changelog)
}

/// Add an empty version at the top; returns its version string
pub fn add_version(
    project_root: &Path,
    config: &ChangelogConfig,
    version: &str,
    date: Option<&str>,
) -> Result<String> {
    let mut id = parse_version_arg(version)?;
    if let Some(date) = date {
        id = id.with_date(parse_date(date)?);
    }

    let mut changelog = read_changelog(project_root, config)?;
    let ver = changelog.insert_version(VersionBlock::new(id))?.ver();
    write_changelog(project_root, config, &changelog)?;
    Ok(ver)
}

/// Apply a change set; returns the version it landed in
pub fn add_change(project_root: &Path, config: &ChangelogConfig, change: &ChangeSet) -> Result<String> {
    if change.batch.is_empty() {
        anyhow::bail!("At least one change entry is required");
    }

    let mut changelog = read_changelog(project_root, config)?;
    let ver = changelog.add_change(change)?.ver();
    write_changelog(project_root, config, &changelog)?;
    Ok(ver)
}

/// Look up one version or fail with a readable message
pub fn find_version<'a>(changelog: &'a Changelog, version: &str) -> Result<&'a VersionBlock> {
    let ver = parse_version_arg(version)?.ver();
    changelog.get_version(&ver).ok_or_else(|| {
        anyhow::anyhow!(
            "Version '{}' not found. Available: {}",
            ver,
            changelog.versions().join(", ")
        )
    })
}

/// Re-render the changelog in canonical form.
///
/// Returns `true` when the file content differs from the canonical form.
/// With `check` the file is left untouched.
pub fn format_changelog(project_root: &Path, config: &ChangelogConfig, check: bool) -> Result<bool> {
    let path = config.changelog_path(project_root);
    let changelog = read_changelog(project_root, config)?;
    let current = std::fs::read_to_string(&path)?;
    let rendered = changelog.render();
    let changed = current != rendered;

    if changed && !check {
        write_changelog(project_root, config, &changelog)?;
    }
    Ok(changed)
}
