//! Integration tests for the file-backed commands
//!
//! Each test runs the command functions against a temporary project root,
//! the same way the binary does after resolving the workspace.

use changelog::cli::change::{self, AddChangeArgs, AddVersionArgs};
use changelog::cli::{fmt, init, versions, Workspace};
use changelog::models::Category;
use changelog::services::changelog_service;
use changelog::Changelog;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn workspace(temp: &TempDir) -> Workspace {
    Workspace::at(temp.path().to_path_buf(), None).unwrap()
}

fn add_change_args(version: &str) -> AddChangeArgs {
    AddChangeArgs {
        version: version.to_string(),
        date: Some("2024-05-01".to_string()),
        added: Vec::new(),
        changed: Vec::new(),
        deprecated: Vec::new(),
        removed: Vec::new(),
        fixed: Vec::new(),
        security: Vec::new(),
        json_file: None,
    }
}

fn load(ws: &Workspace) -> Changelog {
    changelog_service::read_changelog(&ws.root, &ws.config).unwrap()
}

#[test]
fn test_full_release_workflow() {
    let temp = TempDir::new().unwrap();
    let ws = workspace(&temp);

    init::run(&ws, false).unwrap();
    assert!(ws.changelog_path().exists());

    change::add_version(
        &ws,
        &AddVersionArgs {
            version: "0.1.0".to_string(),
            date: Some("2024-01-01".to_string()),
        },
    )
    .unwrap();

    let mut args = add_change_args("0.2.0");
    args.added = vec!["Search".to_string()];
    args.fixed = vec!["- Crash on empty query".to_string()];
    change::add_change(&ws, &args).unwrap();

    let changelog = load(&ws);
    assert_eq!(changelog.versions(), vec!["0.2.0", "0.1.0"]);
    let summary = changelog.summary("0.2.0").unwrap();
    assert_eq!(summary.date, "2024-05-01");
    assert_eq!(summary.changes[&Category::Added], vec!["Search"]);
    assert_eq!(summary.changes[&Category::Fixed], vec!["Crash on empty query"]);

    // the file is written in canonical form
    fmt::run(&ws, true).unwrap();
}

#[test]
fn test_queries_on_empty_changelog() {
    let temp = TempDir::new().unwrap();
    let ws = workspace(&temp);
    init::run(&ws, false).unwrap();

    versions::list(&ws).unwrap();
    assert!(versions::recent(&ws).is_err());
    assert!(versions::latest(&ws).is_err());
}

#[test]
fn test_show_unknown_version_fails() {
    let temp = TempDir::new().unwrap();
    let ws = workspace(&temp);
    init::run(&ws, false).unwrap();

    let args = versions::ShowArgs {
        version: "9.9.9".to_string(),
        json: true,
        text: false,
    };
    assert!(versions::show(&ws, &args).is_err());
}

#[test]
fn test_commands_require_a_changelog() {
    let temp = TempDir::new().unwrap();
    let ws = workspace(&temp);

    let err = versions::list(&ws).unwrap_err();
    assert!(err.to_string().contains("changelog init"));
}

#[test]
fn test_fmt_check_reports_unformatted_file() {
    let temp = TempDir::new().unwrap();
    let ws = workspace(&temp);
    fs::write(
        ws.changelog_path(),
        "# Changelog\n## [1.0.0] - 2024-01-01\n### Added\n- Core\n",
    )
    .unwrap();

    assert!(fmt::run(&ws, true).is_err());
    fmt::run(&ws, false).unwrap();
    fmt::run(&ws, true).unwrap();

    let content = fs::read_to_string(ws.changelog_path()).unwrap();
    assert!(content.contains("---\n\n## [1.0.0] - 2024-01-01\n\n### Added\n\n- Core\n"));
}

#[test]
fn test_config_file_and_override() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("changelog.toml"),
        "file = \"HISTORY.md\"\ntitle = \"Release History\"\ndescription = []\n",
    )
    .unwrap();

    let ws = workspace(&temp);
    init::run(&ws, false).unwrap();
    let content = fs::read_to_string(temp.path().join("HISTORY.md")).unwrap();
    assert_eq!(content, "# Release History\n\n---\n\n");

    let other = Workspace::at(
        temp.path().to_path_buf(),
        Some(PathBuf::from("docs/CHANGES.md")),
    )
    .unwrap();
    init::run(&other, false).unwrap();
    assert!(temp.path().join("docs/CHANGES.md").exists());
}
