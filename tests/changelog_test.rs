//! Integration tests for the changelog document model
//!
//! Covers parsing the standard three-version sample, version insertion,
//! change routing and parse/render stability.

use changelog::models::{parse_date, Category, ChangeEntry, ChangeSet, Changelog, Section};
use changelog::{ChangelogError, ParseOptions, VersionId};

const SAMPLE: &str = r#"# Changelog

All notable changes to this project will be documented in this file.

## [1.1.1] - 2023-03-05

### Added

- Arabic translation (#444).
- v1.1 French translation.

### Fixed

- Improve French translation (#377).

## [1.1.0] - 2019-02-15

### Added

- Danish translation (#297).

### Changed

- Fix typos in Italian translation (#311).

## [1.0.0] - 2017-06-20

### Added

- New visual identity.
"#;

fn sample() -> Changelog {
    Changelog::parse(SAMPLE).unwrap()
}

fn texts(changelog: &Changelog, version: &str, category: Category) -> Vec<String> {
    changelog
        .get_version(version)
        .and_then(|v| v.section(category))
        .map(|s| s.entries().iter().map(|e| e.text().to_string()).collect())
        .unwrap_or_default()
}

// =========================================================================
// Queries
// =========================================================================

#[test]
fn test_sample_versions_in_file_order() {
    let changelog = sample();
    assert_eq!(changelog.versions(), vec!["1.1.1", "1.1.0", "1.0.0"]);
    assert_eq!(changelog.recent_version().unwrap().ver(), "1.1.1");
    assert_eq!(changelog.latest_version().unwrap().ver(), "1.0.0");
    assert_eq!(changelog.newest_in_file().unwrap().ver(), "1.1.1");
    assert_eq!(changelog.oldest_in_file().unwrap().ver(), "1.0.0");
}

#[test]
fn test_sample_sections_and_entries() {
    let changelog = sample();
    assert_eq!(
        texts(&changelog, "1.1.1", Category::Added),
        vec!["Arabic translation (#444).", "v1.1 French translation."]
    );
    assert_eq!(
        texts(&changelog, "1.1.0", Category::Changed),
        vec!["Fix typos in Italian translation (#311)."]
    );

    let version = changelog.get_version("1.1.1").unwrap();
    let order: Vec<Category> = version.sections().iter().map(|s| s.category).collect();
    assert_eq!(order, vec![Category::Added, Category::Fixed]);
    assert_eq!(version.date().to_string(), "2023-03-05");
    assert!(changelog.get_version("2.0.0").is_none());
}

#[test]
fn test_summary_serializes_to_json() {
    let summary = sample().summary("1.1.0").unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["version"], "1.1.0");
    assert_eq!(json["date"], "2019-02-15");
    assert_eq!(json["changes"]["added"][0], "Danish translation (#297).");
    assert_eq!(json["changes"]["changed"][0], "Fix typos in Italian translation (#311).");
}

// =========================================================================
// Mutations
// =========================================================================

#[test]
fn test_add_version_goes_first_regardless_of_rank() {
    let mut changelog = sample();
    changelog.add_version("1.2.0", Some("2025-01-01")).unwrap();
    assert_eq!(changelog.versions()[0], "1.2.0");

    changelog.add_version("0.9.0", Some("2025-02-01")).unwrap();
    assert_eq!(
        changelog.versions(),
        vec!["0.9.0", "1.2.0", "1.1.1", "1.1.0", "1.0.0"]
    );
    assert_eq!(changelog.recent_version().unwrap().ver(), "0.9.0");
}

#[test]
fn test_add_version_twice_is_rejected() {
    let mut changelog = sample();
    let err = changelog.add_version("1.1.0", None).unwrap_err();
    assert_eq!(err, ChangelogError::DuplicateVersion("1.1.0".to_string()));
    assert_eq!(changelog.versions().len(), 3);
}

#[test]
fn test_add_version_with_bad_date() {
    let mut changelog = sample();
    assert!(matches!(
        changelog.add_version("1.2.0", Some("2025-13-45")),
        Err(ChangelogError::InvalidDate(_))
    ));
}

#[test]
fn test_add_change_creates_exactly_the_given_categories() {
    let mut changelog = sample();
    let change = ChangeSet::new(VersionId::parse("2.0.0").unwrap())
        .with_date(parse_date("2025-03-01").unwrap())
        .add(Category::Security, "- Patch XSS")
        .add(Category::Removed, "- Legacy API")
        .add(Category::Security, "Rotate keys");

    changelog.add_change(&change).unwrap();

    assert_eq!(changelog.versions()[0], "2.0.0");
    let version = changelog.get_version("2.0.0").unwrap();
    assert_eq!(version.date().to_string(), "2025-03-01");

    let order: Vec<Category> = version.sections().iter().map(|s| s.category).collect();
    assert_eq!(order, vec![Category::Removed, Category::Security]);
    assert_eq!(
        texts(&changelog, "2.0.0", Category::Security),
        vec!["Patch XSS", "Rotate keys"]
    );
}

#[test]
fn test_add_change_appends_to_existing_version() {
    let mut changelog = sample();
    let change = ChangeSet::new(VersionId::new(1, 1, 0))
        .add(Category::Added, "Swedish translation")
        .add(Category::Fixed, "Broken link");
    changelog.add_change(&change).unwrap();

    assert_eq!(changelog.versions(), vec!["1.1.1", "1.1.0", "1.0.0"]);
    assert_eq!(
        texts(&changelog, "1.1.0", Category::Added),
        vec!["Danish translation (#297).", "Swedish translation"]
    );
    let order: Vec<Category> = changelog
        .get_version("1.1.0")
        .unwrap()
        .sections()
        .iter()
        .map(|s| s.category)
        .collect();
    assert_eq!(order, vec![Category::Added, Category::Changed, Category::Fixed]);
}

#[test]
fn test_add_entry_routes_by_target() {
    let mut changelog = sample();
    let entry = ChangeEntry::from_text("- Hotfix")
        .with_target(VersionId::new(1, 1, 2), Some(parse_date("2023-04-01").unwrap()));
    changelog.add_entry(Category::Fixed, entry).unwrap();
    assert_eq!(texts(&changelog, "1.1.2", Category::Fixed), vec!["Hotfix"]);

    let untargeted = ChangeEntry::new("Nowhere to go");
    assert!(matches!(
        changelog.add_entry(Category::Fixed, untargeted),
        Err(ChangelogError::Format(_))
    ));
}

#[test]
fn test_remove_version_keeps_neighbours() {
    let mut changelog = sample();
    let removed = changelog.remove_version("1.1.0").unwrap();
    assert_eq!(removed.ver(), "1.1.0");
    assert_eq!(changelog.versions(), vec!["1.1.1", "1.0.0"]);
    assert!(changelog.get_version("1.0.0").is_some());
    assert!(changelog.remove_version("1.1.0").is_none());

    let rendered = changelog.render();
    assert_eq!(Changelog::parse(&rendered).unwrap().render(), rendered);
}

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn test_canonical_rendering_of_sample() {
    let expected = "\
# Changelog

All notable changes to this project will be documented in this file.

---

## [1.1.1] - 2023-03-05

### Added

- Arabic translation (#444).
- v1.1 French translation.

### Fixed

- Improve French translation (#377).

---

## [1.1.0] - 2019-02-15

### Added

- Danish translation (#297).

### Changed

- Fix typos in Italian translation (#311).

---

## [1.0.0] - 2017-06-20

### Added

- New visual identity.

";
    assert_eq!(sample().render(), expected);
}

#[test]
fn test_round_trip_is_stable() {
    let mut changelog = sample();
    changelog.add_version("1.2.0", Some("2025-01-01")).unwrap();
    changelog
        .add_change(&ChangeSet::new(VersionId::new(1, 2, 0)).add(Category::Deprecated, "Old flag"))
        .unwrap();

    let first = changelog.render();
    let reparsed = Changelog::parse(&first).unwrap();
    assert_eq!(reparsed.versions(), changelog.versions());
    for ver in changelog.versions() {
        assert_eq!(reparsed.get_version(&ver), changelog.get_version(&ver));
    }

    let second = reparsed.render();
    assert_eq!(second, first);
    assert_eq!(Changelog::parse(&second).unwrap().render(), second);
}

#[test]
fn test_entries_starting_with_a_marker_survive_round_trip() {
    let mut changelog = sample();
    let change = ChangeSet::new(VersionId::new(1, 2, 0))
        .add(Category::Changed, ChangeEntry::from_text("- - nested"))
        .add(Category::Changed, ChangeEntry::new("1. step one"))
        .add(Category::Changed, ChangeEntry::new("* starred"));
    changelog.add_change(&change).unwrap();

    let before = texts(&changelog, "1.2.0", Category::Changed);
    assert_eq!(before, vec!["- nested", "1. step one", "* starred"]);

    let rendered = changelog.render();
    let reparsed = Changelog::parse(&rendered).unwrap();
    assert_eq!(texts(&reparsed, "1.2.0", Category::Changed), before);
    assert_eq!(reparsed.render(), rendered);
}

#[test]
fn test_link_reference_footer_survives() {
    let text = format!(
        "{}\n[1.1.1]: https://example.com/compare/v1.1.0...v1.1.1\n[1.1.0]: https://example.com/compare/v1.0.0...v1.1.0\n[1.0.0]: https://example.com/releases/tag/v1.0.0\n",
        SAMPLE
    );
    let mut changelog = Changelog::parse(&text).unwrap();
    assert_eq!(changelog.versions(), vec!["1.1.1", "1.1.0", "1.0.0"]);

    let footer = "- New visual identity.\n\n[1.1.1]: https://example.com/compare/v1.1.0...v1.1.1\n[1.1.0]: https://example.com/compare/v1.0.0...v1.1.0\n[1.0.0]: https://example.com/releases/tag/v1.0.0\n\n";
    let rendered = changelog.render();
    assert!(rendered.ends_with(footer));
    assert_eq!(Changelog::parse(&rendered).unwrap().render(), rendered);

    changelog.add_version("1.2.0", Some("2025-01-01")).unwrap();
    assert!(changelog.render().ends_with(footer));
    assert!(changelog.render().contains("# Changelog\n\nAll notable changes to this project will be documented in this file.\n\n---\n\n## [1.2.0] - 2025-01-01\n\n---\n\n## [1.1.1]"));
}

#[test]
fn test_init_then_first_version() {
    let mut changelog = Changelog::new();
    changelog.init();
    changelog.add_version("0.1.0", Some("2024-01-01")).unwrap();

    let rendered = changelog.render();
    assert!(rendered.ends_with("adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).\n\n---\n\n## [0.1.0] - 2024-01-01\n\n"));
    assert_eq!(rendered.matches("---").count(), 1);
    assert_eq!(Changelog::parse(&rendered).unwrap().render(), rendered);
}

#[test]
fn test_retained_notes_survive_round_trip() {
    let text = "# Changelog\n\n## [1.0.0] - 2024-01-01\n\nFirst stable release.\n\n### Added\n\n- Core\n";
    let options = ParseOptions {
        retain_version_notes: true,
    };
    let rendered = Changelog::parse_with(text, &options).unwrap().render();
    assert!(rendered.contains("First stable release."));
    assert_eq!(Changelog::parse_with(&rendered, &options).unwrap().render(), rendered);

    let dropped = Changelog::parse(text).unwrap().render();
    assert!(!dropped.contains("First stable release."));
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_category_before_version_is_a_sequence_error() {
    let text = "# Changelog\n\n### Added\n\n- Orphan\n";
    assert!(matches!(
        Changelog::parse(text),
        Err(ChangelogError::Sequence { .. })
    ));
}

#[test]
fn test_malformed_version_heading() {
    assert!(matches!(
        Changelog::parse("## [Unreleased]\n"),
        Err(ChangelogError::Format(_))
    ));
    assert!(matches!(
        Changelog::parse("## [1.0.0] - someday\n"),
        Err(ChangelogError::InvalidDate(_))
    ));
}

#[test]
fn test_section_from_label() {
    let fixed = Section::from_name("Fixed").unwrap();
    assert_eq!(fixed.category, Category::Fixed);
    assert!(fixed.is_empty());

    let mut existing = Section::from(Category::Added);
    existing.add("- Kept");
    let same = Section::from(existing.clone());
    assert_eq!(same, existing);

    assert!(matches!(
        Section::from_name("Misc"),
        Err(ChangelogError::InvalidCategory(_))
    ));
}
