//! Version identifier: a comparable `major.minor.patch` triple with a date

use super::{ChangelogError, ChangelogResult};
use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

/// Date layout used in version headings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator between the version and the date in a heading
const DATE_SEPARATOR: &str = " - ";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("version pattern is valid")
    })
}

/// Parse a `YYYY-MM-DD` date, failing on anything else
pub fn parse_date(input: &str) -> ChangelogResult<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ChangelogError::InvalidDate(trimmed.to_string()))
}

/// Current UTC calendar date (time of day is never stored)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// String rendering of a version identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionFormat {
    /// `[1.2.3] - 2024-01-01`, the body of a version heading
    #[default]
    Markdown,
    /// `v1.2.3 - 2024-01-01`, or `1.2.3 - 2024-01-01` with `skip_prefix`
    Plain { skip_prefix: bool },
}

/// A release number with its release date.
///
/// Ordering, equality and hashing only look at `(major, minor, patch)`;
/// the date is metadata.
#[derive(Debug, Clone, Copy)]
pub struct VersionId {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub date: NaiveDate,
}

impl VersionId {
    /// Create a version dated today
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            date: today(),
        }
    }

    /// Replace the release date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Parse `v1.2.3`, `1.2.3` or a heading body like `[1.2.3] - 2024-01-01`.
    ///
    /// Missing minor/patch components default to 0, a missing date defaults
    /// to today. Fails with [`ChangelogError::Format`] when the text holds no
    /// number at all and with [`ChangelogError::InvalidDate`] when the date
    /// part is present but malformed.
    pub fn parse(input: &str) -> ChangelogResult<Self> {
        let (version_part, date_part) = match input.split_once(DATE_SEPARATOR) {
            Some((version, date)) => (version, Some(date)),
            None => (input, None),
        };

        let caps = version_regex()
            .captures(version_part)
            .ok_or_else(|| ChangelogError::Format(input.trim().to_string()))?;

        let component = |idx: usize| -> ChangelogResult<u64> {
            match caps.get(idx) {
                Some(m) => m
                    .as_str()
                    .parse::<u64>()
                    .map_err(|_| ChangelogError::Format(input.trim().to_string())),
                None => Ok(0),
            }
        };

        let date = match date_part.map(str::trim).filter(|d| !d.is_empty()) {
            Some(date) => parse_date(date)?,
            None => today(),
        };

        Ok(Self {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            date,
        })
    }

    /// Canonical `major.minor.patch` string, computed on every call
    pub fn ver(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// ISO date string
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Lexicographic comparison on `(major, minor, patch)`
    pub fn compare(&self, other: &VersionId) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }

    pub fn higher_than(&self, other: &VersionId) -> bool {
        self.compare(other) == Ordering::Greater
    }

    pub fn lower_than(&self, other: &VersionId) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// `self >= other`
    pub fn acceptable_to(&self, other: &VersionId) -> bool {
        !self.lower_than(other)
    }

    pub fn format(&self, format: VersionFormat) -> String {
        match format {
            VersionFormat::Markdown => format!("[{}] - {}", self.ver(), self.date_string()),
            VersionFormat::Plain { skip_prefix } => format!(
                "{}{} - {}",
                if skip_prefix { "" } else { "v" },
                self.ver(),
                self.date_string()
            ),
        }
    }

    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }

    /// Convert from a semver version dated today.
    ///
    /// Pre-release and build metadata cannot be carried by the triple and
    /// are rejected.
    pub fn from_semver(version: &semver::Version) -> ChangelogResult<Self> {
        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(ChangelogError::Format(version.to_string()));
        }
        Ok(Self::new(version.major, version.minor, version.patch))
    }
}

impl PartialEq for VersionId {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for VersionId {}

impl Hash for VersionId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.major, self.minor, self.patch).hash(state);
    }
}

impl PartialOrd for VersionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionId {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialized as the bare `major.minor.patch` string; the date travels separately.
impl Serialize for VersionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.ver())
    }
}

impl<'de> Deserialize<'de> for VersionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
