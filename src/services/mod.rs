//! Service layer for changelog
//!
//! File-backed operations on the configured changelog. CLI commands call
//! into these so that reading, editing and writing stay in one place.

pub mod changelog_service;

pub use changelog_service::{
    add_change, add_version, find_version, format_changelog, init_changelog, parse_version_arg,
    read_changelog, write_changelog,
};
