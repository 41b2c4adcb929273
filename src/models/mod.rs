pub mod category;
pub mod change_set;
pub mod changelog;
pub mod config;
pub mod entry;
pub mod error;
pub mod section;
pub mod version;
pub mod version_block;

pub use category::Category;
pub use change_set::{ChangeBatch, ChangeSet};
pub use changelog::{Changelog, Node, TitleBlock, VersionSummary, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
pub use config::ChangelogConfig;
pub use entry::ChangeEntry;
pub use error::{ChangelogError, ChangelogResult};
pub use section::Section;
pub use version::{parse_date, today, VersionFormat, VersionId, DATE_FORMAT};
pub use version_block::VersionBlock;
