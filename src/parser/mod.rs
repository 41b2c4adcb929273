pub mod changelog;
pub mod markdown;

pub use changelog::{parse_changelog, ParseOptions};
pub use markdown::{parse_blocks, render_blocks, Block};
