//! Individual field generators for catalog entries.

pub mod numeric;
pub mod text;

/// Length of generated titles.
pub const TITLE_LENGTH: usize = 50;

/// Length of generated author names.
pub const AUTHOR_LENGTH: usize = 10;
