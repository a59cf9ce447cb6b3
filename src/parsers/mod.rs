//! Document parsers for the cutlist repository formats

pub mod cutlist_file;
pub mod header_index;

pub use cutlist_file::parse_cutlist_file;
pub use header_index::parse_header_index;
