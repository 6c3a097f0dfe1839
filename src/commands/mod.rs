pub mod completions;
pub mod config;
pub mod profile;
pub mod prompt;
pub mod summary;
