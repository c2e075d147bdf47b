//! CLI subcommand implementations.

pub mod activities;
pub mod details;
pub mod keywords;
pub mod sleep;
pub mod status;
pub mod summary;
pub mod util;
pub mod weekday;
pub mod weeks;
