//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Daily activity log reports.
///
/// Parses a plain-text diary of timestamped activities and reports
/// durations, sleep and category breakdowns.
#[derive(Debug, Parser)]
#[command(name = "daylog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the activity log (overrides `log_path` from config).
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show what was parsed from the log.
    Status,

    /// List timed activities.
    Activities {
        /// Only show this category code.
        #[arg(long)]
        category: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show sleep between consecutive days.
    Sleep {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show time per category.
    Summary {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show per-day category hours in groups of seven logged days.
    Weeks {
        /// Only show this week (1-based).
        #[arg(long)]
        week: Option<usize>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Break one category down by description.
    Details {
        /// Category code (e.g. P, R, S).
        category: String,

        /// Page to show (1-based).
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show hours matching the configured keyword patterns.
    Keywords {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Average duration per weekday for matching activities.
    Weekday {
        /// Category code to match.
        #[arg(long)]
        category: String,

        /// Case-insensitive description substring.
        #[arg(long)]
        keyword: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
