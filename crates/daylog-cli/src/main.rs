use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use daylog_core::ParseCache;
use tracing_subscriber::EnvFilter;

use daylog_cli::commands::{
    activities, details, keywords, sleep, status, summary, util, weekday, weeks,
};
use daylog_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(file) = &cli.file {
        config.log_path.clone_from(file);
    }
    tracing::debug!(?config, "loaded configuration");

    let cache = ParseCache::default();
    let timeline = util::load_timeline(&config.log_path, &cache)?;
    let table = cache.table();

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match command {
        Commands::Status => status::run(&mut writer, &config.log_path, &timeline)?,
        Commands::Activities { category, json } => {
            activities::run(&mut writer, &timeline, category.as_deref(), *json)?;
        }
        Commands::Sleep { json } => {
            sleep::run(
                &mut writer,
                &timeline.sleep,
                config.sleep_histogram_bins,
                *json,
            )?;
        }
        Commands::Summary { json } => summary::run(&mut writer, &timeline, table, *json)?,
        Commands::Weeks { week, json } => {
            weeks::run(&mut writer, &timeline, table, *week, *json)?;
        }
        Commands::Details {
            category,
            page,
            json,
        } => {
            details::run(
                &mut writer,
                &timeline,
                table,
                category,
                *page,
                config.page_size,
                *json,
            )?;
        }
        Commands::Keywords { json } => {
            keywords::run(&mut writer, &timeline, &config.keywords, *json)?;
        }
        Commands::Weekday {
            category,
            keyword,
            json,
        } => weekday::run(&mut writer, &timeline, category, keyword, *json)?,
    }

    writer.flush()?;
    Ok(())
}
