#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line dashboard for the home sales dataset.
//!
//! Loads the dataset once, applies the filter flags, then either renders
//! the requested view or, with no subcommand, opens an interactive picker
//! that mirrors the dashboard's filter bar.
//!
//! Set `RUST_LOG=debug` to see parse and filter details.

mod config;
mod filters;
mod format;
mod interactive;
mod views;

use std::path::PathBuf;

use clap::Parser;
use house_insights_filter::FilterStore;

use crate::config::{DashboardConfig, Theme};
use crate::filters::FilterArgs;
use crate::views::View;

/// Skipped rows listed individually before the rest are summarized.
const SKIPPED_ROWS_SHOWN: usize = 5;

#[derive(Parser)]
#[command(name = "house_insights", about = "Explore the home sales dataset")]
struct Cli {
    /// TOML config file (defaults to `$HOUSE_INSIGHTS_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset CSV (defaults to `$HOUSE_INSIGHTS_DATA`, then the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print the view as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Override the configured output theme
    #[arg(long, global = true, value_enum)]
    theme: Option<Theme>,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    view: Option<View>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let path = config.dataset_path(cli.data)?;
    log::info!("Loading {}", path.display());
    let report = house_insights_parser::parse_file(&path)?;

    if !report.is_clean() {
        log::warn!(
            "Skipped {} malformed row(s) in {}",
            report.skipped_count(),
            path.display()
        );
        for skipped in report.skipped.iter().take(SKIPPED_ROWS_SHOWN) {
            match skipped.line {
                Some(line) => log::warn!("  line {line}: {}", skipped.error),
                None => log::warn!("  {}", skipped.error),
            }
        }
        if report.skipped_count() > SKIPPED_ROWS_SHOWN {
            log::warn!("  ...and {} more", report.skipped_count() - SKIPPED_ROWS_SHOWN);
        }
    }

    let mut store = FilterStore::new(report.records);
    cli.filters.apply(&mut store)?;

    match cli.view {
        Some(view) => println!("{}", views::render(&view, &store, &config, cli.json)?),
        None => interactive::run(&mut store, &config)?,
    }

    Ok(())
}
