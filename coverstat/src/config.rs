//! Run configuration for coverstat
//!
//! Command-line arguments and the bootstrap TOML are resolved once into an
//! immutable `RunConfig`, which is passed by reference to the pipeline and
//! the renderer.
//!
//! **Priority:** CLI → TOML → compiled defaults

use crate::plot::PlotMode;
use crate::services::CatalogQuery;
use clap::Parser;
use coverstat_common::config::{CatalogSettings, TomlConfig};
use std::path::PathBuf;
use tracing::warn;

/// Covers considered when `--limit` is omitted
pub const DEFAULT_LIMIT: u32 = 10;

/// Output base name when `--output` is omitted
pub const DEFAULT_OUTPUT_BASE: &str = "output";

/// Command-line arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "coverstat")]
#[command(about = "Evaluate the brightness and contrast of archive pressbook covers")]
#[command(version)]
pub struct Args {
    /// Name of a studio to search for
    #[arg(short, long)]
    pub studio: Option<String>,

    /// Number of covers to consider (default 10)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Graphing mode: 1 = X brightness / Y contrast, 2 = X year / Y brightness
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub mode: Option<u8>,

    /// Write the CSV and exit without plotting
    #[arg(long)]
    pub csv_only: bool,

    /// Output base name; writes <NAME>.csv and <NAME>.png
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Bootstrap TOML config file
    #[arg(long, env = "COVERSTAT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "COVERSTAT_LOG")]
    pub log_level: Option<String>,
}

/// Fully resolved run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Catalog search predicate
    pub query: CatalogQuery,
    /// Maximum items considered
    pub limit: u32,
    /// Plot projection
    pub mode: PlotMode,
    /// Skip rendering after ingestion
    pub csv_only: bool,
    /// Tabular output path
    pub csv_path: PathBuf,
    /// Figure output path
    pub png_path: PathBuf,
    /// Catalog connection settings
    pub catalog: CatalogSettings,
}

impl RunConfig {
    /// Resolve arguments against the bootstrap config
    ///
    /// Logs a warning when the limit falls back to its default.
    pub fn resolve(args: &Args, toml: &TomlConfig) -> Self {
        let limit = match args.limit {
            Some(limit) => limit,
            None => {
                warn!(
                    "--limit argument was not passed. Defaulting to a limit of {} covers",
                    DEFAULT_LIMIT
                );
                DEFAULT_LIMIT
            }
        };

        // clap already restricts the range; anything else maps to the default
        let mode = args
            .mode
            .and_then(PlotMode::from_number)
            .unwrap_or_default();

        let base = args
            .output
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_OUTPUT_BASE);

        let query = CatalogQuery::new(&toml.catalog.collection, &toml.catalog.format)
            .with_creator(args.studio.clone());

        Self {
            query,
            limit,
            mode,
            csv_only: args.csv_only,
            csv_path: PathBuf::from(format!("{}.csv", base)),
            png_path: PathBuf::from(format!("{}.png", base)),
            catalog: toml.catalog.clone(),
        }
    }
}

/// Log filter directive: CLI/env value, else TOML
pub fn log_directive(args: &Args, toml: &TomlConfig) -> String {
    args.log_level
        .clone()
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| toml.logging.level.clone())
}
