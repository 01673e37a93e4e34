//! coverstat - pressbook cover brightness/contrast survey
//!
//! Queries the archive catalog, measures each cover, writes `<output>.csv`
//! and (unless `--csv-only`) plots the results to `<output>.png`.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use coverstat::config::{log_directive, Args, RunConfig};
use coverstat::plot::{project, PlotRenderer};
use coverstat::services::{ArchiveClient, CsvSink, HttpAssetFetcher};
use coverstat::workflow::IngestionPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = coverstat_common::config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing (RUST_LOG wins over --log-level and TOML)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(log_directive(&args, &toml_config))
            }),
        )
        .init();

    info!("Starting coverstat v{}", env!("CARGO_PKG_VERSION"));

    let config = RunConfig::resolve(&args, &toml_config);

    let catalog =
        ArchiveClient::new(&config.catalog).context("Failed to create catalog client")?;
    let fetcher = HttpAssetFetcher::new().context("Failed to create asset fetcher")?;

    let mut sink = CsvSink::create(&config.csv_path)
        .with_context(|| format!("Failed to create {}", config.csv_path.display()))?;
    info!("Writing records to {}", sink.path().display());

    let pipeline = IngestionPipeline::new(&config, &catalog, &fetcher);
    let report = pipeline.run(&mut sink).await.context("Ingestion failed")?;

    if config.csv_only {
        info!("--csv-only set, skipping plot");
        return Ok(());
    }

    let points = project(&report.records, config.mode);
    let renderer = PlotRenderer::new(&config, &fetcher);
    let summary = renderer
        .render(&points, &config.png_path)
        .await
        .with_context(|| format!("Failed to render {}", config.png_path.display()))?;

    info!(
        mode = config.mode.number(),
        points = summary.points,
        markers = summary.markers_placed,
        skipped_markers = summary.markers_skipped,
        out_of_bounds = summary.out_of_bounds,
        "Plot complete"
    );

    Ok(())
}
