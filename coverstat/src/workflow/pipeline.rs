//! Ingestion Pipeline
//!
//! Drives one run: catalog query → per-item fetch → measure → extract →
//! emit. Items are processed strictly one at a time, in catalog order.
//!
//! # Error Handling
//! - Per-item error isolation: a failing item is logged and skipped, the
//!   run moves on to the next one
//! - A record reaches the sink only when every step succeeded
//! - Only an unusable catalog (first page) or a sink write failure ends
//!   the run early
//!
//! # Example
//! ```rust,ignore
//! let pipeline = IngestionPipeline::new(&config, &catalog, &fetcher);
//! let mut sink = CsvSink::create(&config.csv_path)?;
//! let report = pipeline.run(&mut sink).await?;
//! ```

use crate::config::RunConfig;
use crate::error::{ItemError, ItemErrorKind, PipelineError};
use crate::services::{build_asset_url, cover_metrics, record_extractor, CatalogQuery};
use crate::types::{AssetSource, Catalog, Record, RecordSink, SearchPage, SizeTag};
use tracing::{debug, info, warn};

/// Per-run counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Items taken from the catalog (at most `limit`)
    pub considered: usize,
    /// Records written
    pub emitted: usize,
    pub metadata_failures: usize,
    pub fetch_failures: usize,
    pub decode_failures: usize,
    pub missing_dates: usize,
    pub bad_dates: usize,
}

impl RunStats {
    fn record_skip(&mut self, kind: ItemErrorKind) {
        match kind {
            ItemErrorKind::Metadata => self.metadata_failures += 1,
            ItemErrorKind::FetchFailure => self.fetch_failures += 1,
            ItemErrorKind::Decode => self.decode_failures += 1,
            ItemErrorKind::MissingField => self.missing_dates += 1,
            ItemErrorKind::DateParse => self.bad_dates += 1,
        }
    }

    /// Items considered but not emitted
    pub fn skipped(&self) -> usize {
        self.metadata_failures
            + self.fetch_failures
            + self.decode_failures
            + self.missing_dates
            + self.bad_dates
    }
}

/// Result of one ingestion run
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Emitted records, in catalog order
    pub records: Vec<Record>,
    pub stats: RunStats,
}

/// Sequential ingestion pipeline
pub struct IngestionPipeline<'a> {
    config: &'a RunConfig,
    catalog: &'a dyn Catalog,
    assets: &'a dyn AssetSource,
}

impl<'a> IngestionPipeline<'a> {
    pub fn new(
        config: &'a RunConfig,
        catalog: &'a dyn Catalog,
        assets: &'a dyn AssetSource,
    ) -> Self {
        Self {
            config,
            catalog,
            assets,
        }
    }

    /// Run the configured query with the configured limit
    pub async fn run(&self, sink: &mut dyn RecordSink) -> Result<IngestReport, PipelineError> {
        self.run_query(&self.config.query, self.config.limit, sink)
            .await
    }

    /// Consider up to `limit` catalog items matching `query`
    ///
    /// Each successful record is appended to `sink` before the next item is
    /// considered.
    pub async fn run_query(
        &self,
        query: &CatalogQuery,
        limit: u32,
        sink: &mut dyn RecordSink,
    ) -> Result<IngestReport, PipelineError> {
        let limit = limit as usize;
        let predicate = query.predicate();
        info!(query = %predicate, limit, "Starting catalog ingestion");

        let mut report = IngestReport::default();

        // First page failing means the query cannot be issued at all
        let mut page = self.catalog.search_page(&predicate, None).await?;

        'pages: loop {
            for identifier in &page.identifiers {
                if report.stats.considered >= limit {
                    break 'pages;
                }
                report.stats.considered += 1;

                match self.process_item(identifier).await {
                    Ok(record) => {
                        sink.append(&record)?;
                        info!(
                            "{} ({}): Brightness: {} Contrast: {}",
                            record.identifier, record.year, record.brightness, record.contrast
                        );
                        report.stats.emitted += 1;
                        report.records.push(record);
                    }
                    Err(e) => {
                        warn!(identifier = %identifier, kind = ?e.kind(), "Skipping item: {}", e);
                        report.stats.record_skip(e.kind());
                    }
                }
            }

            if report.stats.considered >= limit {
                break;
            }
            match self.next_page(&predicate, &page).await {
                Some(next) => page = next,
                None => break,
            }
        }

        info!(
            considered = report.stats.considered,
            emitted = report.stats.emitted,
            skipped = report.stats.skipped(),
            "Catalog ingestion complete"
        );

        Ok(report)
    }

    /// Fetch the page after `page`, or `None` when the catalog is exhausted
    ///
    /// A failing follow-up page ends iteration; records so far are kept.
    async fn next_page(&self, predicate: &str, page: &SearchPage) -> Option<SearchPage> {
        if page.identifiers.is_empty() {
            return None;
        }
        let cursor = page.cursor.as_deref()?;
        match self.catalog.search_page(predicate, Some(cursor)).await {
            Ok(next) => Some(next),
            Err(e) => {
                warn!("Catalog paging failed, ending run early: {}", e);
                None
            }
        }
    }

    /// Fetching → Measuring → Extracting for one item
    async fn process_item(&self, identifier: &str) -> Result<Record, ItemError> {
        let item = self
            .catalog
            .item(identifier)
            .await
            .map_err(ItemError::Metadata)?;
        let identifier = record_extractor::extract_identifier(&item);

        let url = build_asset_url(&identifier, SizeTag::Full);
        debug!(identifier = %identifier, url = %url, "Fetching cover");
        let bytes = self
            .assets
            .fetch(&url)
            .await
            .ok_or_else(|| ItemError::FetchFailure { url: url.clone() })?;

        let metrics = cover_metrics::measure(&bytes)?;
        let year = record_extractor::extract_year(&item)?;

        Ok(Record::new(identifier, year, url, metrics))
    }
}
