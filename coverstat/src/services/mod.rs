//! Service modules for the cover ingestion workflow
//!
//! - `archive_client`: catalog search and item metadata
//! - `asset_fetcher`: cover URL templating and one-shot fetch
//! - `cover_metrics`: brightness/contrast derivation
//! - `record_extractor`: identifier and year extraction
//! - `csv_sink`: durable tabular output

pub mod archive_client;
pub mod asset_fetcher;
pub mod cover_metrics;
pub mod csv_sink;
pub mod record_extractor;

pub use archive_client::{ArchiveClient, CatalogError, CatalogQuery};
pub use asset_fetcher::{build_asset_url, thumbnail_url, HttpAssetFetcher};
pub use cover_metrics::{ChannelStats, MetricsError};
pub use csv_sink::{CsvSink, SinkError};
pub use record_extractor::ExtractError;
