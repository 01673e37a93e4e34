//! Core Types and Trait Definitions for coverstat
//!
//! Defines the data records that flow through an ingestion run and the
//! trait seams for the external collaborators:
//! - **Catalog:** paginated search + per-item metadata
//! - **AssetSource:** one-shot binary fetch (`Some(bytes)` or `None`)
//! - **RecordSink:** durable append-only record output
//!
//! Production implementations live in `services`; tests provide their own.

use crate::services::archive_client::CatalogError;
use crate::services::csv_sink::SinkError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Host serving cover page images
pub const ASSET_DOWNLOAD_BASE: &str = "https://archive.org/download";

// ============================================================================
// Data Records
// ============================================================================

/// One catalog entry with its metadata bag
///
/// The metadata is kept as raw JSON; field interpretation belongs to
/// `record_extractor`.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Identifier from the search hit
    pub identifier: String,
    /// Item metadata object (may be empty)
    pub metadata: Map<String, Value>,
}

impl CatalogItem {
    /// Item with no metadata beyond its identifier
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            metadata: Map::new(),
        }
    }

    /// Builder-style metadata field insertion
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// One page of search results
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// Identifiers in catalog order
    pub identifiers: Vec<String>,
    /// Cursor for the next page; `None` on the last page
    pub cursor: Option<String>,
}

/// Brightness and contrast of one decoded cover
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualMetrics {
    /// Perceived brightness (0-255, higher is brighter)
    pub brightness: f64,
    /// Mean per-channel standard deviation (>= 0)
    pub contrast: f64,
}

/// One fully measured cover, as written to the tabular output
///
/// Field order is the column order of the CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub identifier: String,
    pub year: i32,
    pub url: String,
    pub brightness: f64,
    pub contrast: f64,
}

impl Record {
    pub fn new(identifier: String, year: i32, url: String, metrics: VisualMetrics) -> Self {
        Self {
            identifier,
            year,
            url,
            brightness: metrics.brightness,
            contrast: metrics.contrast,
        }
    }
}

/// Cover image resolution variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTag {
    /// 250px wide, used for metrics
    Full,
    /// 25px wide, used as plot markers
    Thumbnail,
}

impl SizeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeTag::Full => "w250",
            SizeTag::Thumbnail => "w25",
        }
    }
}

impl std::fmt::Display for SizeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Paginated catalog search
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch one page of identifiers matching `predicate`
    ///
    /// `cursor` is `None` for the first page.
    async fn search_page(
        &self,
        predicate: &str,
        cursor: Option<&str>,
    ) -> Result<SearchPage, CatalogError>;

    /// Fetch the metadata bag for one identifier
    async fn item(&self, identifier: &str) -> Result<CatalogItem, CatalogError>;
}

/// One-shot binary fetch
///
/// Never fails past its boundary: transport errors and non-success
/// statuses both come back as `None`.
#[async_trait::async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<Vec<u8>>;
}

/// Durable append-only record output
pub trait RecordSink {
    /// Persist one record before returning
    fn append(&mut self, record: &Record) -> Result<(), SinkError>;
}
