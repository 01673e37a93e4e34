//! In-memory stand-ins for the catalog, the asset host and the sink
//!
//! Each fake records the calls it received so tests can assert on how far
//! the pipeline iterated.

use coverstat::services::{CatalogError, SinkError};
use coverstat::types::{
    AssetSource, Catalog, CatalogItem, Record, RecordSink, SearchPage,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Catalog serving fixed pages of identifiers
///
/// Page `n` is returned for cursor `"page-n"`. Pages listed in
/// `failing_pages` return an API error.
#[derive(Default)]
pub struct FakeCatalog {
    pages: Vec<Vec<String>>,
    items: HashMap<String, CatalogItem>,
    failing_pages: Vec<usize>,
    page_requests: Mutex<Vec<Option<String>>>,
    item_requests: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page of items (identifiers in order)
    pub fn with_page(mut self, items: Vec<CatalogItem>) -> Self {
        let identifiers = items.iter().map(|i| i.identifier.clone()).collect();
        for item in items {
            self.items.insert(item.identifier.clone(), item);
        }
        self.pages.push(identifiers);
        self
    }

    /// Identifier that appears in search results but has no metadata
    pub fn with_unknown_identifier(mut self, identifier: &str) -> Self {
        match self.pages.last_mut() {
            Some(page) => page.push(identifier.to_string()),
            None => self.pages.push(vec![identifier.to_string()]),
        }
        self
    }

    pub fn failing_page(mut self, index: usize) -> Self {
        self.failing_pages.push(index);
        self
    }

    pub fn page_requests(&self) -> Vec<Option<String>> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn item_requests(&self) -> Vec<String> {
        self.item_requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Catalog for FakeCatalog {
    async fn search_page(
        &self,
        _predicate: &str,
        cursor: Option<&str>,
    ) -> Result<SearchPage, CatalogError> {
        self.page_requests
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));

        let index = match cursor {
            None => 0,
            Some(c) => c
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| CatalogError::ParseError(format!("bad cursor {}", c)))?,
        };

        if self.failing_pages.contains(&index) {
            return Err(CatalogError::ApiError(503, "unavailable".to_string()));
        }

        let identifiers = self.pages.get(index).cloned().unwrap_or_default();
        let cursor = if index + 1 < self.pages.len() {
            Some(format!("page-{}", index + 1))
        } else {
            None
        };

        Ok(SearchPage {
            identifiers,
            cursor,
        })
    }

    async fn item(&self, identifier: &str) -> Result<CatalogItem, CatalogError> {
        self.item_requests
            .lock()
            .unwrap()
            .push(identifier.to_string());
        self.items
            .get(identifier)
            .cloned()
            .ok_or_else(|| CatalogError::ItemNotFound(identifier.to_string()))
    }
}

/// Asset host serving fixed bytes per URL; unknown URLs are absent
#[derive(Default)]
pub struct FakeAssets {
    assets: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl FakeAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.assets.insert(url.into(), bytes);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AssetSource for FakeAssets {
    async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.assets.get(url).cloned()
    }
}

/// Sink keeping records in memory
#[derive(Default)]
pub struct MemorySink {
    pub records: Vec<Record>,
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &Record) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Sink whose writes always fail
pub struct FailingSink;

impl RecordSink for FailingSink {
    fn append(&mut self, _record: &Record) -> Result<(), SinkError> {
        Err(SinkError::Io {
            path: PathBuf::from("/dev/full"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        })
    }
}
