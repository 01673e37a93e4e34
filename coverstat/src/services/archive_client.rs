//! Digital archive catalog client
//!
//! Search goes through the scrape endpoint, which pages with an opaque
//! cursor. Item metadata comes from the per-item metadata endpoint.
//!
//! Endpoints:
//! - `{base}/services/search/v1/scrape?q=..&fields=identifier&count=..[&cursor=..]`
//! - `{base}/metadata/{identifier}`

use crate::types::{Catalog, CatalogItem, SearchPage};
use coverstat_common::config::CatalogSettings;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

const USER_AGENT: &str = concat!("coverstat/", env!("CARGO_PKG_VERSION"));

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),
}

/// Boolean search predicate over `collection`, `Format` and `Creator`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub collection: String,
    pub format: String,
    /// Studio name; conjoined only when present
    pub creator: Option<String>,
}

impl CatalogQuery {
    pub fn new(collection: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            format: format.into(),
            creator: None,
        }
    }

    pub fn with_creator(mut self, creator: Option<String>) -> Self {
        self.creator = creator.filter(|c| !c.trim().is_empty());
        self
    }

    /// Render the predicate string sent to the search endpoint
    ///
    /// A creator containing whitespace is quoted so it stays one term.
    pub fn predicate(&self) -> String {
        let mut predicate = format!(
            "collection:{} AND Format:{}",
            self.collection, self.format
        );
        if let Some(creator) = &self.creator {
            let creator = creator.trim();
            if creator.contains(char::is_whitespace) {
                predicate.push_str(&format!(" AND Creator:\"{}\"", creator));
            } else {
                predicate.push_str(&format!(" AND Creator:{}", creator));
            }
        }
        predicate
    }
}

/// Scrape endpoint response
#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    items: Vec<ScrapeHit>,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeHit {
    identifier: String,
}

/// Metadata endpoint response (only the part we read)
#[derive(Debug, Deserialize)]
struct MetadataResponse {
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

/// HTTP client for the archive search and metadata APIs
pub struct ArchiveClient {
    http_client: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl ArchiveClient {
    pub fn new(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            page_size: settings.page_size,
        })
    }

    fn scrape_url(&self) -> String {
        format!("{}/services/search/v1/scrape", self.base_url)
    }

    fn metadata_url(&self, identifier: &str) -> String {
        format!("{}/metadata/{}", self.base_url, identifier)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Catalog for ArchiveClient {
    async fn search_page(
        &self,
        predicate: &str,
        cursor: Option<&str>,
    ) -> Result<SearchPage, CatalogError> {
        let count = self.page_size.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("q", predicate),
            ("fields", "identifier"),
            ("count", count.as_str()),
        ];
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor));
        }

        tracing::debug!(predicate = %predicate, cursor = ?cursor, "Querying catalog search");

        let request = self.http_client.get(self.scrape_url()).query(&params);
        let page: ScrapeResponse = self.get_json(request).await?;

        tracing::debug!(
            hits = page.items.len(),
            has_more = page.cursor.is_some(),
            "Received catalog search page"
        );

        Ok(SearchPage {
            identifiers: page.items.into_iter().map(|hit| hit.identifier).collect(),
            cursor: page.cursor,
        })
    }

    async fn item(&self, identifier: &str) -> Result<CatalogItem, CatalogError> {
        let request = self.http_client.get(self.metadata_url(identifier));
        let response: MetadataResponse = self.get_json(request).await?;

        // Unknown identifiers come back as `{}` with a 200
        let metadata = response
            .metadata
            .ok_or_else(|| CatalogError::ItemNotFound(identifier.to_string()))?;

        Ok(CatalogItem {
            identifier: identifier.to_string(),
            metadata,
        })
    }
}
