//! Cover asset fetcher
//!
//! One GET per call, no retry. Transport failures and non-success
//! statuses are logged and collapse to `None`.

use crate::types::{AssetSource, SizeTag, ASSET_DOWNLOAD_BASE};
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("coverstat/", env!("CARGO_PKG_VERSION"));

/// Build the cover image URL for an identifier and size variant
pub fn build_asset_url(identifier: &str, size: SizeTag) -> String {
    format!(
        "{}/{}/page/n0_{}.jpg",
        ASSET_DOWNLOAD_BASE,
        identifier,
        size.as_str()
    )
}

/// Swap the full-resolution suffix of a cover URL for the thumbnail one
///
/// URLs not ending in the full-resolution suffix are returned unchanged.
pub fn thumbnail_url(url: &str) -> String {
    let full = format!("n0_{}.jpg", SizeTag::Full);
    match url.strip_suffix(&full) {
        Some(prefix) => format!("{}n0_{}.jpg", prefix, SizeTag::Thumbnail),
        None => url.to_string(),
    }
}

/// `AssetSource` over HTTP
pub struct HttpAssetFetcher {
    http_client: reqwest::Client,
}

impl HttpAssetFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait::async_trait]
impl AssetSource for HttpAssetFetcher {
    async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        debug!(url = %url, "Fetching asset");

        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Asset request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Asset request returned non-success status");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                warn!(url = %url, error = %e, "Asset body could not be read");
                None
            }
        }
    }
}
