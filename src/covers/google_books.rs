//! Google Books cover provider - searches volumes by ISBN and normalizes thumbnails.
//!
//! The [`GoogleBooksProvider`] queries the Google Books volumes search endpoint
//! with an `isbn:` query and extracts the first result's thumbnail link,
//! preferring the larger `thumbnail` variant over `smallThumbnail`. Returned
//! links are normalized: forced onto https, stripped of the edge-curl page
//! effect, and upgraded to the higher-resolution zoom variant.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::http_client::{build_provider_http_client, standard_user_agent};
use super::{CoverError, CoverProvider, ProviderPriority};

/// Default Google Books API base URL.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";

// ==================== Google Books API Response Types ====================

/// Top-level volumes search response.
#[derive(Debug, Deserialize)]
pub(crate) struct VolumesResponse {
    pub items: Option<Vec<Volume>>,
}

/// A single volume from the search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Volume {
    pub volume_info: Option<VolumeInfo>,
}

/// The `volumeInfo` field of a volume.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeInfo {
    pub image_links: Option<ImageLinks>,
}

/// Thumbnail links for a volume.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}

// ==================== GoogleBooksProvider ====================

/// Resolves ISBNs to cover URLs via the Google Books volumes search API.
///
/// The provider queries `{base}/volumes?q=isbn:{isbn}` and extracts the first
/// result's thumbnail. Google serves thumbnails over plain http with a page
/// curl effect and a low-resolution zoom level; [`normalize_thumbnail_url`]
/// rewrites all three before the URL is returned.
pub struct GoogleBooksProvider {
    client: Client,
    base_url: String,
}

impl GoogleBooksProvider {
    /// Creates a new `GoogleBooksProvider` against the public Google Books host.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, CoverError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a `GoogleBooksProvider` with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CoverError`] if the base URL is invalid or HTTP client
    /// construction fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CoverError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|error| {
            CoverError::construction("googlebooks", format!("invalid base URL: {error}"))
        })?;

        let user_agent = standard_user_agent("googlebooks");
        let client = build_provider_http_client("googlebooks", user_agent)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, isbn: &str) -> String {
        format!(
            "{}/volumes?q=isbn:{}",
            self.base_url,
            urlencoding::encode(isbn)
        )
    }
}

impl std::fmt::Debug for GoogleBooksProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleBooksProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CoverProvider for GoogleBooksProvider {
    fn name(&self) -> &'static str {
        "googlebooks"
    }

    fn priority(&self) -> ProviderPriority {
        ProviderPriority::Fallback
    }

    #[tracing::instrument(skip_all, fields(provider = "googlebooks", isbn = %isbn))]
    async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError> {
        let url = self.search_url(isbn);
        debug!(search_url = %url, "Searching Google Books volumes");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| CoverError::request("googlebooks", isbn, error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Google Books search was not successful");
            return Ok(None);
        }

        let body = response.json::<VolumesResponse>().await.map_err(|error| {
            CoverError::invalid_response("googlebooks", isbn, error.to_string())
        })?;

        Ok(extract_thumbnail(&body).map(|raw| normalize_thumbnail_url(&raw)))
    }
}

// ==================== Extraction Helpers ====================

/// Extracts the first result's thumbnail link, preferring the larger variant.
fn extract_thumbnail(body: &VolumesResponse) -> Option<String> {
    let links = body
        .items
        .as_deref()?
        .first()?
        .volume_info
        .as_ref()?
        .image_links
        .as_ref()?;

    links
        .thumbnail
        .clone()
        .or_else(|| links.small_thumbnail.clone())
}

/// Normalizes a Google Books thumbnail URL for display.
///
/// Three rewrites, each applied to the first occurrence:
/// 1. `http://` becomes `https://` (mixed-content safe)
/// 2. the `&edge=curl` page-curl parameter is removed
/// 3. `zoom=1` becomes `zoom=2` (higher-resolution variant)
#[must_use]
pub fn normalize_thumbnail_url(raw: &str) -> String {
    raw.replacen("http://", "https://", 1)
        .replacen("&edge=curl", "", 1)
        .replacen("zoom=1", "zoom=2", 1)
}
