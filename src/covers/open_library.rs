//! Open Library cover provider - validates cover metadata before deriving an image URL.
//!
//! The [`OpenLibraryProvider`] calls the Open Library covers metadata endpoint
//! for an ISBN and, when the metadata describes a real uploaded cover, derives
//! the deterministic medium-size image URL for that ISBN. A missing record
//! (non-success status) or a deleted/failed/not-yet-uploaded asset both mean
//! "no cover", not an error.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::http_client::{build_provider_http_client, standard_user_agent};
use super::{CoverError, CoverProvider, ProviderPriority};

/// Default Open Library covers base URL.
const DEFAULT_BASE_URL: &str = "https://covers.openlibrary.org";

// ==================== Open Library API Response Types ====================

/// Cover metadata returned by `GET /b/isbn/{isbn}.json`.
///
/// Only the asset-state flags matter here; the rest of the record is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct CoverRecord {
    pub deleted: Option<bool>,
    pub failed: Option<bool>,
    pub uploaded: Option<bool>,
}

impl CoverRecord {
    /// Returns true when the record describes a displayable, uploaded cover.
    fn is_displayable(&self) -> bool {
        !self.deleted.unwrap_or(false)
            && !self.failed.unwrap_or(false)
            && self.uploaded.unwrap_or(false)
    }
}

// ==================== OpenLibraryProvider ====================

/// Resolves ISBNs to cover URLs via the Open Library covers API.
///
/// The provider queries `{base}/b/isbn/{isbn}.json` and only claims a cover
/// when the metadata confirms an uploaded, non-deleted, non-failed asset. The
/// returned image URL is derived deterministically from the ISBN
/// (`{base}/b/isbn/{isbn}-M.jpg`), so no second request is needed.
pub struct OpenLibraryProvider {
    client: Client,
    base_url: String,
}

impl OpenLibraryProvider {
    /// Creates a new `OpenLibraryProvider` against the public Open Library host.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, CoverError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates an `OpenLibraryProvider` with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CoverError`] if the base URL is invalid or HTTP client
    /// construction fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CoverError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|error| {
            CoverError::construction("openlibrary", format!("invalid base URL: {error}"))
        })?;

        let user_agent = standard_user_agent("openlibrary");
        let client = build_provider_http_client("openlibrary", user_agent)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn metadata_url(&self, isbn: &str) -> String {
        format!("{}/b/isbn/{}.json", self.base_url, urlencoding::encode(isbn))
    }

    fn image_url(&self, isbn: &str) -> String {
        format!("{}/b/isbn/{}-M.jpg", self.base_url, urlencoding::encode(isbn))
    }
}

impl std::fmt::Debug for OpenLibraryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenLibraryProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CoverProvider for OpenLibraryProvider {
    fn name(&self) -> &'static str {
        "openlibrary"
    }

    fn priority(&self) -> ProviderPriority {
        ProviderPriority::Primary
    }

    #[tracing::instrument(skip_all, fields(provider = "openlibrary", isbn = %isbn))]
    async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError> {
        let url = self.metadata_url(isbn);
        debug!(metadata_url = %url, "Checking Open Library cover metadata");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| CoverError::request("openlibrary", isbn, error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // No cover record for this ISBN (Open Library answers 404).
            debug!(status = status.as_u16(), "No Open Library cover record");
            return Ok(None);
        }

        let record = response.json::<CoverRecord>().await.map_err(|error| {
            CoverError::invalid_response("openlibrary", isbn, error.to_string())
        })?;

        if !record.is_displayable() {
            debug!(
                deleted = record.deleted.unwrap_or(false),
                failed = record.failed.unwrap_or(false),
                uploaded = record.uploaded.unwrap_or(false),
                "Open Library record is not a displayable cover"
            );
            return Ok(None);
        }

        // Metadata confirmed the asset; the image URL follows from the ISBN.
        Ok(Some(self.image_url(isbn)))
    }
}
