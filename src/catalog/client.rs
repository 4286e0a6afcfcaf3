//! HTTP client for the catalog API.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::user_agent;

use super::{Book, BookDraft, BookPage, BookPatch, BookQuery, CatalogError};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Error body shape used by the catalog API for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Typed client for the catalog REST API.
///
/// All operations return [`CatalogError`]; a non-success response becomes
/// [`CatalogError::Api`] carrying the server's `detail` message when one is
/// present, so callers can show the server's own words to the user.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a client for the catalog at `base_url` (scheme + host, no
    /// trailing `/api/books`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Construction`] if the base URL is invalid or
    /// HTTP client construction fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)
            .map_err(|error| CatalogError::construction(format!("invalid base URL: {error}")))?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(user_agent::default_catalog_user_agent())
            .gzip(true)
            .build()
            .map_err(|error| {
                CatalogError::construction(format!("HTTP client construction failed: {error}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn books_url(&self) -> String {
        format!("{}/api/books", self.base_url)
    }

    fn book_url(&self, id: i64) -> String {
        format!("{}/api/books/{id}", self.base_url)
    }

    /// Fetches one page of the catalog listing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for transport failures, non-success
    /// responses, and undecodable bodies.
    #[tracing::instrument(skip(self, query), fields(page = query.page, page_size = query.page_size))]
    pub async fn list(&self, query: &BookQuery) -> Result<BookPage, CatalogError> {
        let url = self.books_url();
        debug!(url = %url, "Fetching catalog page");

        let response = self
            .client
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(CatalogError::from_reqwest)?;

        let response = success_or_api_error(response).await?;
        let page = response
            .json::<BookPage>()
            .await
            .map_err(CatalogError::from_reqwest)?;

        debug!(
            items = page.items.len(),
            total = page.total,
            "Catalog page fetched"
        );
        Ok(page)
    }

    /// Creates a new catalog record.
    ///
    /// The draft is validated locally first; the server's duplicate-ISBN
    /// rejection (HTTP 409) arrives as [`CatalogError::Api`] with the
    /// server's detail message.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for validation, transport, and API failures.
    #[tracing::instrument(skip(self, draft), fields(isbn = %draft.isbn))]
    pub async fn create(&self, draft: &BookDraft) -> Result<Book, CatalogError> {
        draft.validate()?;

        let response = self
            .client
            .post(self.books_url())
            .json(draft)
            .send()
            .await
            .map_err(CatalogError::from_reqwest)?;

        let response = success_or_api_error(response).await?;
        let book = response
            .json::<Book>()
            .await
            .map_err(CatalogError::from_reqwest)?;

        info!(id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    /// Applies a partial update to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`]; a missing record arrives as an `Api` error
    /// with the server's detail message.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: &BookPatch) -> Result<Book, CatalogError> {
        let response = self
            .client
            .patch(self.book_url(id))
            .json(patch)
            .send()
            .await
            .map_err(CatalogError::from_reqwest)?;

        let response = success_or_api_error(response).await?;
        response
            .json::<Book>()
            .await
            .map_err(CatalogError::from_reqwest)
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`]; a missing record arrives as an `Api` error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        let response = self
            .client
            .delete(self.book_url(id))
            .send()
            .await
            .map_err(CatalogError::from_reqwest)?;

        success_or_api_error(response).await?;
        Ok(())
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Converts a non-success response into [`CatalogError::Api`], preferring the
/// server's `detail` message over a generic status line.
async fn success_or_api_error(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    Err(CatalogError::api(status.as_u16(), detail))
}
