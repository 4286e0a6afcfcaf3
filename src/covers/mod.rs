//! Cover-art resolution pipeline for turning ISBNs into displayable image URLs.
//!
//! This module provides an extensible provider system that resolves catalog
//! identifiers (ISBNs) into cover image URLs through a priority-ordered chain
//! with fallback and a per-resolver cache.
//!
//! # Architecture
//!
//! - [`CoverProvider`] - Async trait that individual providers implement
//! - [`CoverResolver`] - Priority-ordered provider chain with resolution loop and cache
//! - [`CoverCache`] - Shared memoization of completed resolutions (hits and misses)
//! - [`OpenLibraryProvider`] - Primary provider (metadata check + derived image URL)
//! - [`GoogleBooksProvider`] - Fallback provider (volumes search + thumbnail normalization)
//!
//! # Example
//!
//! ```no_run
//! use bookshelf::covers::build_default_cover_resolver;
//!
//! # async fn example() {
//! let resolver = build_default_cover_resolver(None, None);
//!
//! match resolver.resolve("9780141036144").await {
//!     Some(url) => println!("Cover: {url}"),
//!     None => println!("No cover; use the placeholder"),
//! }
//! # }
//! ```

mod cache;
mod error;
mod google_books;
mod http_client;
mod open_library;
mod resolver;

pub use cache::CoverCache;
pub use error::CoverError;
pub use google_books::{GoogleBooksProvider, normalize_thumbnail_url};
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, configure_provider_http_timeouts,
};
pub use open_library::OpenLibraryProvider;
pub use resolver::CoverResolver;

use async_trait::async_trait;
use tracing::warn;

/// Default number of cover lookups in flight at once.
pub const DEFAULT_COVER_CONCURRENCY: usize = 8;

/// Builds the default provider chain used by CLI execution flows.
///
/// Order is deterministic: Open Library is consulted first, Google Books is
/// the fallback. Base URLs default to the public hosts; pass overrides to
/// point a provider somewhere else (tests, mirrors).
#[must_use]
pub fn build_default_cover_resolver(
    open_library_base_url: Option<&str>,
    google_books_base_url: Option<&str>,
) -> CoverResolver {
    let mut resolver = CoverResolver::new();

    let open_library = match open_library_base_url {
        Some(base) => OpenLibraryProvider::with_base_url(base),
        None => OpenLibraryProvider::new(),
    };
    match open_library {
        Ok(provider) => resolver.register(Box::new(provider)),
        Err(error) => warn!(
            error = %error,
            "Open Library provider unavailable; continuing with remaining providers"
        ),
    }

    let google_books = match google_books_base_url {
        Some(base) => GoogleBooksProvider::with_base_url(base),
        None => GoogleBooksProvider::new(),
    };
    match google_books {
        Ok(provider) => resolver.register(Box::new(provider)),
        Err(error) => warn!(
            error = %error,
            "Google Books provider unavailable; unresolved covers will use the placeholder"
        ),
    }

    resolver
}

/// Priority level for provider ordering.
///
/// Providers are tried in priority order: Primary first, then Fallback.
/// Within the same priority level, providers are tried in registration order.
///
/// Derives `Ord` so that `Primary < Fallback` for sorting (try primary first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProviderPriority {
    /// Consulted first: the authoritative cover source
    Primary = 0,
    /// Consulted only when primary providers yield nothing
    Fallback = 1,
}

/// Trait that all cover providers must implement.
///
/// Providers turn an ISBN into an image URL, `None` for "this provider has no
/// cover", or an error for transport/decode failures. The resolution loop
/// treats errors and `None` identically (try the next provider); the split
/// exists so failures can be logged with their cause.
///
/// # Object Safety
///
/// This trait uses `async_trait` to support dynamic dispatch via
/// `Box<dyn CoverProvider>`. Rust 2024 native async traits are not
/// object-safe, so `async_trait` is required for the chain pattern.
#[async_trait]
pub trait CoverProvider: Send + Sync {
    /// Returns the provider's name (e.g., "openlibrary", "googlebooks").
    fn name(&self) -> &str;

    /// Returns the provider's priority level.
    fn priority(&self) -> ProviderPriority;

    /// Attempts to find a cover image URL for the given ISBN.
    async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError>;
}
