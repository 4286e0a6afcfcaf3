//! Typed client for the catalog REST API.
//!
//! This module covers the catalog's full book surface: paginated, filterable,
//! sortable listing plus create, partial update, and delete. Error handling
//! keeps the server's structured `detail` messages distinct from transport
//! failures so the presentation layer can show whichever is more useful.
//!
//! # Example
//!
//! ```no_run
//! use bookshelf::catalog::{BookQuery, CatalogClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new("http://localhost:8000")?;
//! let page = client.list(&BookQuery::default()).await?;
//! println!("{} of {} books", page.items.len(), page.total);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod query;
mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use query::{BookQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SortOrder};
pub use types::{Book, BookDraft, BookPage, BookPatch};
