//! Wire types for the catalog API.
//!
//! Shapes mirror the server's JSON contract exactly: `year` and `isbn` travel
//! as strings, and a search response wraps the items with pagination counts.

use serde::{Deserialize, Serialize};

use super::CatalogError;

/// Server-side field length limits, enforced client-side before submission.
const TEXT_FIELD_MAX: usize = 255;
const YEAR_FIELD_MAX: usize = 10;
const ISBN_FIELD_MAX: usize = 32;

/// A catalog record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned record id.
    pub id: i64,
    /// Book title.
    pub title: String,
    /// Author's given name.
    pub author_first: String,
    /// Author's family name.
    pub author_last: String,
    /// Publication year (string in the wire format).
    pub year: String,
    /// The catalog identifier used for cover lookups.
    pub isbn: String,
}

/// A record to be created, i.e. a [`Book`] without its server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    /// Book title.
    pub title: String,
    /// Author's given name.
    pub author_first: String,
    /// Author's family name.
    pub author_last: String,
    /// Publication year.
    pub year: String,
    /// The catalog identifier used for cover lookups.
    pub isbn: String,
}

impl BookDraft {
    /// Validates the draft against the server's field limits.
    ///
    /// Rejecting obviously invalid drafts locally keeps a doomed submission
    /// off the network; the server enforces the same limits.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidDraft`] naming the offending field.
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_field("title", &self.title, TEXT_FIELD_MAX)?;
        check_field("author_first", &self.author_first, TEXT_FIELD_MAX)?;
        check_field("author_last", &self.author_last, TEXT_FIELD_MAX)?;
        check_field("year", &self.year, YEAR_FIELD_MAX)?;
        check_field("isbn", &self.isbn, ISBN_FIELD_MAX)?;
        Ok(())
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::invalid_draft(field, "must not be empty"));
    }
    let length = value.chars().count();
    if length > max {
        return Err(CatalogError::invalid_draft(
            field,
            format!("{length} characters exceeds the limit of {max}"),
        ));
    }
    Ok(())
}

/// A partial update for an existing record; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    /// New title, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New given name, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_first: Option<String>,
    /// New family name, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_last: Option<String>,
    /// New year, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// New ISBN, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

/// One page of search results with pagination counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPage {
    /// The records on this page.
    pub items: Vec<Book>,
    /// Total records matching the query across all pages.
    pub total: u64,
    /// The 1-based page number this response covers.
    pub page: u32,
    /// The page size the server applied.
    pub page_size: u32,
}
