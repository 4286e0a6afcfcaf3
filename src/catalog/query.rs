//! Search query construction for the catalog listing endpoint.

use std::fmt;
use std::str::FromStr;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the server accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort orders supported by the listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Title, ascending (the server default).
    #[default]
    TitleAsc,
    /// Title, descending.
    TitleDesc,
    /// Author family then given name, ascending.
    AuthorAsc,
    /// Author family then given name, descending.
    AuthorDesc,
    /// Year, ascending.
    YearAsc,
    /// Year, descending.
    YearDesc,
    /// Most recently added first.
    Newest,
}

impl SortOrder {
    /// Returns the wire value for the `sort` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
            Self::AuthorAsc => "author_asc",
            Self::AuthorDesc => "author_desc",
            Self::YearAsc => "year_asc",
            Self::YearDesc => "year_desc",
            Self::Newest => "newest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "title_asc" => Ok(Self::TitleAsc),
            "title_desc" => Ok(Self::TitleDesc),
            "author_asc" => Ok(Self::AuthorAsc),
            "author_desc" => Ok(Self::AuthorDesc),
            "year_asc" => Ok(Self::YearAsc),
            "year_desc" => Ok(Self::YearDesc),
            "newest" => Ok(Self::Newest),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Filters, sort, and pagination for one listing request.
///
/// Blank filter values are omitted from the query string; page and page size
/// are always sent so the server never falls back to its unpaginated mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    /// Free-text search across title, author, year, and ISBN.
    pub q: Option<String>,
    /// Author name filter (matches given or family name).
    pub author: Option<String>,
    /// Lowest publication year to include.
    pub year_from: Option<i32>,
    /// Highest publication year to include.
    pub year_to: Option<i32>,
    /// Sort order.
    pub sort: SortOrder,
    /// 1-based page number.
    pub page: u32,
    /// Records per page (clamped to `1..=MAX_PAGE_SIZE` on serialization).
    pub page_size: u32,
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            q: None,
            author: None,
            year_from: None,
            year_to: None,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl BookQuery {
    /// Serializes the query into request parameters.
    ///
    /// Always emits `page`, `page_size`, and `sort`; emits filters only when
    /// they carry a non-blank value.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            (
                "page_size",
                self.page_size.clamp(1, MAX_PAGE_SIZE).to_string(),
            ),
            ("sort", self.sort.as_str().to_string()),
        ];

        if let Some(q) = non_blank(self.q.as_deref()) {
            pairs.push(("q", q));
        }
        if let Some(author) = non_blank(self.author.as_deref()) {
            pairs.push(("author", author));
        }
        if let Some(year_from) = self.year_from {
            pairs.push(("year_from", year_from.to_string()));
        }
        if let Some(year_to) = self.year_to {
            pairs.push(("year_to", year_to.to_string()));
        }

        pairs
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
