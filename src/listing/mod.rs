//! Listing view model: rows, cover slots, pager math, and render generations.
//!
//! The listing holds whatever page of the catalog is currently displayed and
//! absorbs asynchronously arriving cover results. Because cover resolutions
//! are fire-and-forget and may outlive the view they were issued for, every
//! (re)build of the listing gets a new generation token; a cover update
//! carrying a stale generation or an out-of-range row is a silent no-op
//! instead of writing into a view that no longer exists.

use tracing::debug;

use crate::catalog::{Book, BookPage, DEFAULT_PAGE_SIZE};

/// Local fallback image shown when no cover can be resolved or the resolved
/// image fails to load.
pub const PLACEHOLDER_ASSET: &str = "assets/no-cover.png";

/// Identifies one build of the listing.
///
/// Cover updates carry the generation they were issued under; only updates
/// matching the listing's current generation are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderGeneration(u64);

/// The cover state of one listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSlot {
    /// Resolution has not completed yet; the placeholder is displayed.
    Pending,
    /// A provider supplied an image URL.
    Resolved(String),
    /// Resolution yielded nothing, or the resolved image failed to load.
    Placeholder,
}

impl CoverSlot {
    /// Returns the image source to display for this slot.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Resolved(url) => url,
            Self::Pending | Self::Placeholder => PLACEHOLDER_ASSET,
        }
    }

    /// Returns true once a provider URL fills this slot.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// One visual entry of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// The record this row displays.
    pub book: Book,
    cover: CoverSlot,
}

impl ListingRow {
    /// Returns the row's cover state.
    #[must_use]
    pub fn cover(&self) -> &CoverSlot {
        &self.cover
    }

    /// Returns the image source to display (resolved URL or placeholder).
    #[must_use]
    pub fn cover_source(&self) -> &str {
        self.cover.source()
    }
}

/// Pagination state derived from a page's counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// The 1-based page currently displayed.
    pub page: u32,
    /// Total number of pages (at least 1, even for an empty result set).
    pub page_count: u32,
    /// Whether a previous page exists.
    pub has_prev: bool,
    /// Whether a next page exists.
    pub has_next: bool,
}

impl Pager {
    fn from_counts(page: u32, total: u64, page_size: u32) -> Self {
        let page_size = u64::from(page_size.max(1));
        let page_count = total.div_ceil(page_size).max(1);
        let page_count = u32::try_from(page_count).unwrap_or(u32::MAX);
        Self {
            page,
            page_count,
            has_prev: page > 1,
            has_next: page < page_count,
        }
    }

    /// Returns the page info text, e.g. `"Page 2 of 5"`.
    #[must_use]
    pub fn page_info(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count)
    }
}

/// Returns the result count text: `"0 results"`, `"1 result"`, `"N results"`.
#[must_use]
pub fn result_count_label(total: u64) -> String {
    if total == 1 {
        "1 result".to_string()
    } else {
        format!("{total} results")
    }
}

/// The currently displayed page of the catalog.
#[derive(Debug)]
pub struct Listing {
    generation: u64,
    rows: Vec<ListingRow>,
    total: u64,
    page: u32,
    page_size: u32,
}

impl Listing {
    /// Creates an empty listing at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: 0,
            rows: Vec::new(),
            total: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Replaces the displayed rows with a freshly fetched page.
    ///
    /// Every row starts with a pending cover slot (placeholder displayed).
    /// Returns the new generation; cover updates must carry it to be applied.
    pub fn show_page(&mut self, page: BookPage) -> RenderGeneration {
        self.generation += 1;
        self.total = page.total;
        self.page = page.page;
        self.page_size = page.page_size;
        self.rows = page
            .items
            .into_iter()
            .map(|book| ListingRow {
                book,
                cover: CoverSlot::Pending,
            })
            .collect();

        debug!(
            generation = self.generation,
            rows = self.rows.len(),
            total = self.total,
            "Listing rebuilt"
        );
        RenderGeneration(self.generation)
    }

    /// Returns the current generation token.
    #[must_use]
    pub fn generation(&self) -> RenderGeneration {
        RenderGeneration(self.generation)
    }

    /// Returns the displayed rows.
    #[must_use]
    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    /// Returns the total number of records matching the query.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns true when the current page has no rows (empty state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies a completed cover resolution to a row.
    ///
    /// `Some(url)` fills the slot; `None` pins the placeholder. The update is
    /// discarded (returning false) when `generation` is not the listing's
    /// current generation or `row` is out of range, so resolutions that
    /// outlive their view cannot corrupt a newer one.
    pub fn apply_cover(
        &mut self,
        generation: RenderGeneration,
        row: usize,
        result: Option<String>,
    ) -> bool {
        if generation.0 != self.generation {
            debug!(
                stale = generation.0,
                current = self.generation,
                row,
                "Discarding cover update from superseded render"
            );
            return false;
        }
        let Some(slot) = self.rows.get_mut(row) else {
            debug!(row, rows = self.rows.len(), "Discarding out-of-range cover update");
            return false;
        };

        slot.cover = match result {
            Some(url) => CoverSlot::Resolved(url),
            None => CoverSlot::Placeholder,
        };
        true
    }

    /// Reports that a resolved cover image failed to load.
    ///
    /// The row falls back to the placeholder. Guarded by the same generation
    /// check as [`Listing::apply_cover`].
    pub fn mark_cover_failed(&mut self, generation: RenderGeneration, row: usize) -> bool {
        if generation.0 != self.generation {
            return false;
        }
        let Some(slot) = self.rows.get_mut(row) else {
            return false;
        };
        slot.cover = CoverSlot::Placeholder;
        true
    }

    /// Returns the result count text for the displayed query.
    #[must_use]
    pub fn result_count_label(&self) -> String {
        result_count_label(self.total)
    }

    /// Returns the pagination state for the displayed page.
    #[must_use]
    pub fn pager(&self) -> Pager {
        Pager::from_counts(self.page, self.total, self.page_size)
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self::new()
    }
}
