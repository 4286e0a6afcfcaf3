//! CLI output formatting and display helpers.

use bookshelf::catalog::CatalogError;
use bookshelf::listing::{Listing, ListingRow};
use bookshelf::Book;

/// Line shown under the count when the result set is empty.
pub const EMPTY_STATE_MESSAGE: &str = "No books found.";

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Renders the full listing: count line, cards (or the empty state), page info.
pub fn render_listing(listing: &Listing, width: usize) -> Vec<String> {
    let mut lines = vec![truncate_to_width(&listing.result_count_label(), width)];

    if listing.is_empty() {
        lines.push(truncate_to_width(EMPTY_STATE_MESSAGE, width));
    } else {
        for row in listing.rows() {
            lines.push(String::new());
            lines.extend(render_book_card(row, width));
        }
        lines.push(String::new());
    }

    lines.push(truncate_to_width(&listing.pager().page_info(), width));
    lines
}

/// Renders one book card: title, author, metadata, cover source.
pub fn render_book_card(row: &ListingRow, width: usize) -> Vec<String> {
    let book = &row.book;
    vec![
        truncate_to_width(&book.title, width),
        truncate_to_width(
            &format!("  {} {}", book.author_first, book.author_last),
            width,
        ),
        truncate_to_width(
            &format!(
                "  Year: {}  ISBN: {}",
                field_or_na(&book.year),
                field_or_na(&book.isbn)
            ),
            width,
        ),
        truncate_to_width(&format!("  Cover: {}", row.cover_source()), width),
    ]
}

fn field_or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

/// Status line after a successful create.
pub fn saved_line(book: &Book) -> String {
    format!(
        "Saved: {} by {}, {}",
        book.title, book.author_last, book.author_first
    )
}

/// Status line for a failed catalog operation.
///
/// A server-provided detail message is shown verbatim; transport failures get
/// a generic network message instead.
pub fn catalog_failure_line(error: &CatalogError) -> String {
    match error {
        CatalogError::Api { detail, .. } => detail.clone(),
        CatalogError::Network { .. } => {
            "Network error. Check your connection and the catalog URL.".to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf::catalog::BookPage;

    fn book(id: i64, isbn: &str) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            author_first: "Jane".to_string(),
            author_last: "Doe".to_string(),
            year: "2001".to_string(),
            isbn: isbn.to_string(),
        }
    }

    fn listing_of(count: usize, total: u64) -> Listing {
        let mut listing = Listing::new();
        listing.show_page(BookPage {
            items: (0..count).map(|i| book(i as i64, "111")).collect(),
            total,
            page: 1,
            page_size: 20,
        });
        listing
    }

    // ==================== Width Helpers ====================

    #[test]
    fn test_truncate_to_width_short_text_unchanged() {
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_to_width_appends_ellipsis() {
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_truncate_to_width_degenerate_widths() {
        assert_eq!(truncate_to_width("abc", 0), "");
        assert_eq!(truncate_to_width("abc", 1), "…");
    }

    // ==================== Listing Rendering ====================

    #[test]
    fn test_render_listing_has_one_card_per_item() {
        let listing = listing_of(3, 3);
        let lines = render_listing(&listing, 80);

        assert_eq!(lines[0], "3 results");
        let titles: Vec<_> = lines.iter().filter(|l| l.starts_with("Book ")).collect();
        assert_eq!(titles.len(), 3);
        assert_eq!(lines.last().unwrap(), "Page 1 of 1");
    }

    #[test]
    fn test_render_listing_singular_count() {
        let listing = listing_of(1, 1);
        let lines = render_listing(&listing, 80);
        assert_eq!(lines[0], "1 result");
    }

    #[test]
    fn test_render_listing_empty_state() {
        let listing = listing_of(0, 0);
        let lines = render_listing(&listing, 80);

        assert_eq!(lines[0], "0 results");
        assert_eq!(lines[1], EMPTY_STATE_MESSAGE);
        assert_eq!(lines.last().unwrap(), "Page 1 of 1");
    }

    #[test]
    fn test_render_book_card_shows_placeholder_until_resolved() {
        let listing = listing_of(1, 1);
        let card = render_book_card(&listing.rows()[0], 80);

        assert_eq!(card[0], "Book 0");
        assert_eq!(card[1], "  Jane Doe");
        assert_eq!(card[2], "  Year: 2001  ISBN: 111");
        assert!(card[3].contains("assets/no-cover.png"));
    }

    #[test]
    fn test_render_book_card_missing_fields_show_na() {
        let mut listing = Listing::new();
        listing.show_page(BookPage {
            items: vec![Book {
                id: 1,
                title: "Untitled".to_string(),
                author_first: "A".to_string(),
                author_last: "B".to_string(),
                year: String::new(),
                isbn: String::new(),
            }],
            total: 1,
            page: 1,
            page_size: 20,
        });

        let card = render_book_card(&listing.rows()[0], 80);
        assert_eq!(card[2], "  Year: N/A  ISBN: N/A");
    }

    // ==================== Status Lines ====================

    #[test]
    fn test_saved_line_format() {
        let saved = saved_line(&book(1, "111"));
        assert_eq!(saved, "Saved: Book 1 by Doe, Jane");
    }

    #[test]
    fn test_catalog_failure_line_prefers_server_detail() {
        let line = catalog_failure_line(&CatalogError::api(409, "Book already exists."));
        assert_eq!(line, "Book already exists.");
    }

    #[test]
    fn test_catalog_failure_line_generic_for_network() {
        let line = catalog_failure_line(&CatalogError::network("connection refused"));
        assert!(line.contains("Network error"));
        assert!(
            !line.contains("connection refused"),
            "transport details stay in the logs, not the status line"
        );
    }
}
