//! CLI subcommand handlers.

pub mod add;
pub mod list;

use bookshelf::catalog::SortOrder;

use crate::app_config::{DEFAULT_CATALOG_URL, FileConfig};
use crate::cli::{Args, SortArg};

/// Maps the CLI sort flag onto the library's sort order.
pub(crate) fn map_sort_order(sort: SortArg) -> SortOrder {
    match sort {
        SortArg::TitleAsc => SortOrder::TitleAsc,
        SortArg::TitleDesc => SortOrder::TitleDesc,
        SortArg::AuthorAsc => SortOrder::AuthorAsc,
        SortArg::AuthorDesc => SortOrder::AuthorDesc,
        SortArg::YearAsc => SortOrder::YearAsc,
        SortArg::YearDesc => SortOrder::YearDesc,
        SortArg::Newest => SortOrder::Newest,
    }
}

/// Resolves the catalog base URL: CLI flag, then config file, then default.
pub(crate) fn effective_catalog_url(args: &Args, config: &FileConfig) -> String {
    args.catalog_url
        .clone()
        .or_else(|| config.catalog_base_url.clone())
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string())
}
