//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Browse a book catalog and resolve cover art from public APIs.
///
/// Bookshelf fetches paginated, filterable listings from a catalog API,
/// resolves cover images through Open Library with a Google Books fallback,
/// and can submit new records.
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Catalog API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List catalog records with resolved covers
    List(ListArgs),
    /// Add a record to the catalog
    Add(AddArgs),
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Free-text search across title, author, year, and ISBN
    #[arg(long)]
    pub query: Option<String>,

    /// Author name filter (matches given or family name)
    #[arg(long)]
    pub author: Option<String>,

    /// Lowest publication year to include
    #[arg(long)]
    pub year_from: Option<i32>,

    /// Highest publication year to include
    #[arg(long)]
    pub year_to: Option<i32>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortArg::TitleAsc)]
    pub sort: SortArg,

    /// 1-based page number
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Records per page (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,

    /// Maximum concurrent cover lookups (1-32)
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(1..=32))]
    pub concurrency: Option<u8>,

    /// Skip cover resolution and show placeholders only
    #[arg(long)]
    pub no_covers: bool,
}

/// Arguments for the `add` subcommand.
#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Book title
    #[arg(long)]
    pub title: String,

    /// Author's given name
    #[arg(long)]
    pub author_first: String,

    /// Author's family name
    #[arg(long)]
    pub author_last: String,

    /// Publication year
    #[arg(long)]
    pub year: String,

    /// ISBN used for cover lookups
    #[arg(long)]
    pub isbn: String,
}

/// Sort orders accepted on the command line; mapped onto the library's
/// [`bookshelf::catalog::SortOrder`] by the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Title, ascending
    TitleAsc,
    /// Title, descending
    TitleDesc,
    /// Author, ascending
    AuthorAsc,
    /// Author, descending
    AuthorDesc,
    /// Year, ascending
    YearAsc,
    /// Year, descending
    YearDesc,
    /// Most recently added first
    Newest,
}
