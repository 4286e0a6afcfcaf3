//! The `list` subcommand: fetch a catalog page and resolve its covers.

use anyhow::Result;
use futures_util::StreamExt;
use futures_util::stream;
use indicatif::ProgressBar;
use tracing::{debug, info};

use bookshelf::catalog::{BookQuery, CatalogClient, DEFAULT_PAGE_SIZE};
use bookshelf::covers::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_COVER_CONCURRENCY, DEFAULT_READ_TIMEOUT_SECS,
    build_default_cover_resolver, configure_provider_http_timeouts,
};
use bookshelf::listing::Listing;

use crate::app_config::FileConfig;
use crate::cli::{Args, ListArgs};
use crate::commands::{effective_catalog_url, map_sort_order};
use crate::output;

pub async fn run(args: &Args, list: &ListArgs, config: &FileConfig) -> Result<()> {
    let catalog_url = effective_catalog_url(args, config);
    let client = CatalogClient::new(&catalog_url)?;

    let query = BookQuery {
        q: list.query.clone(),
        author: list.author.clone(),
        year_from: list.year_from,
        year_to: list.year_to,
        sort: map_sort_order(list.sort),
        page: list.page,
        page_size: list
            .page_size
            .or(config.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = match client.list(&query).await {
        Ok(page) => page,
        Err(error) => {
            debug!(error = %error, "Catalog listing failed");
            return Err(anyhow::anyhow!(output::catalog_failure_line(&error)));
        }
    };

    let mut listing = Listing::new();
    let generation = listing.show_page(page);

    if !list.no_covers && !listing.is_empty() {
        if config.provider_connect_timeout_secs.is_some()
            || config.provider_read_timeout_secs.is_some()
        {
            configure_provider_http_timeouts(
                config
                    .provider_connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
                config
                    .provider_read_timeout_secs
                    .unwrap_or(DEFAULT_READ_TIMEOUT_SECS),
            );
        }

        let resolver = build_default_cover_resolver(
            config.open_library_base_url.as_deref(),
            config.google_books_base_url.as_deref(),
        );

        let requests: Vec<(usize, String)> = listing
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.book.isbn.is_empty())
            .map(|(index, row)| (index, row.book.isbn.clone()))
            .collect();

        let concurrency = list
            .concurrency
            .or(config.concurrency)
            .map(usize::from)
            .unwrap_or(DEFAULT_COVER_CONCURRENCY);

        debug!(
            requests = requests.len(),
            concurrency, "Resolving covers for listing"
        );

        let progress = if args.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(requests.len() as u64)
        };

        // Each row resolves independently; results are applied in arrival
        // order and checked against the render generation.
        let mut lookups = stream::iter(requests.into_iter().map(|(row, isbn)| {
            let resolver = &resolver;
            async move { (row, resolver.resolve(&isbn).await) }
        }))
        .buffer_unordered(concurrency.max(1));

        while let Some((row, result)) = lookups.next().await {
            progress.inc(1);
            listing.apply_cover(generation, row, result);
        }
        progress.finish_and_clear();

        info!(
            resolved = listing
                .rows()
                .iter()
                .filter(|row| row.cover().is_resolved())
                .count(),
            rows = listing.rows().len(),
            "Cover resolution complete"
        );
    }

    for line in output::render_listing(&listing, output::terminal_width()) {
        println!("{line}");
    }

    Ok(())
}
