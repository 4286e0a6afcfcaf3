//! The `add` subcommand: submit a new record to the catalog.

use anyhow::Result;
use tracing::debug;

use bookshelf::catalog::{BookDraft, CatalogClient};

use crate::app_config::FileConfig;
use crate::cli::{AddArgs, Args};
use crate::commands::effective_catalog_url;
use crate::output;

pub async fn run(args: &Args, add: &AddArgs, config: &FileConfig) -> Result<()> {
    let catalog_url = effective_catalog_url(args, config);
    let client = CatalogClient::new(&catalog_url)?;

    let draft = BookDraft {
        title: add.title.clone(),
        author_first: add.author_first.clone(),
        author_last: add.author_last.clone(),
        year: add.year.clone(),
        isbn: add.isbn.clone(),
    };

    debug!(isbn = %draft.isbn, "Submitting new book");

    match client.create(&draft).await {
        Ok(book) => {
            println!("{}", output::saved_line(&book));
            Ok(())
        }
        Err(error) => {
            debug!(error = %error, "Create failed");
            Err(anyhow::anyhow!(output::catalog_failure_line(&error)))
        }
    }
}
