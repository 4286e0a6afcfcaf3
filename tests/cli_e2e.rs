//! End-to-end CLI tests for the bookshelf binary.

// `Command::cargo_bin` is deprecated in assert_cmd >=2.0.17 in favor of
// `cargo::cargo_bin_cmd!` macro. Suppressed until migration to the new API.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

fn write_bookshelf_config(config_home: &std::path::Path, contents: &str) {
    let config_dir = config_home.join("bookshelf");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), contents).unwrap();
}

fn bookshelf_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("COLUMNS", "200")
        .env_remove("RUST_LOG");
    cmd
}

fn page_json(items: serde_json::Value, total: u64, page: u32, page_size: u32) -> serde_json::Value {
    serde_json::json!({
        "items": items,
        "total": total,
        "page": page,
        "page_size": page_size
    })
}

#[test]
fn test_cli_help_shows_subcommands() {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("add"));
}

#[test]
fn test_cli_version_shows_crate_version() {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_cli_list_renders_counts_and_placeholders_without_covers() {
    let Some(catalog) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            serde_json::json!([
                {"id": 1, "title": "Nineteen Eighty-Four", "author_first": "George",
                 "author_last": "Orwell", "year": "1949", "isbn": "9780141036144"},
                {"id": 2, "title": "Dune", "author_first": "Frank",
                 "author_last": "Herbert", "year": "1965", "isbn": "9780441172719"}
            ]),
            2,
            1,
            20,
        )))
        .mount(&catalog)
        .await;

    let config_home = TempDir::new().unwrap();

    let mut cmd = bookshelf_cmd(&config_home);
    cmd.args(["-q", "list", "--no-covers", "--catalog-url", catalog.uri().as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 results"))
        .stdout(predicate::str::contains("Nineteen Eighty-Four"))
        .stdout(predicate::str::contains("Dune"))
        .stdout(predicate::str::contains("assets/no-cover.png"))
        .stdout(predicate::str::contains("Page 1 of 1"));
}

#[tokio::test]
async fn test_cli_list_resolves_covers_through_both_providers() {
    let Some(catalog) = start_mock_server_or_skip().await else {
        return;
    };
    let Some(open_library) = start_mock_server_or_skip().await else {
        return;
    };
    let Some(google_books) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            serde_json::json!([
                {"id": 1, "title": "Nineteen Eighty-Four", "author_first": "George",
                 "author_last": "Orwell", "year": "1949", "isbn": "9780141036144"},
                {"id": 2, "title": "Dune", "author_first": "Frank",
                 "author_last": "Herbert", "year": "1965", "isbn": "9780441172719"}
            ]),
            2,
            1,
            20,
        )))
        .mount(&catalog)
        .await;

    // First ISBN: Open Library has the cover.
    Mock::given(method("GET"))
        .and(path("/b/isbn/9780141036144.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "deleted": false, "failed": false, "uploaded": true
        })))
        .mount(&open_library)
        .await;

    // Second ISBN: Open Library misses, Google Books supplies a raw thumbnail.
    Mock::given(method("GET"))
        .and(path("/b/isbn/9780441172719.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&open_library)
        .await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "isbn:9780441172719"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalItems": 1,
            "items": [{"volumeInfo": {"imageLinks": {
                "thumbnail": "http://books.google.com/thumb?id=dune&zoom=1&edge=curl"
            }}}]
        })))
        .mount(&google_books)
        .await;

    let config_home = TempDir::new().unwrap();
    write_bookshelf_config(
        config_home.path(),
        &format!(
            "catalog_base_url = \"{}\"\nopen_library_base_url = \"{}\"\ngoogle_books_base_url = \"{}\"\n",
            catalog.uri(),
            open_library.uri(),
            google_books.uri()
        ),
    );

    let mut cmd = bookshelf_cmd(&config_home);
    cmd.args(["-q", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{}/b/isbn/9780141036144-M.jpg",
            open_library.uri()
        )))
        .stdout(predicate::str::contains(
            "https://books.google.com/thumb?id=dune&zoom=2",
        ))
        .stdout(predicate::str::contains("2 results"));
}

#[tokio::test]
async fn test_cli_list_empty_result_set_shows_empty_state() {
    let Some(catalog) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(serde_json::json!([]), 0, 1, 20)),
        )
        .mount(&catalog)
        .await;

    let config_home = TempDir::new().unwrap();

    let mut cmd = bookshelf_cmd(&config_home);
    cmd.args(["-q", "list", "--no-covers", "--catalog-url", catalog.uri().as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 results"))
        .stdout(predicate::str::contains("No books found."));
}

#[tokio::test]
async fn test_cli_add_prints_saved_line() {
    let Some(catalog) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 9,
            "title": "Dune",
            "author_first": "Frank",
            "author_last": "Herbert",
            "year": "1965",
            "isbn": "9780441172719"
        })))
        .mount(&catalog)
        .await;

    let config_home = TempDir::new().unwrap();

    let mut cmd = bookshelf_cmd(&config_home);
    cmd.args([
        "-q",
        "add",
        "--catalog-url",
        catalog.uri().as_str(),
        "--title",
        "Dune",
        "--author-first",
        "Frank",
        "--author-last",
        "Herbert",
        "--year",
        "1965",
        "--isbn",
        "9780441172719",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Saved: Dune by Herbert, Frank"));
}

#[tokio::test]
async fn test_cli_add_duplicate_surfaces_server_detail() {
    let Some(catalog) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "detail": "Book already exists."
        })))
        .mount(&catalog)
        .await;

    let config_home = TempDir::new().unwrap();

    let mut cmd = bookshelf_cmd(&config_home);
    cmd.args([
        "-q",
        "add",
        "--catalog-url",
        catalog.uri().as_str(),
        "--title",
        "Dune",
        "--author-first",
        "Frank",
        "--author-last",
        "Herbert",
        "--year",
        "1965",
        "--isbn",
        "9780441172719",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Book already exists."));
}

#[test]
fn test_cli_list_network_failure_is_generic_and_nonzero() {
    let config_home = TempDir::new().unwrap();
    let mut cmd = bookshelf_cmd(&config_home);

    // Nothing listens on this port.
    cmd.args([
        "-q",
        "list",
        "--no-covers",
        "--catalog-url",
        "http://127.0.0.1:9",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Network error"));
}
