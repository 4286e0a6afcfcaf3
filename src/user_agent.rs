//! Shared User-Agent strings for catalog and cover-provider HTTP clients.
//!
//! Single source for project URL and UA format so catalog and provider traffic
//! stay consistent and easy to update (good citizenship; RFC 9308).

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/nicksrandall/bookshelf";

/// Default User-Agent for catalog API requests (identifies the tool).
#[must_use]
pub(crate) fn default_catalog_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("bookshelf/{version} (catalog-client; +{PROJECT_UA_URL})")
}

/// Default User-Agent for cover-provider requests (single shared format; no per-provider name in header).
#[must_use]
pub(crate) fn default_provider_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("bookshelf/{version} (cover-resolver; +{PROJECT_UA_URL})")
}
