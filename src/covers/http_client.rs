//! Shared HTTP client construction policy for cover providers.
//!
//! This module centralizes provider networking defaults so cover providers
//! stay consistent on timeout, user-agent, and compression behavior.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

use super::CoverError;

/// Default connect timeout for provider clients, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default read timeout for provider clients, in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy)]
struct ProviderHttpTimeouts {
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
}

impl Default for ProviderHttpTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

static PROVIDER_HTTP_TIMEOUTS: RwLock<ProviderHttpTimeouts> = RwLock::new(ProviderHttpTimeouts {
    connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
    read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
});

/// Configures provider HTTP timeouts used by provider client builders.
///
/// Intended for CLI/runtime configuration before provider construction.
pub fn configure_provider_http_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) {
    if let Ok(mut guard) = PROVIDER_HTTP_TIMEOUTS.write() {
        *guard = ProviderHttpTimeouts {
            connect_timeout_secs,
            read_timeout_secs,
        };
    }
}

fn provider_http_timeouts() -> ProviderHttpTimeouts {
    PROVIDER_HTTP_TIMEOUTS
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

/// Builds a single shared provider user-agent string (no per-provider name in header).
///
/// Use this for all providers so traffic is not trivially fingerprintable per
/// site. The provider name is only used for logging, not in the UA string.
#[must_use]
pub fn standard_user_agent(_provider_name: &str) -> String {
    user_agent::default_provider_user_agent()
}

/// Builds a provider HTTP client using shared project policy.
///
/// `provider_name` is used only for error messages, not in the User-Agent
/// header.
///
/// # Errors
///
/// Returns [`CoverError::Construction`] when client construction fails.
pub fn build_provider_http_client(
    provider_name: &'static str,
    user_agent: impl Into<String>,
) -> Result<Client, CoverError> {
    let timeouts = provider_http_timeouts();
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
        .timeout(Duration::from_secs(timeouts.read_timeout_secs))
        .user_agent(user_agent.into())
        .gzip(true)
        .build()
        .map_err(|error| {
            CoverError::construction(
                provider_name,
                format!("HTTP client construction failed: {error}"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Provider names that must all receive the same shared UA. When adding a
    /// new provider that calls `standard_user_agent`, add its name here.
    const PROVIDER_NAMES: &[&str] = &["openlibrary", "googlebooks"];

    #[test]
    fn test_standard_user_agent_single_shared_format() {
        let ua_first = standard_user_agent(PROVIDER_NAMES[0]);
        for name in PROVIDER_NAMES {
            let ua = standard_user_agent(name);
            assert_eq!(
                ua, ua_first,
                "all providers must share same UA (got different for {name})"
            );
            assert!(ua.contains("bookshelf/"), "UA must contain bookshelf/");
            assert!(ua.contains("cover-resolver"), "UA must contain cover-resolver");
            assert!(ua.contains("github.com"), "UA must contain project URL");
            assert!(
                !ua.contains(name),
                "UA must not contain provider name '{name}' (no per-provider fingerprinting)"
            );
        }
    }

    #[test]
    fn test_build_provider_http_client_succeeds() {
        let client = build_provider_http_client("openlibrary", standard_user_agent("openlibrary"));
        assert!(client.is_ok(), "default client policy should build");
    }
}
