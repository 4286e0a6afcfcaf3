//! Error types for catalog API operations.
//!
//! The taxonomy keeps a structured server-provided detail message distinct
//! from a generic transport failure so callers can show the user the more
//! helpful of the two.

use thiserror::Error;

/// Errors that can occur while talking to the catalog API.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The server answered with an error status and (usually) a detail message
    #[error("catalog API error (HTTP {status}): {detail}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Server-provided detail, or a generic fallback when absent
        detail: String,
    },

    /// The request never completed (connectivity, DNS, TLS, timeout)
    #[error("catalog request failed: {reason}")]
    Network {
        /// Why the request failed
        reason: String,
    },

    /// The server answered success but the body could not be interpreted
    #[error("unexpected catalog response: {reason}")]
    InvalidResponse {
        /// Why the response could not be interpreted
        reason: String,
    },

    /// A draft failed client-side validation before any request was sent
    #[error("invalid book draft: {field} {reason}")]
    InvalidDraft {
        /// The offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Client construction failed before any request could run
    #[error("catalog client could not be constructed: {reason}")]
    Construction {
        /// Why construction failed
        reason: String,
    },
}

impl CatalogError {
    /// Creates an `Api` error from a status code and detail message.
    #[must_use]
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a `Network` error.
    #[must_use]
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidResponse` error.
    #[must_use]
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidDraft` error.
    #[must_use]
    pub fn invalid_draft(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDraft {
            field,
            reason: reason.into(),
        }
    }

    /// Creates a `Construction` error.
    #[must_use]
    pub fn construction(reason: impl Into<String>) -> Self {
        Self::Construction {
            reason: reason.into(),
        }
    }

    /// Maps a transport-layer error onto the taxonomy.
    ///
    /// Body-decode failures become `InvalidResponse`; everything else is a
    /// `Network` failure.
    #[must_use]
    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::invalid_response(error.to_string())
        } else {
            Self::network(error.to_string())
        }
    }

    /// Returns the server detail message when this error carries one.
    #[must_use]
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => Some(detail),
            _ => None,
        }
    }
}
