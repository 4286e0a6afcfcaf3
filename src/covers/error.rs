//! Error types for cover-provider lookups.
//!
//! These errors never reach the resolver's callers: the resolution loop
//! catches them, logs a warning with the identifier, and treats the provider
//! as having no cover.

use thiserror::Error;

/// Errors that can occur while querying a cover provider.
#[derive(Debug, Clone, Error)]
pub enum CoverError {
    /// The provider could not be reached or the request failed in transit
    #[error("provider '{provider}' request failed for ISBN '{isbn}': {reason}")]
    Request {
        /// The provider that was queried
        provider: &'static str,
        /// The identifier being resolved
        isbn: String,
        /// Why the request failed
        reason: String,
    },

    /// The provider answered with a body that could not be interpreted
    #[error("provider '{provider}' returned an unexpected response for ISBN '{isbn}': {reason}")]
    InvalidResponse {
        /// The provider that was queried
        provider: &'static str,
        /// The identifier being resolved
        isbn: String,
        /// Why the response could not be interpreted
        reason: String,
    },

    /// Provider construction failed before any lookup could run
    #[error("provider '{provider}' could not be constructed: {reason}")]
    Construction {
        /// The provider being built
        provider: &'static str,
        /// Why construction failed
        reason: String,
    },
}

impl CoverError {
    /// Creates a `Request` error for a failed provider call.
    #[must_use]
    pub fn request(provider: &'static str, isbn: &str, reason: impl Into<String>) -> Self {
        Self::Request {
            provider,
            isbn: isbn.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidResponse` error for an uninterpretable body.
    #[must_use]
    pub fn invalid_response(provider: &'static str, isbn: &str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider,
            isbn: isbn.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a `Construction` error for a provider that failed to build.
    #[must_use]
    pub fn construction(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::Construction {
            provider,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_error_request_message() {
        let err = CoverError::request("openlibrary", "9780141036144", "connection refused");
        let msg = err.to_string();
        assert!(msg.contains("openlibrary"), "should contain provider");
        assert!(msg.contains("9780141036144"), "should contain identifier");
        assert!(msg.contains("connection refused"), "should contain reason");
    }

    #[test]
    fn test_cover_error_invalid_response_message() {
        let err = CoverError::invalid_response("googlebooks", "123", "body was not JSON");
        let msg = err.to_string();
        assert!(msg.contains("googlebooks"));
        assert!(msg.contains("unexpected response"));
        assert!(msg.contains("body was not JSON"));
    }

    #[test]
    fn test_cover_error_construction_message() {
        let err = CoverError::construction("openlibrary", "invalid base URL");
        let msg = err.to_string();
        assert!(msg.contains("could not be constructed"));
        assert!(msg.contains("invalid base URL"));
    }

    #[test]
    fn test_cover_error_clone() {
        let err = CoverError::request("openlibrary", "123", "timeout");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
