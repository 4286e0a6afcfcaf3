//! Cover resolver with priority-ordered provider chain and memoization.
//!
//! The [`CoverResolver`] owns a provider chain and a [`CoverCache`] and
//! orchestrates the resolution loop: cache check, then each provider in
//! priority order, degrading every failure to "no cover". Resolution never
//! returns an error; the worst outcome is `None`.

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info, warn};

use super::{CoverCache, CoverProvider, ProviderPriority};

/// A priority-ordered chain of cover providers with a shared cache.
///
/// The resolver tries providers in priority order (Primary first, then
/// Fallback). Within the same priority level, providers are tried in
/// registration order. Completed resolutions are memoized per identifier,
/// including misses, so repeated requests for the same ISBN issue no further
/// network calls for the resolver's lifetime.
pub struct CoverResolver {
    providers: Vec<Box<dyn CoverProvider>>,
    cache: CoverCache,
}

impl CoverResolver {
    /// Creates an empty cover resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            cache: CoverCache::new(),
        }
    }

    /// Registers a provider with the resolver.
    pub fn register(&mut self, provider: Box<dyn CoverProvider>) {
        debug!(
            name = provider.name(),
            priority = ?provider.priority(),
            "Registering cover provider"
        );
        self.providers.push(provider);
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns the cache of completed resolutions.
    #[must_use]
    pub fn cache(&self) -> &CoverCache {
        &self.cache
    }

    /// Returns all providers sorted by priority.
    ///
    /// Primary providers come first; within the same priority level,
    /// registration order is preserved.
    fn providers_in_priority_order(&self) -> Vec<&dyn CoverProvider> {
        let mut providers: Vec<&dyn CoverProvider> =
            self.providers.iter().map(AsRef::as_ref).collect();
        providers.sort_by_key(|p| p.priority());
        providers
    }

    /// Resolves an ISBN to a best-effort cover URL.
    ///
    /// This method orchestrates the full resolution loop:
    /// 1. An empty identifier resolves to `None` without any network call
    /// 2. A cached result (hit or miss) is returned without re-querying
    /// 3. Providers are tried in priority order; `Ok(None)` and errors both
    ///    fall through to the next provider (errors are logged with the
    ///    identifier for diagnosis)
    /// 4. The outcome, `Some(url)` or `None`, is cached before returning
    ///
    /// Never returns an error: every provider failure degrades to `None`, and
    /// the caller substitutes the placeholder asset.
    #[tracing::instrument(skip_all, fields(isbn = %isbn))]
    pub async fn resolve(&self, isbn: &str) -> Option<String> {
        if isbn.is_empty() {
            debug!("Empty identifier; nothing to resolve");
            return None;
        }

        if let Some(cached) = self.cache.lookup(isbn) {
            debug!(cached_hit = cached.is_some(), "Cover cache hit");
            return cached;
        }

        for provider in self.providers_in_priority_order() {
            debug!(provider = provider.name(), "Trying cover provider");

            match provider.lookup(isbn).await {
                Ok(Some(url)) => {
                    info!(provider = provider.name(), url = %url, "Cover resolved");
                    self.cache.insert(isbn, Some(url.clone()));
                    return Some(url);
                }
                Ok(None) => {
                    debug!(
                        provider = provider.name(),
                        "Provider has no cover; trying next"
                    );
                }
                Err(error) => {
                    warn!(
                        provider = provider.name(),
                        isbn = %isbn,
                        error = %error,
                        "Cover lookup failed; treating as no cover"
                    );
                }
            }
        }

        self.cache.insert(isbn, None);
        None
    }

    /// Resolves a batch of keyed identifiers with bounded concurrency.
    ///
    /// Each request is an independent resolution; up to `limit` run at a
    /// time and results are returned in completion order, not input order,
    /// tagged with the caller's key (typically a row index). Identical
    /// identifiers in one batch may race their first resolution; the cache
    /// makes the outcome identical either way.
    pub async fn resolve_many(
        &self,
        requests: Vec<(usize, String)>,
        limit: usize,
    ) -> Vec<(usize, Option<String>)> {
        let limit = limit.max(1);

        stream::iter(requests.into_iter().map(|(key, isbn)| async move {
            let result = self.resolve(&isbn).await;
            (key, result)
        }))
        .buffer_unordered(limit)
        .collect()
        .await
    }
}

impl std::fmt::Debug for CoverResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("CoverResolver")
            .field("provider_count", &self.providers.len())
            .field("providers", &names)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Default for CoverResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::covers::CoverError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== MockProvider for Testing ====================

    enum MockOutcome {
        Found(&'static str),
        NotFound,
        Fails,
    }

    struct MockProvider {
        mock_name: &'static str,
        mock_priority: ProviderPriority,
        outcome: MockOutcome,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CoverProvider for MockProvider {
        fn name(&self) -> &str {
            self.mock_name
        }

        fn priority(&self) -> ProviderPriority {
            self.mock_priority
        }

        async fn lookup(&self, isbn: &str) -> Result<Option<String>, CoverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                MockOutcome::Found(url) => Ok(Some(url.to_string())),
                MockOutcome::NotFound => Ok(None),
                MockOutcome::Fails => Err(CoverError::request(self.mock_name, isbn, "mock failure")),
            }
        }
    }

    /// Registers a mock provider and returns a handle to its call counter.
    fn register_mock(
        resolver: &mut CoverResolver,
        mock_name: &'static str,
        mock_priority: ProviderPriority,
        outcome: MockOutcome,
    ) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        resolver.register(Box::new(MockProvider {
            mock_name,
            mock_priority,
            outcome,
            calls: Arc::clone(&calls),
        }));
        calls
    }

    // ==================== Resolver Basic Tests ====================

    #[test]
    fn test_resolver_new_is_empty() {
        let resolver = CoverResolver::new();
        assert!(resolver.is_empty());
        assert_eq!(resolver.provider_count(), 0);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_resolver_debug_shows_providers() {
        let mut resolver = CoverResolver::new();
        register_mock(
            &mut resolver,
            "test-provider",
            ProviderPriority::Primary,
            MockOutcome::NotFound,
        );
        let debug_str = format!("{resolver:?}");
        assert!(
            debug_str.contains("test-provider"),
            "Debug should show provider names"
        );
        assert!(
            debug_str.contains("provider_count: 1"),
            "Debug should show count"
        );
    }

    // ==================== Resolution Loop Tests ====================

    #[tokio::test]
    async fn test_resolve_empty_identifier_is_none_without_provider_calls() {
        let mut resolver = CoverResolver::new();
        let primary = register_mock(&mut resolver, "primary", ProviderPriority::Primary, MockOutcome::Found("u"));

        assert_eq!(resolver.resolve("").await, None);
        assert_eq!(primary.load(Ordering::SeqCst), 0);
        assert!(resolver.cache().is_empty(), "empty identifier is not cached");
    }

    #[tokio::test]
    async fn test_resolve_primary_hit_skips_fallback() {
        let mut resolver = CoverResolver::new();
        // Register fallback first: priority order must still win over
        // registration order.
        let fallback = register_mock(&mut resolver, "fallback", ProviderPriority::Fallback, MockOutcome::Found("https://fallback.example/cover.jpg"));
        let primary = register_mock(&mut resolver, "primary", ProviderPriority::Primary, MockOutcome::Found("https://primary.example/cover.jpg"));

        let result = resolver.resolve("123").await;
        assert_eq!(result, Some("https://primary.example/cover.jpg".to_string()));
        assert_eq!(primary.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_falls_through_miss_and_failure_to_fallback() {
        let mut resolver = CoverResolver::new();
        let failing = register_mock(&mut resolver, "failing", ProviderPriority::Primary, MockOutcome::Fails);
        let empty = register_mock(&mut resolver, "empty", ProviderPriority::Primary, MockOutcome::NotFound);
        let fallback = register_mock(&mut resolver, "fallback", ProviderPriority::Fallback, MockOutcome::Found("https://fallback.example/cover.jpg"));

        let result = resolver.resolve("123").await;
        assert_eq!(
            result,
            Some("https://fallback.example/cover.jpg".to_string())
        );
        assert_eq!(failing.load(Ordering::SeqCst), 1);
        assert_eq!(empty.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_all_providers_exhausted_returns_none() {
        let mut resolver = CoverResolver::new();
        register_mock(&mut resolver, "a", ProviderPriority::Primary, MockOutcome::Fails);
        register_mock(&mut resolver, "b", ProviderPriority::Fallback, MockOutcome::NotFound);

        assert_eq!(resolver.resolve("123").await, None);
    }

    #[tokio::test]
    async fn test_resolve_no_providers_returns_none() {
        let resolver = CoverResolver::new();
        assert_eq!(resolver.resolve("123").await, None);
    }

    // ==================== Caching Tests ====================

    #[tokio::test]
    async fn test_second_resolution_hits_cache_without_provider_calls() {
        let mut resolver = CoverResolver::new();
        let primary = register_mock(&mut resolver, "primary", ProviderPriority::Primary, MockOutcome::Found("https://primary.example/cover.jpg"));

        let first = resolver.resolve("9780141036144").await;
        let second = resolver.resolve("9780141036144").await;

        assert_eq!(first, second);
        assert_eq!(
            primary.load(Ordering::SeqCst),
            1,
            "second resolution must not query the provider"
        );
    }

    #[tokio::test]
    async fn test_miss_is_cached_and_not_retried() {
        let mut resolver = CoverResolver::new();
        let failing = register_mock(&mut resolver, "failing", ProviderPriority::Primary, MockOutcome::Fails);

        assert_eq!(resolver.resolve("123").await, None);
        assert_eq!(resolver.resolve("123").await, None);

        assert_eq!(
            failing.load(Ordering::SeqCst),
            1,
            "a remembered miss must not re-query failing providers"
        );
        assert_eq!(resolver.cache().lookup("123"), Some(None));
    }

    // ==================== Batch Resolution Tests ====================

    #[tokio::test]
    async fn test_resolve_many_returns_every_key() {
        let mut resolver = CoverResolver::new();
        register_mock(&mut resolver, "primary", ProviderPriority::Primary, MockOutcome::Found("https://primary.example/cover.jpg"));

        let requests = vec![
            (0, "111".to_string()),
            (1, String::new()),
            (2, "333".to_string()),
        ];
        let mut results = resolver.resolve_many(requests, 2).await;
        results.sort_by_key(|(key, _)| *key);

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0],
            (0, Some("https://primary.example/cover.jpg".to_string()))
        );
        assert_eq!(results[1], (1, None), "empty identifier stays unresolved");
        assert_eq!(
            results[2],
            (2, Some("https://primary.example/cover.jpg".to_string()))
        );
    }

    #[tokio::test]
    async fn test_resolve_many_zero_limit_is_clamped() {
        let mut resolver = CoverResolver::new();
        register_mock(&mut resolver, "p", ProviderPriority::Primary, MockOutcome::NotFound);

        let results = resolver.resolve_many(vec![(0, "1".to_string())], 0).await;
        assert_eq!(results, vec![(0, None)]);
    }
}
