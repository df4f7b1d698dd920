//! Title search.

use mymovielist_core::MovieSummary;
use tracing::warn;

use crate::api::CatalogApi;

/// Search page view-model.
pub struct SearchView<C> {
    api: C,
    query: String,
    results: Vec<MovieSummary>,
    loading: bool,
}

impl<C: CatalogApi> SearchView<C> {
    #[must_use]
    pub const fn new(api: C) -> Self {
        Self {
            api,
            query: String::new(),
            results: Vec::new(),
            loading: false,
        }
    }

    /// Run a search. A blank query clears the results without a request;
    /// a failed request yields no results.
    pub async fn search(&mut self, query: &str) {
        query.trim().clone_into(&mut self.query);
        if self.query.is_empty() {
            self.results.clear();
            return;
        }

        self.loading = true;
        self.results = match self.api.search(&self.query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, query = %self.query, "Search failed");
                Vec::new()
            }
        };
        self.loading = false;
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    fn backend() -> FakeBackend {
        let backend = FakeBackend::new();
        backend.insert_movie("Dune");
        backend.insert_movie("Dune: Part Two");
        backend.insert_movie("Heat");
        backend
    }

    #[tokio::test]
    async fn test_search_returns_matches_in_order() {
        let backend = backend();
        let mut view = SearchView::new(backend);
        view.search("  dune ").await;

        assert_eq!(view.query(), "dune");
        let titles: Vec<&str> = view.results().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Dune", "Dune: Part Two"]);
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_blank_query_sends_nothing() {
        let backend = backend();
        let mut view = SearchView::new(backend.clone());
        view.search("dune").await;
        view.search("   ").await;

        assert!(view.results().is_empty());
        assert_eq!(backend.count("GET /search"), 1);
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty() {
        let backend = backend();
        backend.fail("GET /search", 500, None);
        let mut view = SearchView::new(backend);
        view.search("heat").await;
        assert!(view.results().is_empty());
    }
}
