//! Debounced quick search.
//!
//! Keystrokes are pushed into a `watch` channel; a background task waits
//! until the query has been quiet for the configured delay, runs the search
//! over the current product snapshot, and publishes the top results. A query
//! superseded before its delay elapses is never searched.

use std::sync::Arc;
use std::time::Duration;

use forgotten_essentials_core::Product;
use tokio::sync::watch;
use tracing::debug;

use super::search_with_relevance;

/// Outcome of the most recent debounced search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Query the results were computed for.
    pub query: String,
    /// Best matches, at most the configured result limit.
    pub products: Vec<Product>,
    /// Number of matches before truncation.
    pub total: usize,
}

/// Handle to a running debounced search task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct SearchDebouncer {
    query_tx: watch::Sender<String>,
    products_tx: watch::Sender<Arc<Vec<Product>>>,
    results_rx: watch::Receiver<SearchResults>,
}

impl SearchDebouncer {
    /// Spawn the search task on the current tokio runtime.
    #[must_use]
    pub fn spawn(products: Vec<Product>, delay: Duration, limit: usize) -> Self {
        let (query_tx, query_rx) = watch::channel(String::new());
        let (products_tx, products_rx) = watch::channel(Arc::new(products));
        let (results_tx, results_rx) = watch::channel(SearchResults::default());

        tokio::spawn(run(query_rx, products_rx, results_tx, delay, limit));

        Self {
            query_tx,
            products_tx,
            results_rx,
        }
    }

    /// Record the latest text typed into the search box.
    pub fn set_query(&self, query: impl Into<String>) {
        self.query_tx.send_replace(query.into());
    }

    /// Replace the product snapshot searched from now on.
    pub fn set_products(&self, products: Vec<Product>) {
        self.products_tx.send_replace(Arc::new(products));
    }

    /// Receiver notified each time a debounced search completes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.results_rx.clone()
    }

    /// The most recently published results.
    #[must_use]
    pub fn latest(&self) -> SearchResults {
        self.results_rx.borrow().clone()
    }
}

async fn run(
    mut queries: watch::Receiver<String>,
    products: watch::Receiver<Arc<Vec<Product>>>,
    results: watch::Sender<SearchResults>,
    delay: Duration,
    limit: usize,
) {
    // Each outer iteration handles one burst of keystrokes.
    while queries.changed().await.is_ok() {
        loop {
            tokio::select! {
                changed = queries.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                () = tokio::time::sleep(delay) => break,
            }
        }

        let query = queries.borrow_and_update().clone();
        let snapshot = Arc::clone(&products.borrow());

        let matches = search_with_relevance(&snapshot, &query);
        let total = matches.len();
        debug!(query = %query, total, "Debounced search complete");

        results.send_replace(SearchResults {
            query,
            products: matches.into_iter().take(limit).collect(),
            total,
        });
    }
}
