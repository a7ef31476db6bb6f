//! Relevance search over the preview catalog.

use std::time::Duration;

use forgotten_essentials_core::{Price, Product};
use forgotten_essentials_storefront::catalog::fixtures;
use forgotten_essentials_storefront::search::{
    SearchDebouncer, filter_by_query, highlight_matches, score_product, search_with_relevance,
};

fn jackets() -> Vec<Product> {
    vec![
        Product::new("1", "Carhartt Work Jacket", Price::usd(65)),
        Product::new("3", "Leather Biker Jacket", Price::usd(125)),
    ]
}

/// Lowercased searchable text, built independently of the search module.
fn corpus(product: &Product) -> String {
    [
        Some(product.name.clone()),
        Some(product.description.clone()),
        product.brand.clone(),
        Some(product.category.clone()),
        product.era.clone(),
        product.size.clone(),
        product.condition.as_ref().map(|c| c.label().to_string()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_blank_queries_match_nothing() {
    let products = fixtures::products();
    for query in ["", " ", "\t\n", "   "] {
        assert!(filter_by_query(&products, query).is_empty(), "{query:?}");
    }
}

#[test]
fn test_match_iff_every_term_in_corpus() {
    let products = fixtures::products();
    let queries = [
        "jacket",
        "vintage jacket",
        "LEVI'S",
        "90s",
        "good tees",
        "work",
        "l",
        "carhartt leather",
        "no-such-thing",
    ];

    for query in queries {
        let matched: Vec<_> = filter_by_query(&products, query)
            .into_iter()
            .map(|p| p.id)
            .collect();
        let expected: Vec<_> = products
            .iter()
            .filter(|p| {
                let text = corpus(p);
                query
                    .to_lowercase()
                    .split_whitespace()
                    .all(|term| text.contains(term))
            })
            .map(|p| p.id.clone())
            .collect();

        assert_eq!(matched, expected, "query {query:?}");
    }
}

// =============================================================================
// Ranking
// =============================================================================

#[test]
fn test_equal_scores_keep_input_order() {
    let products = jackets();
    let results = search_with_relevance(&products, "jacket");

    let names: Vec<_> = results.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Carhartt Work Jacket", "Leather Biker Jacket"]);
    assert!(results.iter().all(|p| score_product(p, "jacket") == 50));
}

#[test]
fn test_two_terms_require_both() {
    let products = jackets();
    let results = search_with_relevance(&products, "Carhartt Jacket");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Carhartt Work Jacket");
    assert_eq!(score_product(&results[0], "Carhartt Jacket"), 100);
}

#[test]
fn test_results_sorted_by_non_increasing_score() {
    let products = fixtures::products();
    for query in ["jacket", "vintage", "1990s", "l", "work pants"] {
        let ranked = search_with_relevance(&products, query);
        let filtered = filter_by_query(&products, query);
        assert_eq!(ranked.len(), filtered.len());

        let scores: Vec<_> = ranked.iter().map(|p| score_product(p, query)).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{query:?}: {scores:?}");

        for product in &filtered {
            assert!(ranked.iter().any(|p| p.id == product.id));
        }
    }
}

#[test]
fn test_exact_name_beats_substring() {
    let products = vec![
        Product::new("10", "Denim Jacket", Price::usd(40)),
        Product::new("11", "Denim", Price::usd(30)),
    ];

    assert_eq!(score_product(&products[1], "denim"), 100);
    assert_eq!(score_product(&products[0], "denim"), 50);

    let ranked = search_with_relevance(&products, "denim");
    assert_eq!(ranked[0].name, "Denim");
}

#[test]
fn test_highlight_is_case_insensitive() {
    assert_eq!(
        highlight_matches("Leather Biker Jacket", "jacket LEATHER"),
        "<mark>Leather</mark> Biker <mark>Jacket</mark>"
    );
    assert_eq!(highlight_matches("Levi's 501 Jeans", "  "), "Levi's 501 Jeans");
}

// =============================================================================
// Debounced quick search
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_quick_search_publishes_last_query_only() {
    let debouncer = SearchDebouncer::spawn(fixtures::products(), Duration::from_millis(300), 6);
    let mut results = debouncer.subscribe();

    for partial in ["l", "le", "lea", "leat", "leather"] {
        debouncer.set_query(partial);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    results.changed().await.unwrap();
    let latest = results.borrow_and_update().clone();
    assert_eq!(latest.query, "leather");
    assert_eq!(latest.products[0].name, "Leather Biker Jacket");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!results.has_changed().unwrap());
}
