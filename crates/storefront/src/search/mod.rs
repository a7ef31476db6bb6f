//! Relevance-ranked product search over an in-memory catalog snapshot.
//!
//! Matching is conjunctive: every whitespace-separated term of the query
//! must appear somewhere in the product's searchable text. Matches are then
//! ranked by a per-term field score, keeping catalog order on ties.
//!
//! Matching is literal substring matching on lowercased text; punctuation
//! and accents are not normalised, and repeated terms count once per
//! occurrence.

mod debounce;

pub use debounce::{SearchDebouncer, SearchResults};

use forgotten_essentials_core::Product;
use regex::RegexBuilder;

/// Points awarded per term, by field.
pub mod weights {
    /// Term equals the whole product name.
    pub const NAME_EXACT: u32 = 100;
    /// Term appears in the name (only when not an exact match).
    pub const NAME: u32 = 50;
    pub const BRAND: u32 = 40;
    pub const CATEGORY: u32 = 30;
    pub const ERA: u32 = 20;
    pub const DESCRIPTION: u32 = 10;
}

/// Split a query into lowercase whitespace-delimited terms.
///
/// Terms are not deduplicated.
#[must_use]
pub fn terms(query: &str) -> Vec<String> {
    query.to_lowercase().split_whitespace().map(String::from).collect()
}

/// Products whose searchable text contains every query term.
///
/// An empty or all-whitespace query matches nothing.
#[must_use]
pub fn filter_by_query(products: &[Product], query: &str) -> Vec<Product> {
    let terms = terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|product| {
            let corpus = searchable_text(product);
            terms.iter().all(|term| corpus.contains(term.as_str()))
        })
        .cloned()
        .collect()
}

/// Relevance score of a product for a query, summed over terms.
#[must_use]
pub fn score_product(product: &Product, query: &str) -> u32 {
    let name = product.name.to_lowercase();
    let brand = product.brand.as_deref().map(str::to_lowercase);
    let category = product.category.to_lowercase();
    let era = product.era.as_deref().map(str::to_lowercase);
    let description = product.description.to_lowercase();

    let contains = |field: Option<&String>, term: &str| field.is_some_and(|f| f.contains(term));

    terms(query)
        .iter()
        .map(|term| {
            let term = term.as_str();
            let mut score = 0;

            if name == term {
                score += weights::NAME_EXACT;
            } else if name.contains(term) {
                score += weights::NAME;
            }
            if contains(brand.as_ref(), term) {
                score += weights::BRAND;
            }
            if category.contains(term) {
                score += weights::CATEGORY;
            }
            if contains(era.as_ref(), term) {
                score += weights::ERA;
            }
            if description.contains(term) {
                score += weights::DESCRIPTION;
            }
            score
        })
        .sum()
}

/// Matching products ordered by descending score; ties keep catalog order.
#[must_use]
pub fn search_with_relevance(products: &[Product], query: &str) -> Vec<Product> {
    let mut matches = filter_by_query(products, query);
    // sort_by_cached_key is stable, so equal scores keep filter order.
    matches.sort_by_cached_key(|product| std::cmp::Reverse(score_product(product, query)));
    matches
}

/// Wrap every case-insensitive occurrence of each query term in
/// `<mark>…</mark>`.
///
/// Terms are applied one after another over the already-marked text. An
/// empty query returns the text unchanged.
#[must_use]
pub fn highlight_matches(text: &str, query: &str) -> String {
    let mut result = text.to_string();

    for term in terms(query) {
        let Ok(pattern) = RegexBuilder::new(&regex::escape(&term))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };
        result = pattern.replace_all(&result, "<mark>$0</mark>").into_owned();
    }

    result
}

/// Lowercased concatenation of the fields a query can match.
fn searchable_text(product: &Product) -> String {
    let condition = product.condition.as_ref().map(|c| c.label());

    [
        Some(product.name.as_str()),
        Some(product.description.as_str()),
        product.brand.as_deref(),
        Some(product.category.as_str()),
        product.era.as_deref(),
        product.size.as_deref(),
        condition,
    ]
    .into_iter()
    .flatten()
    .filter(|field| !field.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}
