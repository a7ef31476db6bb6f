//! Cache types for Storefront API responses.

use forgotten_essentials_core::{Category, Product};

/// Cache key for catalog reads. Cart mutations are never cached.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products { first: i64 },
    Collections { first: i64 },
    CollectionProducts { handle: String, first: i64 },
    Metaobjects { kind: String, first: i64 },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Collections(Vec<Category>),
    Metaobjects(Vec<crate::shopify::types::Metaobject>),
}
