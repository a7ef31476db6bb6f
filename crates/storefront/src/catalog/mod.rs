//! Catalog data sources.
//!
//! The storefront reads products and collections through [`CatalogSource`].
//! Which implementation backs it is decided once, at startup, by
//! [`Catalog::from_config`]; views never check credentials themselves.
//!
//! Every source degrades instead of failing: a remote error is logged and
//! the caller sees an empty list (or `None` for a single product).

pub mod fixtures;

use std::future::Future;

use forgotten_essentials_core::{Category, Product};
use tracing::{debug, instrument, warn};

use crate::config::{CatalogMode, StorefrontConfig};
use crate::shopify::{ShopifyError, StorefrontClient};

/// Base category slugs; every other collection counts as featured.
pub const BASE_CATEGORY_SLUGS: [&str; 5] = ["jackets", "shirts", "tees", "pants", "accessories"];

/// Read access to products and collections.
pub trait CatalogSource: Send + Sync {
    /// The first `limit` products.
    fn products(&self, limit: usize) -> impl Future<Output = Vec<Product>> + Send;

    /// A single product by URL handle.
    fn product_by_handle(&self, handle: &str) -> impl Future<Output = Option<Product>> + Send;

    /// The first `limit` collections.
    fn collections(&self, limit: usize) -> impl Future<Output = Vec<Category>> + Send;

    /// Themed collections, excluding the base categories.
    fn featured_collections(&self, limit: usize) -> impl Future<Output = Vec<Category>> + Send;

    /// Products in a collection; `None` means the whole catalog.
    fn products_by_collection(
        &self,
        handle: Option<&str>,
        limit: usize,
    ) -> impl Future<Output = Vec<Product>> + Send;
}

/// Whether a collection slug is one of the base categories.
#[must_use]
pub fn is_base_category(slug: &str) -> bool {
    BASE_CATEGORY_SLUGS.contains(&slug)
}

// =============================================================================
// Remote
// =============================================================================

/// Catalog backed by the Shopify Storefront API.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    client: StorefrontClient,
}

impl RemoteCatalog {
    #[must_use]
    pub const fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// The underlying API client.
    #[must_use]
    pub const fn client(&self) -> &StorefrontClient {
        &self.client
    }
}

impl CatalogSource for RemoteCatalog {
    #[instrument(skip(self))]
    async fn products(&self, limit: usize) -> Vec<Product> {
        self.client
            .get_products(limit)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to fetch products");
                Vec::new()
            })
    }

    #[instrument(skip(self), fields(handle = %handle))]
    async fn product_by_handle(&self, handle: &str) -> Option<Product> {
        match self.client.get_product_by_handle(handle).await {
            Ok(product) => Some(product),
            Err(ShopifyError::ProductNotFound(_)) => {
                debug!("Product not found");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch product");
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn collections(&self, limit: usize) -> Vec<Category> {
        self.client
            .get_collections(limit)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to fetch collections");
                Vec::new()
            })
    }

    #[instrument(skip(self))]
    async fn featured_collections(&self, limit: usize) -> Vec<Category> {
        // Filtered after fetching, so fewer than `limit` may come back.
        self.collections(limit)
            .await
            .into_iter()
            .filter(|c| !is_base_category(&c.slug))
            .collect()
    }

    #[instrument(skip(self))]
    async fn products_by_collection(&self, handle: Option<&str>, limit: usize) -> Vec<Product> {
        let Some(handle) = handle else {
            return self.products(limit).await;
        };

        self.client
            .get_products_by_collection(handle, limit)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, handle = %handle, "Failed to fetch collection products");
                Vec::new()
            })
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Static preview catalog.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    featured: Vec<Category>,
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new(
            fixtures::products(),
            fixtures::categories(),
            fixtures::featured_collections(),
        )
    }
}

impl FixtureCatalog {
    /// Catalog over an explicit data set.
    #[must_use]
    pub const fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        featured: Vec<Category>,
    ) -> Self {
        Self {
            products,
            categories,
            featured,
        }
    }
}

impl CatalogSource for FixtureCatalog {
    async fn products(&self, limit: usize) -> Vec<Product> {
        self.products.iter().take(limit).cloned().collect()
    }

    async fn product_by_handle(&self, handle: &str) -> Option<Product> {
        self.products.iter().find(|p| p.slug == handle).cloned()
    }

    async fn collections(&self, limit: usize) -> Vec<Category> {
        self.categories.iter().take(limit).cloned().collect()
    }

    async fn featured_collections(&self, limit: usize) -> Vec<Category> {
        self.featured.iter().take(limit).cloned().collect()
    }

    async fn products_by_collection(&self, handle: Option<&str>, limit: usize) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| handle.is_none_or(|h| p.category == h))
            .take(limit)
            .cloned()
            .collect()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The catalog source selected for this session.
#[derive(Debug, Clone)]
pub enum Catalog {
    Remote(RemoteCatalog),
    Fixtures(FixtureCatalog),
    /// Preview mode with mock data switched off.
    Disabled,
}

impl Catalog {
    /// Pick the catalog source for a configuration and mock-data toggle.
    ///
    /// A store whose endpoint cannot be built falls back to fixtures.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig, show_mock_data: Option<bool>) -> Self {
        match config.catalog_mode(show_mock_data) {
            CatalogMode::Remote => {
                match StorefrontClient::new(&config.shopify, config.cache_ttl) {
                    Ok(client) => Self::Remote(RemoteCatalog::new(client)),
                    Err(e) => {
                        tracing::error!(error = %e, "Invalid Shopify configuration, using fixtures");
                        Self::Fixtures(FixtureCatalog::default())
                    }
                }
            }
            CatalogMode::Fixtures => Self::Fixtures(FixtureCatalog::default()),
            CatalogMode::Disabled => Self::Disabled,
        }
    }

    /// Which kind of source this is.
    #[must_use]
    pub const fn mode(&self) -> CatalogMode {
        match self {
            Self::Remote(_) => CatalogMode::Remote,
            Self::Fixtures(_) => CatalogMode::Fixtures,
            Self::Disabled => CatalogMode::Disabled,
        }
    }

    /// The API client, when the catalog is remote.
    #[must_use]
    pub const fn client(&self) -> Option<&StorefrontClient> {
        match self {
            Self::Remote(remote) => Some(remote.client()),
            Self::Fixtures(_) | Self::Disabled => None,
        }
    }
}

impl CatalogSource for Catalog {
    async fn products(&self, limit: usize) -> Vec<Product> {
        match self {
            Self::Remote(source) => source.products(limit).await,
            Self::Fixtures(source) => source.products(limit).await,
            Self::Disabled => Vec::new(),
        }
    }

    async fn product_by_handle(&self, handle: &str) -> Option<Product> {
        match self {
            Self::Remote(source) => source.product_by_handle(handle).await,
            Self::Fixtures(source) => source.product_by_handle(handle).await,
            Self::Disabled => None,
        }
    }

    async fn collections(&self, limit: usize) -> Vec<Category> {
        match self {
            Self::Remote(source) => source.collections(limit).await,
            Self::Fixtures(source) => source.collections(limit).await,
            Self::Disabled => Vec::new(),
        }
    }

    async fn featured_collections(&self, limit: usize) -> Vec<Category> {
        match self {
            Self::Remote(source) => source.featured_collections(limit).await,
            Self::Fixtures(source) => source.featured_collections(limit).await,
            Self::Disabled => Vec::new(),
        }
    }

    async fn products_by_collection(&self, handle: Option<&str>, limit: usize) -> Vec<Product> {
        match self {
            Self::Remote(source) => source.products_by_collection(handle, limit).await,
            Self::Fixtures(source) => source.products_by_collection(handle, limit).await,
            Self::Disabled => Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ShopifyStorefrontConfig;

    #[tokio::test]
    async fn test_fixture_products_truncate_to_limit() {
        let catalog = FixtureCatalog::default();
        assert_eq!(catalog.products(50).await.len(), 8);
        assert_eq!(catalog.products(3).await.len(), 3);
    }

    #[tokio::test]
    async fn test_fixture_products_by_collection() {
        let catalog = FixtureCatalog::default();

        let jackets = catalog.products_by_collection(Some("jackets"), 50).await;
        let names: Vec<_> = jackets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Carhartt Work Jacket", "Leather Biker Jacket"]);

        assert_eq!(catalog.products_by_collection(None, 50).await.len(), 8);
        assert!(
            catalog
                .products_by_collection(Some("swimwear"), 50)
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_fixture_product_by_handle() {
        let catalog = FixtureCatalog::default();
        let product = catalog.product_by_handle("levis-501-jeans").await.unwrap();
        assert_eq!(product.brand.as_deref(), Some("Levi's"));
        assert!(catalog.product_by_handle("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_fixture_featured_collections_are_not_base_categories() {
        let catalog = FixtureCatalog::default();
        let featured = catalog.featured_collections(10).await;
        assert!(!featured.is_empty());
        assert!(featured.iter().all(|c| !is_base_category(&c.slug)));
        assert_eq!(catalog.collections(10).await.len(), 5);
    }

    #[tokio::test]
    async fn test_disabled_catalog_is_empty() {
        let catalog = Catalog::from_config(&StorefrontConfig::default(), Some(false));
        assert_eq!(catalog.mode(), CatalogMode::Disabled);
        assert!(catalog.products(50).await.is_empty());
        assert!(catalog.collections(10).await.is_empty());
        assert!(catalog.product_by_handle("carhartt-work-jacket").await.is_none());
    }

    #[test]
    fn test_from_config_modes() {
        let preview = Catalog::from_config(&StorefrontConfig::default(), None);
        assert_eq!(preview.mode(), CatalogMode::Fixtures);
        assert!(preview.client().is_none());

        let config = StorefrontConfig {
            shopify: ShopifyStorefrontConfig::new("forgotten-essentials.myshopify.com", "abc123"),
            ..StorefrontConfig::default()
        };
        let remote = Catalog::from_config(&config, Some(false));
        assert_eq!(remote.mode(), CatalogMode::Remote);
        assert!(remote.client().is_some());
    }

    #[test]
    fn test_is_base_category() {
        assert!(is_base_category("tees"));
        assert!(!is_base_category("90s-workwear"));
    }
}
