//! Shopify Storefront API client implementation.
//!
//! Sends hand-written GraphQL documents as `graphql_client` query bodies
//! over `reqwest` 0.13. Catalog reads are cached using `moka` (TTL from
//! configuration).

mod cache;
mod conversions;

pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use forgotten_essentials_core::{CartId, Category, Product};
use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::ShopifyError;
use crate::shopify::types::{CartLineInput, CartLineUpdateInput, Metaobject, RemoteCart};

use cache::{CacheKey, CacheValue};
use conversions::{convert_cart_payload, convert_collection, convert_product};
use queries::{
    AddToCart, AddToCartVariables, CollectionProductsVariables, CreateCart, CreateCartVariables,
    FirstVariables, GetCollections, GetMetaobjects, GetProductByHandle, GetProducts,
    GetProductsByCollection, HandleVariables, MetaobjectsVariables, RemoveFromCart,
    RemoveFromCartVariables, UpdateCartLines, UpdateCartLinesVariables,
};

/// Largest page the Storefront API accepts for `first`.
const MAX_PAGE_SIZE: usize = 250;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides access to products, collections, site content metaobjects, and
/// cart mutations. Catalog reads are cached; mutations never are.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotConfigured` if the store domain or token is
    /// missing, still a placeholder, or does not form a valid endpoint.
    pub fn new(config: &ShopifyStorefrontConfig, cache_ttl: Duration) -> Result<Self, ShopifyError> {
        if !config.has_valid_credentials() {
            return Err(ShopifyError::NotConfigured);
        }
        let (Some(endpoint), Some(access_token)) = (config.endpoint(), config.access_token.clone())
        else {
            return Err(ShopifyError::NotConfigured);
        };

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token,
                cache,
            }),
        })
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header(
                "X-Shopify-Storefront-Access-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %truncate(&response_text, 500),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                body: truncate(&response_text, 200),
            });
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %truncate(&response_text, 500),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");

            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(Into::into).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                body = %truncate(&response_text, 500),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::NoData(request_body.operation_name)
        })
    }

    /// Drop every cached catalog response.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the first `first` products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, first: usize) -> Result<Vec<Product>, ShopifyError> {
        let first = page_size(first);
        let cache_key = CacheKey::Products { first };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let data = self
            .execute::<GetProducts>(FirstVariables { first })
            .await?;

        let products: Vec<Product> = data.products.into_nodes().map(convert_product).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its handle, including its vintage metafields.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::ProductNotFound` if no product has the handle, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, ShopifyError> {
        let cache_key = CacheKey::Product(handle.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let data = self
            .execute::<GetProductByHandle>(HandleVariables {
                handle: handle.to_string(),
            })
            .await?;

        let product_data = data
            .product
            .ok_or_else(|| ShopifyError::ProductNotFound(handle.to_string()))?;

        let product = convert_product(product_data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get the first `first` collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(&self, first: usize) -> Result<Vec<Category>, ShopifyError> {
        let first = page_size(first);
        let cache_key = CacheKey::Collections { first };

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let data = self
            .execute::<GetCollections>(FirstVariables { first })
            .await?;

        let collections: Vec<Category> = data
            .collections
            .into_nodes()
            .map(convert_collection)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(collections.clone()))
            .await;

        Ok(collections)
    }

    /// Get the products in a collection.
    ///
    /// An unknown collection handle yields an empty list rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_products_by_collection(
        &self,
        handle: &str,
        first: usize,
    ) -> Result<Vec<Product>, ShopifyError> {
        let first = page_size(first);
        let cache_key = CacheKey::CollectionProducts {
            handle: handle.to_string(),
            first,
        };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection products");
            return Ok(products);
        }

        let data = self
            .execute::<GetProductsByCollection>(CollectionProductsVariables {
                handle: handle.to_string(),
                first,
            })
            .await?;

        let products: Vec<Product> = data
            .collection
            .map(|c| c.products.into_nodes().map(convert_product).collect())
            .unwrap_or_default();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Content Methods
    // =========================================================================

    /// Get metaobjects of a type (e.g., `hero_section`, `instagram_post`).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn get_metaobjects(
        &self,
        kind: &str,
        first: usize,
    ) -> Result<Vec<Metaobject>, ShopifyError> {
        let first = page_size(first);
        let cache_key = CacheKey::Metaobjects {
            kind: kind.to_string(),
            first,
        };

        if let Some(CacheValue::Metaobjects(objects)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for metaobjects");
            return Ok(objects);
        }

        let data = self
            .execute::<GetMetaobjects>(MetaobjectsVariables {
                kind: kind.to_string(),
                first,
            })
            .await?;

        let objects: Vec<Metaobject> = data.metaobjects.into_nodes().collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Metaobjects(objects.clone()))
            .await;

        Ok(objects)
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Create a new cart holding `lines`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or Shopify reports user
    /// errors.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<RemoteCart, ShopifyError> {
        let data = self
            .execute::<CreateCart>(CreateCartVariables { lines })
            .await?;

        convert_cart_payload(data.cart_create, "create cart")
    }

    /// Add lines to an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, the cart no longer exists,
    /// or Shopify reports user errors.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id, line_count = lines.len()))]
    pub async fn add_cart_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<RemoteCart, ShopifyError> {
        let data = self
            .execute::<AddToCart>(AddToCartVariables {
                cart_id: cart_id.to_string(),
                lines,
            })
            .await?;

        convert_cart_payload(data.cart_lines_add, "add cart lines")
    }

    /// Update quantities of existing cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or Shopify reports user
    /// errors.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<RemoteCart, ShopifyError> {
        let data = self
            .execute::<UpdateCartLines>(UpdateCartLinesVariables {
                cart_id: cart_id.to_string(),
                lines,
            })
            .await?;

        convert_cart_payload(data.cart_lines_update, "update cart lines")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or Shopify reports user
    /// errors.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_cart_lines(
        &self,
        cart_id: &CartId,
        line_ids: Vec<String>,
    ) -> Result<RemoteCart, ShopifyError> {
        let data = self
            .execute::<RemoveFromCart>(RemoveFromCartVariables {
                cart_id: cart_id.to_string(),
                line_ids,
            })
            .await?;

        convert_cart_payload(data.cart_lines_remove, "remove cart lines")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn page_size(first: usize) -> i64 {
    i64::try_from(first.min(MAX_PAGE_SIZE)).unwrap_or(0)
}

fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_credentials() {
        let result = StorefrontClient::new(
            &ShopifyStorefrontConfig::unconfigured(),
            Duration::from_secs(300),
        );
        assert!(matches!(result, Err(ShopifyError::NotConfigured)));

        let placeholder = ShopifyStorefrontConfig::new(
            "your-store.myshopify.com",
            "your-storefront-access-token-here",
        );
        assert!(matches!(
            StorefrontClient::new(&placeholder, Duration::from_secs(300)),
            Err(ShopifyError::NotConfigured)
        ));
    }

    #[test]
    fn test_new_with_credentials() {
        let config = ShopifyStorefrontConfig::new("forgotten-essentials.myshopify.com", "abc123");
        let client = StorefrontClient::new(&config, Duration::from_secs(300)).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("forgotten-essentials.myshopify.com/api/2024-01/graphql.json"));
        assert!(!debug.contains("abc123"));
    }

    #[test]
    fn test_page_size_clamps() {
        assert_eq!(page_size(50), 50);
        assert_eq!(page_size(10_000), 250);
    }

    #[test]
    fn test_convert_graphql_error_path() {
        let error: graphql_client::Error = serde_json::from_value(serde_json::json!({
            "message": "Field 'metafields' doesn't exist",
            "locations": [{"line": 4, "column": 7}],
            "path": ["product", "metafields", 0]
        }))
        .unwrap();

        let converted = convert_graphql_error(error);
        assert_eq!(converted.locations[0].line, 4);
        assert_eq!(converted.path.len(), 3);
        assert_eq!(converted.path[2], serde_json::json!(0));
    }
}
