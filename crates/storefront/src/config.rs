//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Shopify (optional - fixture data is used when absent)
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_ACCESS_TOKEN` - Storefront API public access token
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-01)
//!
//! ## Storefront tuning
//! - `STOREFRONT_PRODUCT_LIMIT` - Default product page size (default: 50)
//! - `STOREFRONT_COLLECTION_LIMIT` - Default collection page size (default: 10)
//! - `STOREFRONT_SEARCH_DEBOUNCE_MS` - Search debounce delay (default: 300)
//! - `STOREFRONT_SEARCH_RESULT_LIMIT` - Quick search result count (default: 6)
//! - `STOREFRONT_CACHE_TTL_SECS` - Catalog cache lifetime (default: 300)
//! - `STOREFRONT_STATE_PATH` - JSON file for persisted local state (default: in-memory)
//!
//! ## Error tracking
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Store domain shipped in the sample `.env`; never a real store.
const PLACEHOLDER_STORE_DOMAIN: &str = "your-store.myshopify.com";
/// Access token shipped in the sample `.env`; never a real token.
const PLACEHOLDER_ACCESS_TOKEN: &str = "your-storefront-access-token-here";

const DEFAULT_API_VERSION: &str = "2024-01";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where catalog and content data comes from.
///
/// Decided once at startup; nothing downstream re-checks credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMode {
    /// Live Shopify Storefront API.
    Remote,
    /// Built-in fixture catalog (preview mode).
    Fixtures,
    /// Preview mode with mock data switched off: every list is empty.
    Disabled,
}

/// Storefront library configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Default product page size
    pub product_limit: usize,
    /// Default collection page size
    pub collection_limit: usize,
    /// Quiet period before a typed query is searched
    pub search_debounce: Duration,
    /// Number of results shown by the quick search panel
    pub search_result_limit: usize,
    /// Catalog response cache lifetime
    pub cache_ttl: Duration,
    /// File backing persisted local state (in-memory when `None`)
    pub state_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store_domain: Option<String>,
    /// Shopify API version (e.g., 2024-01)
    pub api_version: String,
    /// Storefront API access token
    pub access_token: Option<SecretString>,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store_domain", &self.store_domain)
            .field("api_version", &self.api_version)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            shopify: ShopifyStorefrontConfig::unconfigured(),
            product_limit: 50,
            collection_limit: 10,
            search_debounce: Duration::from_millis(300),
            search_result_limit: 6,
            cache_ttl: Duration::from_secs(300),
            state_path: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let shopify = ShopifyStorefrontConfig {
            store_domain: get("SHOPIFY_STORE_DOMAIN"),
            api_version: get("SHOPIFY_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            access_token: get("SHOPIFY_STOREFRONT_ACCESS_TOKEN").map(SecretString::from),
        };

        Ok(Self {
            shopify,
            product_limit: parse_or(
                get("STOREFRONT_PRODUCT_LIMIT"),
                "STOREFRONT_PRODUCT_LIMIT",
                defaults.product_limit,
            )?,
            collection_limit: parse_or(
                get("STOREFRONT_COLLECTION_LIMIT"),
                "STOREFRONT_COLLECTION_LIMIT",
                defaults.collection_limit,
            )?,
            search_debounce: Duration::from_millis(parse_or(
                get("STOREFRONT_SEARCH_DEBOUNCE_MS"),
                "STOREFRONT_SEARCH_DEBOUNCE_MS",
                300,
            )?),
            search_result_limit: parse_or(
                get("STOREFRONT_SEARCH_RESULT_LIMIT"),
                "STOREFRONT_SEARCH_RESULT_LIMIT",
                defaults.search_result_limit,
            )?,
            cache_ttl: Duration::from_secs(parse_or(
                get("STOREFRONT_CACHE_TTL_SECS"),
                "STOREFRONT_CACHE_TTL_SECS",
                300,
            )?),
            state_path: get("STOREFRONT_STATE_PATH").map(PathBuf::from),
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Decide where catalog data comes from.
    ///
    /// Real credentials always win. Without them the persisted mock-data
    /// toggle decides, defaulting to fixtures when the toggle was never set.
    #[must_use]
    pub fn catalog_mode(&self, show_mock_data: Option<bool>) -> CatalogMode {
        if self.shopify.has_valid_credentials() {
            CatalogMode::Remote
        } else if show_mock_data.unwrap_or(true) {
            CatalogMode::Fixtures
        } else {
            CatalogMode::Disabled
        }
    }
}

impl ShopifyStorefrontConfig {
    /// Configuration with no store attached.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            store_domain: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: None,
        }
    }

    /// Configuration for a specific store.
    #[must_use]
    pub fn new(store_domain: &str, access_token: &str) -> Self {
        Self {
            store_domain: Some(store_domain.to_string()),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: Some(SecretString::from(access_token.to_string())),
        }
    }

    /// Whether both domain and token are set and neither is the sample
    /// placeholder.
    #[must_use]
    pub fn has_valid_credentials(&self) -> bool {
        match (&self.store_domain, &self.access_token) {
            (Some(domain), Some(token)) => {
                domain != PLACEHOLDER_STORE_DOMAIN
                    && token.expose_secret() != PLACEHOLDER_ACCESS_TOKEN
            }
            _ => false,
        }
    }

    /// GraphQL endpoint for the configured store.
    ///
    /// `None` when no domain is set or the domain does not form a valid URL.
    #[must_use]
    pub fn endpoint(&self) -> Option<Url> {
        let domain = self.store_domain.as_ref()?;
        Url::parse(&format!(
            "https://{domain}/api/{}/graphql.json",
            self.api_version
        ))
        .ok()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to a default when unset.
fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |v| {
        v.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.product_limit, 50);
        assert_eq!(config.collection_limit, 10);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.search_result_limit, 6);
        assert_eq!(config.shopify.api_version, "2024-01");
        assert!(config.state_path.is_none());
    }

    #[test]
    fn test_invalid_number_is_error() {
        let result = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_PRODUCT_LIMIT", "lots")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_PRODUCT_LIMIT"));
    }

    #[test]
    fn test_remote_mode_with_real_credentials() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("SHOPIFY_STORE_DOMAIN", "forgotten-essentials.myshopify.com"),
            ("SHOPIFY_STOREFRONT_ACCESS_TOKEN", "3f9c1e0b7a"),
        ]))
        .unwrap();
        assert_eq!(config.catalog_mode(Some(true)), CatalogMode::Remote);
        assert_eq!(config.catalog_mode(Some(false)), CatalogMode::Remote);
    }

    #[test]
    fn test_placeholder_credentials_fall_back_to_fixtures() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("SHOPIFY_STORE_DOMAIN", "your-store.myshopify.com"),
            ("SHOPIFY_STOREFRONT_ACCESS_TOKEN", "3f9c1e0b7a"),
        ]))
        .unwrap();
        assert!(!config.shopify.has_valid_credentials());
        assert_eq!(config.catalog_mode(None), CatalogMode::Fixtures);
    }

    #[test]
    fn test_placeholder_token_is_invalid() {
        let shopify = ShopifyStorefrontConfig::new(
            "forgotten-essentials.myshopify.com",
            "your-storefront-access-token-here",
        );
        assert!(!shopify.has_valid_credentials());
    }

    #[test]
    fn test_mock_toggle_off_disables_catalog() {
        let config = StorefrontConfig::default();
        assert_eq!(config.catalog_mode(Some(false)), CatalogMode::Disabled);
        assert_eq!(config.catalog_mode(Some(true)), CatalogMode::Fixtures);
    }

    #[test]
    fn test_endpoint() {
        let shopify = ShopifyStorefrontConfig::new("shop.myshopify.com", "token");
        assert_eq!(
            shopify.endpoint().as_ref().map(Url::as_str),
            Some("https://shop.myshopify.com/api/2024-01/graphql.json")
        );
        assert!(ShopifyStorefrontConfig::unconfigured().endpoint().is_none());
        assert!(
            ShopifyStorefrontConfig::new("not a domain", "token")
                .endpoint()
                .is_none()
        );
    }

    #[test]
    fn test_shopify_config_debug_redacts_token() {
        let config = ShopifyStorefrontConfig::new("test.myshopify.com", "super_secret_token");
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("test.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
