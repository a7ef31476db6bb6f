//! Session context shared by the storefront views.

use std::sync::Arc;

use forgotten_essentials_core::Product;
use tracing::info;

use crate::auth::AuthSession;
use crate::cart::{CartSession, DisabledBackend};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::content::SiteContent;
use crate::error::{Result, StorefrontError};
use crate::search::SearchDebouncer;
use crate::store::{FileStore, KeyValueStore, MemoryStore, set_show_mock_data, show_mock_data};
use crate::wishlist::Wishlist;

/// Everything a storefront session needs, built once at startup.
///
/// This struct is cheaply cloneable via `Arc`. The catalog source is chosen
/// here and never re-checked by callers.
#[derive(Clone)]
pub struct StorefrontContext {
    inner: Arc<StorefrontContextInner>,
}

struct StorefrontContextInner {
    config: StorefrontConfig,
    store: Arc<dyn KeyValueStore>,
    catalog: Catalog,
    content: SiteContent,
}

impl std::fmt::Debug for StorefrontContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontContext")
            .field("catalog", &self.inner.catalog.mode())
            .finish_non_exhaustive()
    }
}

impl StorefrontContext {
    /// Create a context over an existing store.
    ///
    /// The persisted mock-data toggle is read once here.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let catalog = Catalog::from_config(&config, show_mock_data(store.as_ref()));
        let content = SiteContent::for_catalog(&catalog);
        info!(mode = ?catalog.mode(), "Storefront context ready");

        Self {
            inner: Arc::new(StorefrontContextInner {
                config,
                store,
                catalog,
                content,
            }),
        }
    }

    /// Create a context whose state lives in `config.state_path`, or in
    /// memory when no path is set.
    #[must_use]
    pub fn from_config(config: StorefrontConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match &config.state_path {
            Some(path) => Arc::new(FileStore::open(path)),
            None => Arc::new(MemoryStore::new()),
        };
        Self::new(config, store)
    }

    /// Load configuration from the environment (and `.env`) and build the
    /// context.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Config` if a variable is malformed.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(StorefrontConfig::from_env()?))
    }

    /// Like [`StorefrontContext::from_env`], reading variables through
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Config` if a variable is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self::from_config(StorefrontConfig::from_lookup(lookup)?))
    }

    /// Persist the preview-mode mock data toggle. Takes effect on the next
    /// context built over the same store.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Store` if the toggle cannot be written. The
    /// failure is reported to Sentry before it is returned.
    pub fn set_show_mock_data(&self, show: bool) -> Result<()> {
        set_show_mock_data(self.inner.store.as_ref(), show).map_err(|e| {
            let err = StorefrontError::from(e);
            err.capture();
            err
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.store
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn content(&self) -> &SiteContent {
        &self.inner.content
    }

    /// Start a cart session with its sync worker.
    ///
    /// Carts only sync when the catalog is remote. Must be called from
    /// within a tokio runtime.
    #[must_use]
    pub fn open_cart(&self) -> CartSession {
        let store = Arc::clone(&self.inner.store);
        match self.inner.catalog.client() {
            Some(client) => CartSession::open(client.clone(), store),
            None => CartSession::open(DisabledBackend, store),
        }
    }

    /// Restore the signed-in account.
    #[must_use]
    pub fn auth(&self) -> AuthSession {
        AuthSession::load(Arc::clone(&self.inner.store))
    }

    /// Start a debounced search over `products`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn search_debouncer(&self, products: Vec<Product>) -> SearchDebouncer {
        SearchDebouncer::spawn(
            products,
            self.inner.config.search_debounce,
            self.inner.config.search_result_limit,
        )
    }

    #[must_use]
    pub fn wishlist(&self) -> Wishlist {
        Wishlist::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;
    use crate::config::CatalogMode;
    use crate::store::keys;

    #[tokio::test]
    async fn test_preview_context_uses_fixtures() {
        let ctx = StorefrontContext::from_config(StorefrontConfig::default());
        assert_eq!(ctx.catalog().mode(), CatalogMode::Fixtures);
        assert_eq!(ctx.catalog().products(50).await.len(), 8);
        assert_eq!(ctx.content().hero().await.title, "Shop by Style");
    }

    #[tokio::test]
    async fn test_mock_data_toggle_disables_catalog() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(keys::SHOW_MOCK_DATA, "false").unwrap();

        let ctx = StorefrontContext::new(StorefrontConfig::default(), store);
        assert_eq!(ctx.catalog().mode(), CatalogMode::Disabled);
        assert!(ctx.catalog().products(50).await.is_empty());
    }

    #[tokio::test]
    async fn test_from_lookup_reports_bad_config() {
        let result = StorefrontContext::from_lookup(|key| {
            (key == "STOREFRONT_PRODUCT_LIMIT").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(StorefrontError::Config(_))));

        let ctx = StorefrontContext::from_lookup(|_| None).unwrap();
        assert_eq!(ctx.catalog().mode(), CatalogMode::Fixtures);
    }

    #[tokio::test]
    async fn test_mock_data_toggle_applies_to_next_context() {
        let ctx = StorefrontContext::from_config(StorefrontConfig::default());
        ctx.set_show_mock_data(false).unwrap();
        assert_eq!(ctx.catalog().mode(), CatalogMode::Fixtures);

        let next = StorefrontContext::new(StorefrontConfig::default(), Arc::clone(ctx.store()));
        assert_eq!(next.catalog().mode(), CatalogMode::Disabled);
    }

    #[tokio::test]
    async fn test_sessions_share_the_store() {
        let ctx = StorefrontContext::from_config(StorefrontConfig::default());
        let mut auth = ctx.auth();
        auth.login("kim@example.com", "pw").unwrap();

        assert!(ctx.auth().is_authenticated());

        let mut cart = ctx.open_cart();
        let product = ctx.catalog().products(1).await.remove(0);
        cart.add_to_cart(product);
        cart.flush().await;
        assert_eq!(cart.total_items(), 1);
        assert!(ctx.store().get(keys::CART_ID).is_none());
    }
}
