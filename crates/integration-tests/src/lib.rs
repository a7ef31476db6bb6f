//! Integration tests for the Forgotten Essentials storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p forgotten-essentials-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `search` - relevance search properties and the debounced quick search
//! - `cart` - local-first cart behaviour against scripted backends
//! - `catalog` - preview catalog, content fallbacks and session context
//! - `persistence` - state surviving a restart through the file store
//!
//! Nothing here talks to a real Shopify store; remote behaviour is driven by
//! the backends in this module.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use forgotten_essentials_core::CartId;
use forgotten_essentials_storefront::cart::CartBackend;
use forgotten_essentials_storefront::shopify::{CartLineInput, RemoteCart, ShopifyError};

/// Backend whose every call fails as if the network were down.
#[derive(Debug, Clone, Default)]
pub struct FailingBackend {
    calls: Arc<AtomicUsize>,
}

impl FailingBackend {
    /// Number of remote calls attempted so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> Result<RemoteCart, ShopifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ShopifyError::RateLimited(2))
    }
}

impl CartBackend for FailingBackend {
    async fn create_cart(&self, _lines: Vec<CartLineInput>) -> Result<RemoteCart, ShopifyError> {
        self.fail()
    }

    async fn add_cart_lines(
        &self,
        _cart_id: &CartId,
        _lines: Vec<CartLineInput>,
    ) -> Result<RemoteCart, ShopifyError> {
        self.fail()
    }
}

/// Backend that accepts everything into one remote cart.
#[derive(Debug, Clone, Default)]
pub struct AcceptingBackend {
    creates: Arc<AtomicUsize>,
    adds: Arc<AtomicUsize>,
}

impl AcceptingBackend {
    /// Id of the remote cart this backend hands out.
    pub const CART_ID: &str = "gid://shopify/Cart/c1-abc";

    #[must_use]
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn adds(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
    }

    fn cart() -> RemoteCart {
        RemoteCart {
            id: CartId::new(Self::CART_ID),
            checkout_url: Some("https://forgotten-essentials.myshopify.com/cart/c/c1-abc".to_string()),
        }
    }
}

impl CartBackend for AcceptingBackend {
    async fn create_cart(&self, _lines: Vec<CartLineInput>) -> Result<RemoteCart, ShopifyError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(Self::cart())
    }

    async fn add_cart_lines(
        &self,
        _cart_id: &CartId,
        _lines: Vec<CartLineInput>,
    ) -> Result<RemoteCart, ShopifyError> {
        self.adds.fetch_add(1, Ordering::SeqCst);
        Ok(Self::cart())
    }
}
