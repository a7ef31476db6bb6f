//! Remote cart mutations used by the sync worker.

use std::future::Future;

use forgotten_essentials_core::CartId;

use crate::shopify::{CartLineInput, RemoteCart, ShopifyError, StorefrontClient};

/// The remote cart operations the sync worker needs.
pub trait CartBackend: Send + Sync + 'static {
    /// Create a remote cart holding `lines`.
    fn create_cart(
        &self,
        lines: Vec<CartLineInput>,
    ) -> impl Future<Output = Result<RemoteCart, ShopifyError>> + Send;

    /// Add `lines` to an existing remote cart.
    fn add_cart_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> impl Future<Output = Result<RemoteCart, ShopifyError>> + Send;
}

impl CartBackend for StorefrontClient {
    async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<RemoteCart, ShopifyError> {
        Self::create_cart(self, lines).await
    }

    async fn add_cart_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<RemoteCart, ShopifyError> {
        Self::add_cart_lines(self, cart_id, lines).await
    }
}

/// Backend for sessions without a store; every call fails with
/// [`ShopifyError::NotConfigured`] and the cart stays local.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledBackend;

impl CartBackend for DisabledBackend {
    async fn create_cart(&self, _lines: Vec<CartLineInput>) -> Result<RemoteCart, ShopifyError> {
        Err(ShopifyError::NotConfigured)
    }

    async fn add_cart_lines(
        &self,
        _cart_id: &CartId,
        _lines: Vec<CartLineInput>,
    ) -> Result<RemoteCart, ShopifyError> {
        Err(ShopifyError::NotConfigured)
    }
}
