//! Local-first shopping cart.
//!
//! [`CartSession`] owns the cart lines the shopper sees and updates them
//! synchronously. Adding a product also queues a sync intent; a background
//! [`CartSyncWorker`] mirrors it to the remote Shopify cart and records the
//! cart id and checkout URL when the call succeeds.
//!
//! Remote failures never touch local lines. A failed sync forgets the remote
//! cart, and the next add creates a fresh one.
//!
//! Only adds are mirrored. Removing a line or changing a quantity updates the
//! local cart alone, so the remote cart can hold more than the shopper sees
//! until checkout.

mod backend;
mod worker;

use std::sync::Arc;

use forgotten_essentials_core::{CartId, CartLine, CartLines, Price, Product, ProductId, VariantId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

pub use backend::{CartBackend, DisabledBackend};
pub use worker::{CartSyncWorker, RemoteCartState, SharedRemoteCart, SyncIntent};

use crate::error::add_breadcrumb;
use crate::store::{KeyValueStore, keys};

/// How far the remote cart has caught up with the local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No lines and no remote cart.
    Uninitialized,
    /// Lines exist but no remote cart is known yet.
    LocalOnly,
    /// A remote cart id is known.
    Synced,
}

/// A shopper's cart for one session.
pub struct CartSession {
    lines: CartLines,
    is_open: bool,
    remote: SharedRemoteCart,
    store: Arc<dyn KeyValueStore>,
    intents: mpsc::UnboundedSender<SyncIntent>,
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("lines", &self.lines.len())
            .field("is_open", &self.is_open)
            .field("status", &self.sync_status())
            .finish_non_exhaustive()
    }
}

impl CartSession {
    /// Start a session and its sync worker.
    ///
    /// A cart id persisted by an earlier session is recovered. Must be called
    /// from within a tokio runtime.
    pub fn open<B: CartBackend>(backend: B, store: Arc<dyn KeyValueStore>) -> Self {
        let cart_id = store
            .get(keys::CART_ID)
            .filter(|id| !id.trim().is_empty())
            .map(CartId::new);

        if let Some(id) = &cart_id {
            info!(cart_id = %id, "Recovered remote cart");
        }

        let remote: SharedRemoteCart = Arc::new(std::sync::Mutex::new(RemoteCartState {
            cart_id,
            ..RemoteCartState::default()
        }));
        let intents = CartSyncWorker::spawn(backend, Arc::clone(&remote), Arc::clone(&store));

        Self {
            lines: CartLines::new(),
            is_open: false,
            remote,
            store,
            intents,
        }
    }

    /// Add one unit of a product and open the cart.
    ///
    /// Returns the line's new quantity. The remote cart is updated in the
    /// background.
    pub fn add_to_cart(&mut self, product: Product) -> u32 {
        let merchandise_id = VariantId::from_product_id(&product.id);
        let product_id = product.id.clone();
        let quantity = self.lines.upsert(product);
        self.is_open = true;

        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.as_str())]),
        );

        let epoch = worker::lock(&self.remote).epoch;
        let intent = SyncIntent::AddLine {
            epoch,
            merchandise_id,
            quantity: 1,
        };
        if self.intents.send(intent).is_err() {
            warn!("Cart sync worker stopped, change kept locally");
        }

        quantity
    }

    /// Remove a product's line. Local only.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> bool {
        let removed = self.lines.remove(product_id).is_some();
        if removed {
            add_breadcrumb(
                "cart",
                "Removed from cart",
                Some(&[("product_id", product_id.as_str())]),
            );
        }
        removed
    }

    /// Overwrite a line's quantity; zero or less removes it. Local only.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        self.lines.set_quantity(product_id, quantity)
    }

    /// Empty the cart and forget the remote cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();

        let mut state = worker::lock(&self.remote);
        state.epoch += 1;
        state.cart_id = None;
        state.checkout_url = None;
        if let Err(e) = self.store.remove(keys::CART_ID) {
            warn!(error = %e, "Failed to remove persisted cart id");
        }
        drop(state);

        debug!("Cart cleared");
        add_breadcrumb("cart", "Cleared cart", None);
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    #[must_use]
    pub const fn cart_lines(&self) -> &CartLines {
        &self.lines
    }

    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.total_items()
    }

    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.total_price()
    }

    #[must_use]
    pub fn sync_status(&self) -> SyncStatus {
        if worker::lock(&self.remote).cart_id.is_some() {
            SyncStatus::Synced
        } else if self.lines.is_empty() {
            SyncStatus::Uninitialized
        } else {
            SyncStatus::LocalOnly
        }
    }

    /// Checkout URL from the last successful sync.
    #[must_use]
    pub fn checkout_url(&self) -> Option<String> {
        worker::lock(&self.remote).checkout_url.clone()
    }

    #[must_use]
    pub fn cart_id(&self) -> Option<CartId> {
        worker::lock(&self.remote).cart_id.clone()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Wait until every change made so far has been synced or given up on.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.intents.send(SyncIntent::Flush(ack)).is_err() {
            return;
        }
        // A dropped ack means the worker has already stopped.
        let _ = done.await;
    }
}
