//! Background cart synchronization.
//!
//! One worker task per cart session drains the intent queue in order, so two
//! quick adds can never both see "no cart yet" and create two remote carts.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use forgotten_essentials_core::{CartId, VariantId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use super::backend::CartBackend;
use crate::shopify::{CartLineInput, RemoteCart, ShopifyError};
use crate::store::{KeyValueStore, keys};

/// Work queued by a cart session for the sync worker.
#[derive(Debug)]
pub enum SyncIntent {
    /// Mirror an added line to the remote cart.
    AddLine {
        /// Cart generation the line was added in.
        epoch: u64,
        merchandise_id: VariantId,
        quantity: u32,
    },
    /// Acknowledge once every earlier intent has been processed.
    Flush(oneshot::Sender<()>),
}

/// Remote cart fields shared between a session and its worker.
#[derive(Debug, Default)]
pub struct RemoteCartState {
    pub cart_id: Option<CartId>,
    pub checkout_url: Option<String>,
    /// Bumped by every clear; results for older epochs are dropped.
    pub epoch: u64,
}

/// Shared handle to [`RemoteCartState`].
pub type SharedRemoteCart = Arc<Mutex<RemoteCartState>>;

/// Lock the shared state, recovering from a poisoned lock.
pub fn lock(remote: &SharedRemoteCart) -> MutexGuard<'_, RemoteCartState> {
    remote.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Processes [`SyncIntent`]s one at a time.
pub struct CartSyncWorker<B> {
    backend: B,
    remote: SharedRemoteCart,
    store: Arc<dyn KeyValueStore>,
}

impl<B: CartBackend> CartSyncWorker<B> {
    /// Spawn a worker on the current tokio runtime and return its queue.
    ///
    /// The worker stops once every sender has been dropped.
    pub fn spawn(
        backend: B,
        remote: SharedRemoteCart,
        store: Arc<dyn KeyValueStore>,
    ) -> mpsc::UnboundedSender<SyncIntent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = Self {
            backend,
            remote,
            store,
        };

        tokio::spawn(worker.run(rx));
        tx
    }

    async fn run(self, mut intents: mpsc::UnboundedReceiver<SyncIntent>) {
        while let Some(intent) = intents.recv().await {
            match intent {
                SyncIntent::AddLine {
                    epoch,
                    merchandise_id,
                    quantity,
                } => self.add_line(epoch, merchandise_id, quantity).await,
                SyncIntent::Flush(ack) => {
                    // The session may have stopped waiting.
                    let _ = ack.send(());
                }
            }
        }
        debug!("Cart sync worker stopped");
    }

    #[instrument(skip(self))]
    async fn add_line(&self, epoch: u64, merchandise_id: VariantId, quantity: u32) {
        let cart_id = {
            let state = lock(&self.remote);
            if state.epoch != epoch {
                debug!("Skipping line added before the cart was cleared");
                return;
            }
            state.cart_id.clone()
        };

        let line = CartLineInput {
            merchandise_id: merchandise_id.into_inner(),
            quantity,
        };

        let result = match cart_id {
            None => self.backend.create_cart(vec![line]).await,
            Some(cart_id) => match self.backend.add_cart_lines(&cart_id, vec![line.clone()]).await {
                Ok(cart) => Ok(cart),
                Err(e) => {
                    warn!(error = %e, cart_id = %cart_id, "Failed to add to remote cart, creating a new one");
                    self.forget(epoch);
                    self.backend.create_cart(vec![line]).await
                }
            },
        };

        self.apply(epoch, result);
    }

    fn apply(&self, epoch: u64, result: Result<RemoteCart, ShopifyError>) {
        let mut state = lock(&self.remote);
        if state.epoch != epoch {
            debug!("Discarding cart sync result for a cleared cart");
            return;
        }

        // Store writes happen under the lock so a clear cannot interleave.
        match result {
            Ok(cart) => {
                info!(cart_id = %cart.id, "Remote cart synced");
                if let Err(e) = self.store.set(keys::CART_ID, cart.id.as_str()) {
                    warn!(error = %e, "Failed to persist cart id");
                }
                state.cart_id = Some(cart.id);
                state.checkout_url = cart.checkout_url;
            }
            Err(e) => {
                if matches!(e, ShopifyError::NotConfigured) {
                    debug!("No remote store, cart stays local");
                } else {
                    warn!(error = %e, "Remote cart sync failed, cart stays local");
                }
                state.cart_id = None;
                state.checkout_url = None;
                if let Err(e) = self.store.remove(keys::CART_ID) {
                    warn!(error = %e, "Failed to remove persisted cart id");
                }
            }
        }
    }

    fn forget(&self, epoch: u64) {
        let mut state = lock(&self.remote);
        if state.epoch == epoch {
            state.cart_id = None;
            state.checkout_url = None;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::store::MemoryStore;

    /// Scripted backend recording every call.
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        pub calls: Arc<Mutex<Vec<String>>>,
        creates: Arc<Mutex<VecDeque<Result<RemoteCart, ShopifyError>>>>,
        adds: Arc<Mutex<VecDeque<Result<RemoteCart, ShopifyError>>>>,
    }

    impl FakeBackend {
        pub fn create_ok(self, id: &str) -> Self {
            self.creates.lock().unwrap().push_back(Ok(remote(id)));
            self
        }

        pub fn create_err(self) -> Self {
            self.creates
                .lock()
                .unwrap()
                .push_back(Err(ShopifyError::CartRejected("Merchandise is sold out".to_string())));
            self
        }

        pub fn add_ok(self, id: &str) -> Self {
            self.adds.lock().unwrap().push_back(Ok(remote(id)));
            self
        }

        pub fn add_err(self) -> Self {
            self.adds
                .lock()
                .unwrap()
                .push_back(Err(ShopifyError::EmptyCartPayload("add cart lines".to_string())));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    pub fn remote(id: &str) -> RemoteCart {
        RemoteCart {
            id: CartId::new(id),
            checkout_url: Some(format!("https://checkout.example/{id}")),
        }
    }

    impl CartBackend for FakeBackend {
        async fn create_cart(
            &self,
            lines: Vec<CartLineInput>,
        ) -> Result<RemoteCart, ShopifyError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("create {}", lines[0].merchandise_id));
            self.creates
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ShopifyError::NotConfigured))
        }

        async fn add_cart_lines(
            &self,
            cart_id: &CartId,
            lines: Vec<CartLineInput>,
        ) -> Result<RemoteCart, ShopifyError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("add {cart_id} {}", lines[0].merchandise_id));
            self.adds
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ShopifyError::NotConfigured))
        }
    }

    async fn flush(tx: &mpsc::UnboundedSender<SyncIntent>) {
        let (ack, done) = oneshot::channel();
        tx.send(SyncIntent::Flush(ack)).unwrap();
        done.await.unwrap();
    }

    fn add(epoch: u64, id: &str) -> SyncIntent {
        SyncIntent::AddLine {
            epoch,
            merchandise_id: VariantId::new(id),
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn test_intents_are_processed_in_order() {
        let backend = FakeBackend::default().create_ok("cart-1").add_ok("cart-1");
        let remote = SharedRemoteCart::default();
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let tx = CartSyncWorker::spawn(backend.clone(), Arc::clone(&remote), Arc::clone(&store));

        tx.send(add(0, "v1")).unwrap();
        tx.send(add(0, "v2")).unwrap();
        flush(&tx).await;

        assert_eq!(backend.calls(), vec!["create v1", "add cart-1 v2"]);
        assert_eq!(lock(&remote).cart_id, Some(CartId::new("cart-1")));
        assert_eq!(store.get(keys::CART_ID).as_deref(), Some("cart-1"));
    }

    #[tokio::test]
    async fn test_failed_add_recreates_cart() {
        let backend = FakeBackend::default().add_err().create_ok("cart-2");
        let remote = Arc::new(Mutex::new(RemoteCartState {
            cart_id: Some(CartId::new("expired")),
            ..RemoteCartState::default()
        }));
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let tx = CartSyncWorker::spawn(backend.clone(), Arc::clone(&remote), Arc::clone(&store));

        tx.send(add(0, "v1")).unwrap();
        flush(&tx).await;

        assert_eq!(backend.calls(), vec!["add expired v1", "create v1"]);
        let state = lock(&remote);
        assert_eq!(state.cart_id, Some(CartId::new("cart-2")));
        assert_eq!(
            state.checkout_url.as_deref(),
            Some("https://checkout.example/cart-2")
        );
    }

    #[tokio::test]
    async fn test_failed_create_clears_persisted_id() {
        let backend = FakeBackend::default().create_err();
        let remote = SharedRemoteCart::default();
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(keys::CART_ID, "stale").unwrap();
        let tx = CartSyncWorker::spawn(backend, Arc::clone(&remote), Arc::clone(&store));

        tx.send(add(0, "v1")).unwrap();
        flush(&tx).await;

        assert!(lock(&remote).cart_id.is_none());
        assert!(store.get(keys::CART_ID).is_none());
    }

    #[tokio::test]
    async fn test_stale_epoch_is_skipped() {
        let backend = FakeBackend::default().create_ok("cart-1");
        let remote = Arc::new(Mutex::new(RemoteCartState {
            epoch: 1,
            ..RemoteCartState::default()
        }));
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let tx = CartSyncWorker::spawn(backend.clone(), Arc::clone(&remote), store);

        tx.send(add(0, "v1")).unwrap();
        flush(&tx).await;

        assert!(backend.calls().is_empty());
        assert!(lock(&remote).cart_id.is_none());
    }
}
