//! Provider scope and shared handle for the cart store.
//!
//! The cart surface is only reachable through an active [`CartProvider`]:
//! consumers hold a [`CartHandle`] and every access checks that the provider
//! is still mounted, failing with [`CartError::OutsideProvider`] otherwise.
//! The provider also owns the identity subscription: transitions from the
//! identity provider are applied through the same lock as mutations, so the
//! identity protocol always completes before the next operation observes
//! state.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use duka_core::{Price, ProductId, UserId};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::error::CartError;
use crate::feedback::{CueEmitter, NotificationSink};
use crate::item::{CartItem, NewCartItem};
use crate::storage::CartStorage;
use crate::store::CartStore;

/// Owns a [`CartStore`] for the lifetime of a scope.
///
/// Mount at application start (or per test), hand out handles via
/// [`Self::cart`], and unmount (or drop) to tear the scope down. Handles
/// outlive the provider only in the degenerate sense that every access after
/// unmount returns [`CartError::OutsideProvider`].
#[derive(Debug)]
pub struct CartProvider {
    store: Option<Arc<Mutex<CartStore>>>,
}

impl CartProvider {
    /// Mount a provider scope and run the identity protocol for the initial
    /// identity, loading the matching persisted cart.
    pub fn mount(
        storage: Box<dyn CartStorage>,
        notifications: Arc<dyn NotificationSink>,
        cues: Arc<dyn CueEmitter>,
        initial_identity: Option<UserId>,
    ) -> Self {
        let mut store = CartStore::new(storage, notifications, cues);
        store.identity_changed(initial_identity);
        Self {
            store: Some(Arc::new(Mutex::new(store))),
        }
    }

    /// Get a handle to the cart surface.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn cart(&self) -> Result<CartHandle, CartError> {
        self.store
            .as_ref()
            .map(|store| CartHandle {
                store: Arc::downgrade(store),
            })
            .ok_or(CartError::OutsideProvider)
    }

    /// Tear down the scope. Subsequent handle accesses fail.
    pub fn unmount(&mut self) {
        if self.store.take().is_some() {
            debug!("cart provider unmounted");
        }
    }
}

/// Cloneable handle to the cart owned by a [`CartProvider`].
///
/// Each method locks the store for the duration of one operation, so
/// mutations and identity transitions serialize and every read-modify-write
/// runs against the latest state.
#[derive(Debug, Clone)]
pub struct CartHandle {
    store: Weak<Mutex<CartStore>>,
}

impl CartHandle {
    fn with<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> Result<R, CartError> {
        let store = self.store.upgrade().ok_or(CartError::OutsideProvider)?;
        let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut guard))
    }

    /// Snapshot of the current items, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn items(&self) -> Result<Vec<CartItem>, CartError> {
        self.with(|store| store.items().to_vec())
    }

    /// Total unit count across all items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn total_items(&self) -> Result<u32, CartError> {
        self.with(|store| store.total_items())
    }

    /// Total price across all items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn total_price(&self) -> Result<Price, CartError> {
        self.with(|store| store.total_price())
    }

    /// Add one unit of a product. See [`CartStore::add_to_cart`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn add_to_cart(&self, item: NewCartItem) -> Result<(), CartError> {
        self.with(|store| store.add_to_cart(item))
    }

    /// Remove a product entirely. See [`CartStore::remove_from_cart`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn remove_from_cart(&self, id: &ProductId) -> Result<(), CartError> {
        self.with(|store| store.remove_from_cart(id))
    }

    /// Set a product's quantity. See [`CartStore::update_quantity`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn update_quantity(&self, id: &ProductId, quantity: i64) -> Result<(), CartError> {
        self.with(|store| store.update_quantity(id, quantity))
    }

    /// Empty the cart. See [`CartStore::clear_cart`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn clear_cart(&self) -> Result<(), CartError> {
        self.with(CartStore::clear_cart)
    }

    /// Apply a single identity transition synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider was unmounted.
    pub fn identity_changed(&self, identity: Option<UserId>) -> Result<(), CartError> {
        self.with(|store| store.identity_changed(identity))
    }

    /// Drain identity transitions from the identity provider until its
    /// channel closes or the provider scope is unmounted.
    ///
    /// Spawn this on the runtime next to the identity provider:
    ///
    /// ```rust,ignore
    /// let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    /// tokio::spawn(provider.cart()?.watch_identity(rx));
    /// tx.send(Some(UserId::new("user42")))?;
    /// ```
    ///
    /// Every transition is delivered individually (the channel is unbounded,
    /// nothing coalesces), so a sign-in followed by a quick sign-out still
    /// performs the one-shot anonymous-cart transfer.
    pub async fn watch_identity(self, mut transitions: UnboundedReceiver<Option<UserId>>) {
        while let Some(identity) = transitions.recv().await {
            if self.identity_changed(identity).is_err() {
                debug!("provider unmounted; stopping identity watch");
                break;
            }
        }
    }
}
