//! The cart store: in-memory state, identity-scoped persistence, and
//! mutation operations.
//!
//! State lives in memory and is written through to durable storage on every
//! mutation. Persistence is best-effort: a failed write is logged and the
//! in-memory state stays authoritative for the session. Feedback (toasts,
//! audio cues) is fire-and-forget and never affects the mutation itself.

use std::sync::Arc;

use duka_core::{Price, ProductId, UserId};
use tracing::{debug, instrument, warn};

use crate::feedback::{Cue, CueEmitter, NotificationSink, Severity};
use crate::item::{CartItem, NewCartItem};
use crate::storage::{ANONYMOUS_CART_KEY, CartStorage, cart_key};

/// Owns the cart for the currently-active identity.
///
/// All operations are synchronous read-modify-write against the latest state;
/// callers serialize access (see [`crate::provider::CartProvider`] for the
/// shared-handle wrapper), so rapid successive mutations never observe a
/// stale snapshot.
pub struct CartStore {
    storage: Box<dyn CartStorage>,
    notifications: Arc<dyn NotificationSink>,
    cues: Arc<dyn CueEmitter>,
    identity: Option<UserId>,
    items: Vec<CartItem>,
}

impl CartStore {
    /// Create a store with an empty cart and no identity.
    ///
    /// Callers should follow up with [`Self::identity_changed`] for the
    /// initial identity (including `None`) so the persisted cart for that
    /// identity is loaded; [`crate::provider::CartProvider::mount`] does this.
    pub fn new(
        storage: Box<dyn CartStorage>,
        notifications: Arc<dyn NotificationSink>,
        cues: Arc<dyn CueEmitter>,
    ) -> Self {
        Self {
            storage,
            notifications,
            cues,
            identity: None,
            items: Vec::new(),
        }
    }

    /// Current items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The identity the cart is currently scoped to.
    #[must_use]
    pub const fn identity(&self) -> Option<&UserId> {
        self.identity.as_ref()
    }

    /// Total unit count across all items, recomputed on every call.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Total price across all items, recomputed on every call.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// React to an identity transition (sign-in, sign-out, initial mount).
    ///
    /// Signing in loads the user's persisted cart if one exists; otherwise
    /// the anonymous cart, if any, is adopted wholesale as the user's cart
    /// and its record deleted - a one-shot transfer, never a line-item merge.
    /// Signing out switches back to the anonymous cart and leaves the user's
    /// record in storage for their next sign-in.
    #[instrument(skip_all, fields(identity = identity.as_ref().map(UserId::as_str)))]
    pub fn identity_changed(&mut self, identity: Option<UserId>) {
        self.identity = identity.clone();

        if let Some(user) = identity {
            let user_key = cart_key(Some(&user));
            if let Some(items) = self.load(&user_key) {
                self.items = items;
            } else if let Some(items) = self.load(ANONYMOUS_CART_KEY) {
                debug!(count = items.len(), "adopting anonymous cart on sign-in");
                self.items = items;
                if let Err(e) = self.storage.delete(ANONYMOUS_CART_KEY) {
                    warn!(error = %e, "failed to delete anonymous cart record after transfer");
                }
                // The transfer must survive a reload even if no mutation follows
                self.persist();
            } else {
                self.items = Vec::new();
            }
        } else {
            self.items = self.load(ANONYMOUS_CART_KEY).unwrap_or_default();
        }
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its quantity incremented; a new
    /// product is appended at the end with quantity 1. Both branches notify
    /// the user and trigger the add-to-cart cue. An empty product ID is
    /// rejected as a no-op.
    #[instrument(skip_all, fields(product = %item.id))]
    pub fn add_to_cart(&mut self, item: NewCartItem) {
        if item.id.as_str().is_empty() {
            warn!("ignoring add_to_cart with empty product id");
            return;
        }

        let signed_in = self.identity.is_some();

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            let name = existing.name.clone();
            let quantity = existing.quantity;
            self.persist();

            let body = if signed_in {
                format!("{name} quantity is now {quantity}")
            } else {
                format!("{name} added again. Sign in to keep your cart across devices.")
            };
            self.notifications.notify(Severity::Success, "Cart updated", &body);
        } else {
            let item = item.into_item();
            let name = item.name.clone();
            self.items.push(item);
            self.persist();

            let body = if signed_in {
                format!("{name} is in your cart")
            } else {
                format!("{name} is in your cart. Sign in to keep it across devices.")
            };
            self.notifications.notify(Severity::Success, "Added to cart", &body);
        }

        self.cues.emit(Cue::ItemAdded);
    }

    /// Remove a product entirely, whatever its quantity.
    ///
    /// Unknown IDs are a silent no-op: no state change, no notification.
    #[instrument(skip_all, fields(product = %id))]
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        let Some(index) = self.items.iter().position(|i| i.id == *id) else {
            return;
        };
        let removed = self.items.remove(index);
        self.persist();

        self.notifications.notify(
            Severity::Info,
            "Removed from cart",
            &format!("{} removed from your cart", removed.name),
        );
    }

    /// Set a product's quantity directly.
    ///
    /// A quantity of zero or less removes the item, with the same
    /// notification as [`Self::remove_from_cart`]. A direct set emits no
    /// notification of its own, distinguishing it from add/remove. Unknown
    /// IDs are a silent no-op. Values above `u32::MAX` are clamped.
    #[instrument(skip_all, fields(product = %id, quantity))]
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|i| i.id == *id) else {
            return;
        };
        item.quantity = u32::try_from(quantity).unwrap_or_else(|_| {
            warn!(quantity, "quantity exceeds supported maximum; clamping");
            u32::MAX
        });
        self.persist();
    }

    /// Empty the cart unconditionally.
    ///
    /// Notifies even when the cart was already empty.
    #[instrument(skip_all)]
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();

        self.notifications.notify(
            Severity::Info,
            "Cart cleared",
            "All items have been removed from your cart",
        );
    }

    /// Write the current items to the active identity's key, best-effort.
    fn persist(&mut self) {
        let key = cart_key(self.identity.as_ref());
        match serde_json::to_string(&self.items) {
            Ok(record) => {
                if let Err(e) = self.storage.put(&key, &record) {
                    warn!(key = %key, error = %e, "failed to persist cart; in-memory state unaffected");
                } else {
                    debug!(key = %key, count = self.items.len(), "persisted cart");
                }
            }
            Err(e) => {
                warn!(key = %key, error = %e, "failed to encode cart record");
            }
        }
    }

    /// Load and decode the record at `key`, failing soft.
    ///
    /// Both a read error and a malformed record are treated as an absent
    /// record so the identity protocol stays deterministic; a corrupt record
    /// costs that cart, never the session.
    fn load(&mut self, key: &str) -> Option<Vec<CartItem>> {
        match self.storage.get(key) {
            Ok(Some(record)) => match serde_json::from_str(&record) {
                Ok(items) => Some(items),
                Err(e) => {
                    warn!(key, error = %e, "malformed cart record; treating as absent");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "failed to read cart record; treating as absent");
                None
            }
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("identity", &self.identity)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
