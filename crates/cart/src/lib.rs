//! Duka Cart - cart state machine with identity-scoped persistence.
//!
//! The cart lives in memory for the current session, writes through to a
//! durable key-value store on every mutation, and follows the active identity:
//! `cart_<userId>` for a signed-in user, `cart_anonymous` otherwise. Signing
//! in with no saved cart adopts the anonymous cart wholesale (a one-shot
//! transfer, never a line-item merge); signing out switches back to the
//! anonymous cart and leaves the user's record behind for next time.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use duka_cart::{CartProvider, NewCartItem, Silent};
//! use duka_cart::storage::MemoryStorage;
//! use duka_core::{Price, ProductId};
//!
//! let provider = CartProvider::mount(
//!     Box::new(MemoryStorage::new()),
//!     Arc::new(Silent),
//!     Arc::new(Silent),
//!     None,
//! );
//!
//! let cart = provider.cart()?;
//! cart.add_to_cart(NewCartItem {
//!     id: ProductId::new("p1"),
//!     name: "Tea leaves".to_string(),
//!     price: Price::from_cents(25000).unwrap(),
//!     image: String::new(),
//! })?;
//! assert_eq!(cart.total_items()?, 1);
//! # Ok::<(), duka_cart::CartError>(())
//! ```
//!
//! # Modules
//!
//! - [`store`] - The state machine itself
//! - [`provider`] - Scoped ownership and the shared handle
//! - [`storage`] - Durable key-value backends
//! - [`feedback`] - Injected notification and audio-cue capabilities
//! - [`item`] - Line item types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod feedback;
pub mod item;
pub mod provider;
pub mod storage;
pub mod store;

pub use error::CartError;
pub use feedback::{Cue, CueEmitter, NotificationSink, Severity, Silent};
pub use item::{CartItem, NewCartItem};
pub use provider::{CartHandle, CartProvider};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
