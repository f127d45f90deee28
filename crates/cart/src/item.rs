//! Cart line item types.

use duka_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A line item in the cart.
///
/// Items are unique by [`ProductId`] within a cart; adding a product that is
/// already present increments its quantity instead of appending a second
/// entry. An item with quantity zero never exists in the cart - reaching zero
/// removes the entry entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image reference; may be empty when the product has no image.
    pub image: String,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Line total for this item (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Input for adding a product to the cart.
///
/// Quantity is intentionally absent: an add always contributes exactly one
/// unit, either as a fresh entry or as an increment of an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image reference; may be empty.
    pub image: String,
}

impl NewCartItem {
    /// Convert into a cart entry with quantity 1.
    #[must_use]
    pub fn into_item(self) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity: 1,
        }
    }
}
