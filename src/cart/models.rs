//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain. Amounts are integers in the smallest currency unit.

use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Identifier of a product in the catalogue
pub type ProductId = i64;

/// Represents a line item in the shopping cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// Product this line refers to
    pub product_id: ProductId,

    /// Number of units on this line
    pub quantity: i64,

    /// Price of a single unit
    #[serde(rename = "price")]
    pub unit_price: i64,

    /// Discount accumulated on this line (defaults to 0)
    #[serde(rename = "total_discount", default)]
    pub line_discount: i64,
}

impl CartItem {
    /// Creates an undiscounted line item
    pub fn new(product_id: ProductId, quantity: i64, unit_price: i64) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
            line_discount: 0,
        }
    }
}

/// An ordered sequence of line items
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    /// Line items, in the order the caller supplied them
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}
