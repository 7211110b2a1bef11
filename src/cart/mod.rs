//! Shopping Cart Domain Module
//!
//! This module contains the cart primitives consumed by the discount engine:
//! - Domain models (CartItem, Cart)
//! - Totals helpers (line subtotals, cart total)

pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use helpers::{cart_total, line_subtotal};
pub use models::{Cart, CartItem, ProductId};
