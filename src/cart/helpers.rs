//! Shopping Cart Totals Helpers
//!
//! Pure functions computing line and cart subtotals. Multiplications saturate
//! so that absurd inputs degrade instead of panicking.

use super::models::{Cart, CartItem};

/// Returns `unit_price × quantity` for a single line.
pub fn line_subtotal(item: &CartItem) -> i64 {
    item.unit_price.saturating_mul(item.quantity)
}

/// Sums the line subtotals of every item in the cart.
///
/// Example: `[{qty 6, price 50}, {qty 1, price 20}]` totals `320`.
pub fn cart_total(cart: &Cart) -> i64 {
    cart.items
        .iter()
        .map(line_subtotal)
        .fold(0, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_total_sums_price_times_quantity() {
        let cart = Cart::new(vec![CartItem::new(1, 6, 50), CartItem::new(2, 1, 20)]);
        assert_eq!(cart_total(&cart), 320);
    }

    #[test]
    fn test_cart_total_ignores_existing_discounts() {
        let mut item = CartItem::new(1, 2, 100);
        item.line_discount = 50;
        assert_eq!(cart_total(&Cart::new(vec![item])), 200);
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        assert_eq!(cart_total(&Cart::default()), 0);
    }

    #[test]
    fn test_line_subtotal_saturates() {
        let item = CartItem::new(1, i64::MAX, 2);
        assert_eq!(line_subtotal(&item), i64::MAX);
    }
}
