//! Discount Application
//!
//! Applies one coupon to a copy of a cart, writing per-line discounts (and,
//! for buy-get coupons, the free units) into the returned cart.

use super::bxgy::BuyGetPlan;
use super::evaluator::{cart_wise_discount, product_discount};
use super::helpers::{percent_of, proportional_share};
use super::models::{ApplyResult, Rejection};
use crate::cart::{cart_total, line_subtotal, Cart};
use crate::coupons::models::{
    BxGyDetails, CartWiseDetails, Coupon, CouponDetails, ProductWiseDetails,
};
use chrono::{DateTime, Utc};

/// Applies `coupon` to `cart` as of `now`.
///
/// The caller's cart is left untouched; the discounted copy is returned in
/// the [`ApplyResult`].
pub fn apply(cart: &Cart, coupon: &Coupon, now: DateTime<Utc>) -> Result<ApplyResult, Rejection> {
    if !coupon.active {
        return Err(Rejection::Inactive);
    }
    if coupon.is_expired(now) {
        return Err(Rejection::Expired);
    }

    match coupon.details()? {
        CouponDetails::CartWise(d) => apply_cart_wise(cart, &d),
        CouponDetails::ProductWise(d) => apply_product_wise(cart, &d),
        CouponDetails::BxGy(d) => apply_bxgy(cart, &d),
    }
}

/// Spreads the discount over every line in proportion to its subtotal. The
/// flooring shortfall goes to the first line with the largest subtotal.
fn apply_cart_wise(cart: &Cart, details: &CartWiseDetails) -> Result<ApplyResult, Rejection> {
    let discount = cart_wise_discount(cart, details).ok_or(Rejection::ConditionsNotMet)?;
    let total = cart_total(cart);

    let mut updated = cart.clone();
    let mut largest: Option<(usize, i64)> = None;
    let mut distributed = 0i64;
    for (line, item) in updated.items.iter_mut().enumerate() {
        let subtotal = line_subtotal(item);
        item.line_discount = proportional_share(subtotal, discount, total);
        distributed = distributed.saturating_add(item.line_discount);
        if largest.map_or(true, |(_, max)| subtotal > max) {
            largest = Some((line, subtotal));
        }
    }

    if distributed < discount {
        if let Some(item) = largest.and_then(|(line, _)| updated.items.get_mut(line)) {
            item.line_discount += discount - distributed;
        }
    }

    Ok(ApplyResult::new(updated, total, discount))
}

/// Discounts the targeted product's lines; every other line ends at zero.
fn apply_product_wise(
    cart: &Cart,
    details: &ProductWiseDetails,
) -> Result<ApplyResult, Rejection> {
    let discount = product_discount(cart, details);
    if discount == 0 {
        return Err(Rejection::ConditionsNotMet);
    }

    let mut updated = cart.clone();
    for item in &mut updated.items {
        item.line_discount = if item.product_id == details.product_id {
            percent_of(line_subtotal(item), details.discount_percent)
        } else {
            0
        };
    }

    Ok(ApplyResult::new(updated, cart_total(cart), discount))
}

/// Adds the free units to the cheapest eligible lines and discounts them.
fn apply_bxgy(cart: &Cart, details: &BxGyDetails) -> Result<ApplyResult, Rejection> {
    let plan = BuyGetPlan::for_cart(cart, details)?;

    let mut updated = cart.clone();
    let mut discount = 0i64;
    for grant in plan.allocate(cart) {
        if let Some(item) = updated.items.get_mut(grant.line) {
            let value = item.unit_price.saturating_mul(grant.units);
            item.line_discount = item.line_discount.saturating_add(value);
            item.quantity = item.quantity.saturating_add(grant.units);
            discount = discount.saturating_add(value);
        }
    }

    if discount == 0 {
        return Err(Rejection::ConditionsNotMet);
    }

    Ok(ApplyResult::new(updated, cart_total(cart), discount))
}
