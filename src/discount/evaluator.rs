//! Eligibility & Preview Evaluation
//!
//! Works out which coupons apply to a cart and how much each would take off,
//! without touching the cart.

use super::bxgy::BuyGetPlan;
use super::helpers::percent_of;
use super::models::ApplicableCoupon;
use crate::cart::{cart_total, line_subtotal, Cart};
use crate::coupons::models::{CartWiseDetails, Coupon, CouponDetails, ProductWiseDetails};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Returns every usable coupon whose conditions hold for `cart`, with its
/// preview discount, in the order the coupons were given.
///
/// Inactive, expired and undecodable coupons are skipped silently.
pub fn evaluate(cart: &Cart, coupons: &[Coupon], now: DateTime<Utc>) -> Vec<ApplicableCoupon> {
    coupons
        .iter()
        .filter_map(|coupon| {
            let discount_amount = preview(cart, coupon, now)?;
            Some(ApplicableCoupon {
                coupon_id: coupon.id,
                kind: coupon.kind.clone(),
                discount_amount,
            })
        })
        .collect()
}

/// Preview discount of a single coupon, `None` when it does not apply.
pub fn preview(cart: &Cart, coupon: &Coupon, now: DateTime<Utc>) -> Option<i64> {
    if !coupon.active || coupon.is_expired(now) {
        return None;
    }

    let details = match coupon.details() {
        Ok(details) => details,
        Err(err) => {
            debug!(coupon_id = coupon.id, error = %err, "skipping coupon");
            return None;
        }
    };

    let discount = match details {
        CouponDetails::CartWise(d) => cart_wise_discount(cart, &d).unwrap_or(0),
        CouponDetails::ProductWise(d) => product_discount(cart, &d),
        CouponDetails::BxGy(d) => BuyGetPlan::for_cart(cart, &d)
            .map(|plan| plan.free_value(cart))
            .unwrap_or(0),
    };

    (discount > 0).then_some(discount)
}

/// Discount on the whole cart, `None` unless the total is strictly above
/// the threshold and the percent is positive.
pub(crate) fn cart_wise_discount(cart: &Cart, details: &CartWiseDetails) -> Option<i64> {
    let total = cart_total(cart);
    (total > details.threshold && details.discount_percent > 0)
        .then(|| percent_of(total, details.discount_percent))
}

/// Sum of the per-line discounts on the targeted product, each line
/// truncated on its own.
pub(crate) fn product_discount(cart: &Cart, details: &ProductWiseDetails) -> i64 {
    if details.discount_percent <= 0 {
        return 0;
    }
    cart.items
        .iter()
        .filter(|item| item.product_id == details.product_id)
        .map(|item| percent_of(line_subtotal(item), details.discount_percent))
        .fold(0, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::coupons::models::CouponType;
    use chrono::{Duration, TimeZone};
    use serde_json::{json, Value};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn coupon(id: i64, kind: &str, details: Value) -> Coupon {
        serde_json::from_value(json!({ "id": id, "type": kind, "details": details })).unwrap()
    }

    fn cart() -> Cart {
        Cart::new(vec![
            CartItem::new(1, 6, 50),
            CartItem::new(2, 3, 30),
            CartItem::new(3, 2, 25),
        ])
    }

    #[test]
    fn test_cart_wise_requires_total_above_threshold() {
        // total = 300 + 90 + 50 = 440
        let above = coupon(1, "cart-wise", json!({ "threshold": 439, "discount": 10 }));
        let equal = coupon(2, "cart-wise", json!({ "threshold": 440, "discount": 10 }));
        let zero_percent = coupon(3, "cart-wise", json!({ "threshold": 0, "discount": 0 }));

        let result = evaluate(&cart(), &[above, equal, zero_percent], now());
        assert_eq!(
            result,
            vec![ApplicableCoupon {
                coupon_id: 1,
                kind: CouponType::CartWise,
                discount_amount: 44,
            }]
        );
    }

    #[test]
    fn test_product_wise_truncates_each_line() {
        let cart = Cart::new(vec![
            CartItem::new(5, 1, 15),
            CartItem::new(6, 1, 1000),
            CartItem::new(5, 1, 15),
        ]);
        let c = coupon(1, "product-wise", json!({ "product_id": 5, "discount": 10 }));

        // 1 + 1, not floor(30 * 10 / 100) = 3
        assert_eq!(preview(&cart, &c, now()), Some(2));
    }

    #[test]
    fn test_product_wise_without_matching_line_is_excluded() {
        let c = coupon(1, "product-wise", json!({ "product_id": 99, "discount": 50 }));
        assert!(evaluate(&cart(), &[c], now()).is_empty());
    }

    #[test]
    fn test_bxgy_preview_uses_cheapest_units() {
        let cart = Cart::new(vec![
            CartItem::new(1, 6, 100),
            CartItem::new(2, 2, 10),
            CartItem::new(3, 2, 40),
        ]);
        let c = coupon(
            1,
            "bxgy",
            json!({
                "buy_products": [{ "product_id": 1, "quantity": 3 }],
                "get_products": [
                    { "product_id": 3, "quantity": 1 },
                    { "product_id": 2, "quantity": 1 }
                ],
                "repetition_limit": 0
            }),
        );

        // two reps of two free units: both 10s, then both 40s
        assert_eq!(preview(&cart, &c, now()), Some(100));
    }

    #[test]
    fn test_inactive_expired_and_malformed_are_skipped() {
        let mut inactive = coupon(1, "cart-wise", json!({ "threshold": 0, "discount": 10 }));
        inactive.active = false;

        let mut expired = coupon(2, "cart-wise", json!({ "threshold": 0, "discount": 10 }));
        expired.expires_at = Some(now() - Duration::seconds(1));

        let malformed = coupon(3, "cart-wise", json!({ "threshold": "lots" }));
        let unsupported = coupon(4, "flat", json!({ "amount": 5 }));

        let mut expiring_now = coupon(5, "cart-wise", json!({ "threshold": 0, "discount": 10 }));
        expiring_now.expires_at = Some(now());

        let result = evaluate(
            &cart(),
            &[inactive, expired, malformed, unsupported, expiring_now],
            now(),
        );
        let ids: Vec<_> = result.iter().map(|c| c.coupon_id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let coupons = vec![
            coupon(1, "cart-wise", json!({ "threshold": 100, "discount": 5 })),
            coupon(2, "product-wise", json!({ "product_id": 2, "discount": 20 })),
        ];
        let cart = cart();

        let first = evaluate(&cart, &coupons, now());
        assert_eq!(first.len(), 2);
        assert_eq!(first, evaluate(&cart, &coupons, now()));
    }
}
