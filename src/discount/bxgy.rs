//! Buy X Get Y Planning
//!
//! Shared by the evaluator and the applicator: works out how many times a
//! promotion repeats for a cart and which lines receive the free units.
//!
//! The buy list is treated as a union of qualifying products: any listed
//! product's quantity counts towards the combined requirement. Free units go
//! to the cheapest eligible lines first, and a line never receives more free
//! units than it already holds.

use super::models::Rejection;
use crate::cart::{Cart, ProductId};
use crate::coupons::models::{BxGyDetails, BxGyProduct};
use std::collections::HashSet;

/// Repetitions and free units granted by a buy-get promotion for a cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyGetPlan {
    pub repetitions: i64,
    pub free_units: i64,
    get_products: HashSet<ProductId>,
}

/// Free units granted to one cart line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeGrant {
    /// Index of the line in the cart
    pub line: usize,
    pub units: i64,
}

fn required_units(products: &[BxGyProduct]) -> i64 {
    products
        .iter()
        .map(|p| p.quantity.max(0))
        .fold(0, i64::saturating_add)
}

fn product_set(products: &[BxGyProduct]) -> HashSet<ProductId> {
    products.iter().map(|p| p.product_id).collect()
}

fn units_in_cart(cart: &Cart, products: &HashSet<ProductId>) -> i64 {
    cart.items
        .iter()
        .filter(|item| products.contains(&item.product_id))
        .map(|item| item.quantity.max(0))
        .fold(0, i64::saturating_add)
}

impl BuyGetPlan {
    /// Computes the repetition count for `cart`.
    ///
    /// Fails with [`Rejection::InvalidDetails`] when the promotion cannot
    /// ever trigger (empty lists or zero quantities) and with
    /// [`Rejection::ConditionsNotMet`] when this cart does not qualify.
    pub fn for_cart(cart: &Cart, details: &BxGyDetails) -> Result<Self, Rejection> {
        if details.buy_products.is_empty() || details.get_products.is_empty() {
            return Err(Rejection::InvalidDetails);
        }

        let buy_required = required_units(&details.buy_products);
        let get_per_rep = required_units(&details.get_products);
        if buy_required == 0 || get_per_rep == 0 {
            return Err(Rejection::InvalidDetails);
        }

        let total_buy = units_in_cart(cart, &product_set(&details.buy_products));
        if total_buy < buy_required {
            return Err(Rejection::ConditionsNotMet);
        }

        let get_products = product_set(&details.get_products);
        let total_get = units_in_cart(cart, &get_products);
        if total_get == 0 {
            return Err(Rejection::ConditionsNotMet);
        }

        let mut repetitions = (total_buy / buy_required).min(total_get / get_per_rep);
        if details.repetition_limit > 0 {
            repetitions = repetitions.min(details.repetition_limit);
        }
        if repetitions <= 0 {
            return Err(Rejection::ConditionsNotMet);
        }

        Ok(Self {
            repetitions,
            free_units: repetitions.saturating_mul(get_per_rep),
            get_products,
        })
    }

    /// Distributes the free units over the eligible lines of `cart`,
    /// cheapest unit price first, ties in cart order.
    pub fn allocate(&self, cart: &Cart) -> Vec<FreeGrant> {
        let mut eligible: Vec<(usize, i64, i64)> = cart
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.get_products.contains(&item.product_id))
            .map(|(line, item)| (line, item.unit_price, item.quantity))
            .collect();
        // Stable: equal prices keep cart order
        eligible.sort_by_key(|&(_, price, _)| price);

        let mut remaining = self.free_units;
        let mut grants = Vec::new();
        for (line, _, quantity) in eligible {
            if remaining == 0 {
                break;
            }
            let units = quantity.min(remaining);
            if units > 0 {
                grants.push(FreeGrant { line, units });
                remaining -= units;
            }
        }
        grants
    }

    /// Value of the free units this plan grants for `cart`.
    pub fn free_value(&self, cart: &Cart) -> i64 {
        self.allocate(cart)
            .iter()
            .filter_map(|grant| {
                cart.items
                    .get(grant.line)
                    .map(|item| item.unit_price.saturating_mul(grant.units))
            })
            .fold(0, i64::saturating_add)
    }
}
