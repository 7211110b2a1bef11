//! Coupon Storage
//!
//! The discount engine never touches storage; handlers read a snapshot of
//! the coupons they need through [`CouponStore`] and hand it to the engine.

use super::models::{Coupon, CouponId, NewCoupon, ACTIVE_ON_CREATE, ACTIVE_ON_REPLACE};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Keyed coupon storage with snapshot reads.
pub trait CouponStore: Send + Sync {
    /// Stores a new coupon under the next free id and returns it. A missing
    /// `active` flag means active.
    fn create(&self, new: NewCoupon) -> Coupon;

    /// Returns a copy of the coupon with `id`, if any.
    fn get(&self, id: CouponId) -> Option<Coupon>;

    /// Returns a copy of every coupon, ordered by id.
    fn list(&self) -> Vec<Coupon>;

    /// Replaces the coupon with `id` wholesale, keeping its id. A missing
    /// `active` flag means inactive.
    fn replace(&self, id: CouponId, new: NewCoupon) -> Option<Coupon>;

    /// Removes the coupon with `id`, returning whether it existed.
    fn delete(&self, id: CouponId) -> bool;
}

/// In-memory store; contents are lost on restart.
pub struct InMemoryCouponStore {
    /// DashMap allows concurrent access without external Mutexes.
    coupons: DashMap<CouponId, Coupon>,

    /// Next id to hand out, starting at 1
    next_id: AtomicI64,
}

impl Default for InMemoryCouponStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCouponStore {
    pub fn new() -> Self {
        Self {
            coupons: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl CouponStore for InMemoryCouponStore {
    fn create(&self, new: NewCoupon) -> Coupon {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let coupon = Coupon::from_new(id, new, ACTIVE_ON_CREATE);
        self.coupons.insert(id, coupon.clone());
        coupon
    }

    fn get(&self, id: CouponId) -> Option<Coupon> {
        self.coupons.get(&id).map(|entry| entry.value().clone())
    }

    fn list(&self) -> Vec<Coupon> {
        let mut coupons: Vec<Coupon> = self
            .coupons
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        coupons.sort_by_key(|c| c.id);
        coupons
    }

    fn replace(&self, id: CouponId, new: NewCoupon) -> Option<Coupon> {
        let mut entry = self.coupons.get_mut(&id)?;
        *entry = Coupon::from_new(id, new, ACTIVE_ON_REPLACE);
        Some(entry.value().clone())
    }

    fn delete(&self, id: CouponId) -> bool {
        self.coupons.remove(&id).is_some()
    }
}
