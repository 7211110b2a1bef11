//! Application State Management
//!
//! This module wires the coupon store into the state shared by every
//! request handler.

use super::store::{CouponStore, InMemoryCouponStore};
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state
pub struct AppState {
    /// Coupon definitions, keyed by id
    pub coupons: Arc<dyn CouponStore>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new AppState backed by an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryCouponStore::new()))
    }

    /// Creates a new AppState around an existing store
    pub fn with_store(coupons: Arc<dyn CouponStore>) -> Self {
        Self { coupons }
    }
}
