//! Coupon Domain Module
//!
//! This module contains everything about coupon definitions, including:
//! - Domain models (Coupon, CouponType, per-type details)
//! - The store abstraction and its in-memory implementation
//! - Application state management
//! - REST API handlers

pub mod handlers;
pub mod models;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Coupon, CouponDetails, CouponId, CouponType, NewCoupon};
pub use state::{AppState, SharedState};
pub use store::{CouponStore, InMemoryCouponStore};
