//! Coupon Service Library
//!
//! This library provides coupon management and a discount engine that
//! decides which coupons apply to a cart and prices the cart once one is
//! applied.

// Domain modules
pub mod cart;
pub mod coupons;
pub mod discount;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
