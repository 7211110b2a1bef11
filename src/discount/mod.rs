//! Discount Engine Module
//!
//! The engine is pure: it takes a cart, coupon definitions and the current
//! instant, and returns outcomes without touching any store.
//! - Eligibility and preview evaluation (`evaluate`)
//! - Single-coupon application (`apply`)
//! - Buy X get Y repetition planning shared by both
//! - REST API handlers

pub mod applicator;
pub mod bxgy;
pub mod evaluator;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use applicator::apply;
pub use evaluator::evaluate;
pub use handlers::routes;
pub use models::{ApplicableCoupon, ApplyResult, Rejection};
