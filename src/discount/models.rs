//! Discount Engine Result Models
//!
//! Outcomes produced by the evaluator and the applicator. All of them are
//! ephemeral: they are built per call and never stored.

use crate::cart::Cart;
use crate::coupons::models::{CouponId, CouponType, DetailsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A coupon whose conditions hold for a cart, with the discount it would grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicableCoupon {
    pub coupon_id: CouponId,

    #[serde(rename = "type")]
    pub kind: CouponType,

    /// Preview discount amount
    #[serde(rename = "discount")]
    pub discount_amount: i64,
}

/// Cart after a coupon has been applied, with its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub updated_cart: Cart,

    /// Sum of line subtotals before any free units were added
    pub total_price: i64,

    pub total_discount: i64,

    /// `total_price - total_discount`
    pub final_price: i64,
}

impl ApplyResult {
    pub fn new(updated_cart: Cart, total_price: i64, total_discount: i64) -> Self {
        Self {
            updated_cart,
            total_price,
            total_discount,
            final_price: total_price.saturating_sub(total_discount),
        }
    }
}

/// Why a coupon could not be applied to a cart.
///
/// The display strings are the reasons reported to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("coupon inactive")]
    Inactive,

    #[error("coupon expired")]
    Expired,

    #[error("invalid details")]
    InvalidDetails,

    #[error("conditions not met")]
    ConditionsNotMet,

    #[error("unsupported type")]
    UnsupportedType,
}

impl From<DetailsError> for Rejection {
    fn from(err: DetailsError) -> Self {
        match err {
            DetailsError::UnsupportedType(_) => Self::UnsupportedType,
            DetailsError::Malformed { .. } => Self::InvalidDetails,
        }
    }
}
