//! Coupon Domain Models
//!
//! This module contains the coupon definition as it is stored, plus the
//! per-variant detail payloads. Details travel as raw JSON and are decoded
//! on demand against the coupon's declared type.

use crate::cart::ProductId;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Wire name of the cart-wise coupon type
pub const CART_WISE: &str = "cart-wise";
/// Wire name of the product-wise coupon type
pub const PRODUCT_WISE: &str = "product-wise";
/// Wire name of the buy-x-get-y coupon type
pub const BXGY: &str = "bxgy";

/// Identifier assigned by the store on creation
pub type CouponId = i64;

// =============================================================================
// Coupon Type
// =============================================================================

/// Discount kind of a coupon.
///
/// Unknown type strings are preserved in `Unsupported` so that a stored
/// coupon round-trips unchanged and is rejected only when used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CouponType {
    CartWise,
    ProductWise,
    BxGy,
    Unsupported(String),
}

impl From<String> for CouponType {
    fn from(value: String) -> Self {
        match value.as_str() {
            CART_WISE => Self::CartWise,
            PRODUCT_WISE => Self::ProductWise,
            BXGY => Self::BxGy,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<CouponType> for String {
    fn from(value: CouponType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CouponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CartWise => f.write_str(CART_WISE),
            Self::ProductWise => f.write_str(PRODUCT_WISE),
            Self::BxGy => f.write_str(BXGY),
            Self::Unsupported(other) => f.write_str(other),
        }
    }
}

// =============================================================================
// Detail Payloads
// =============================================================================

/// Percentage off the whole cart once its total exceeds a threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartWiseDetails {
    /// Cart total must be strictly greater than this
    #[serde(default)]
    pub threshold: i64,

    /// Percent taken off, 0–100 by convention
    #[serde(rename = "discount", default)]
    pub discount_percent: i64,
}

/// Percentage off every line of one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWiseDetails {
    /// Product the discount targets
    #[serde(default)]
    pub product_id: ProductId,

    /// Percent taken off, 0–100 by convention
    #[serde(rename = "discount", default)]
    pub discount_percent: i64,
}

/// One entry of a buy or get list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BxGyProduct {
    #[serde(default)]
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: i64,
}

/// Buy X get Y promotion parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BxGyDetails {
    /// Products whose quantities count towards the buy requirement
    #[serde(default)]
    pub buy_products: Vec<BxGyProduct>,

    /// Products that can be granted for free
    #[serde(default)]
    pub get_products: Vec<BxGyProduct>,

    /// Maximum repetitions, 0 meaning unlimited
    #[serde(default, alias = "repition_limit")]
    pub repetition_limit: i64,
}

/// A coupon's details decoded against its declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponDetails {
    CartWise(CartWiseDetails),
    ProductWise(ProductWiseDetails),
    BxGy(BxGyDetails),
}

impl CouponDetails {
    /// Decodes a raw payload against `kind`.
    ///
    /// Missing fields take their zero value and `null` reads as an empty
    /// object; only values of the wrong shape fail.
    pub fn decode(kind: &CouponType, raw: &Value) -> Result<Self, DetailsError> {
        match kind {
            CouponType::CartWise => decode_as(kind, raw).map(Self::CartWise),
            CouponType::ProductWise => decode_as(kind, raw).map(Self::ProductWise),
            CouponType::BxGy => decode_as(kind, raw).map(Self::BxGy),
            CouponType::Unsupported(other) => Err(DetailsError::UnsupportedType(other.clone())),
        }
    }

    /// Re-encodes the payload using the canonical field names.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::CartWise(d) => serde_json::to_value(d),
            Self::ProductWise(d) => serde_json::to_value(d),
            Self::BxGy(d) => serde_json::to_value(d),
        }
    }
}

fn decode_as<T: DeserializeOwned>(kind: &CouponType, raw: &Value) -> Result<T, DetailsError> {
    let decoded = match raw {
        Value::Null => T::deserialize(Value::Object(Map::new())),
        other => T::deserialize(other),
    };
    decoded.map_err(|source| DetailsError::Malformed {
        kind: kind.clone(),
        source,
    })
}

/// Canonical form of a raw payload; left untouched when it cannot be decoded.
fn normalize_details(kind: &CouponType, raw: Value) -> Value {
    match CouponDetails::decode(kind, &raw).and_then(|d| {
        d.to_value().map_err(|source| DetailsError::Malformed {
            kind: kind.clone(),
            source,
        })
    }) {
        Ok(canonical) => canonical,
        Err(_) => raw,
    }
}

/// Failure to interpret a coupon's raw details
#[derive(Debug, Error)]
pub enum DetailsError {
    /// The declared type is not one of the known variants
    #[error("unsupported coupon type `{0}`")]
    UnsupportedType(String),

    /// The payload does not have the shape its type requires
    #[error("invalid {kind} details: {source}")]
    Malformed {
        kind: CouponType,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Coupon
// =============================================================================

fn default_active() -> bool {
    true
}

/// `active` assumed when a creation payload leaves it out
pub const ACTIVE_ON_CREATE: bool = true;
/// `active` assumed when a replacement payload leaves it out
pub const ACTIVE_ON_REPLACE: bool = false;

/// Payload for creating or replacing a coupon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCoupon {
    /// Optional human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Discount kind, selects how `details` is decoded
    #[serde(rename = "type")]
    pub kind: CouponType,

    /// Raw variant payload
    #[serde(default)]
    pub details: Value,

    /// Whether the coupon can be used; the default depends on the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Instant after which the coupon no longer applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A stored coupon definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: CouponType,

    #[serde(default)]
    pub details: Value,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Builds a stored coupon from a payload and an assigned id.
    ///
    /// Decodable details are stored in canonical form; anything else is kept
    /// verbatim and rejected when the coupon is used.
    pub fn from_new(id: CouponId, new: NewCoupon, default_active: bool) -> Self {
        let details = normalize_details(&new.kind, new.details);
        Self {
            id,
            name: new.name,
            kind: new.kind,
            details,
            active: new.active.unwrap_or(default_active),
            expires_at: new.expires_at,
        }
    }

    /// Decodes `details` into the shape required by the coupon's type.
    pub fn details(&self) -> Result<CouponDetails, DetailsError> {
        CouponDetails::decode(&self.kind, &self.details)
    }

    /// A coupon is expired only once `now` is strictly past `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn coupon(kind: &str, details: Value) -> Coupon {
        serde_json::from_value(json!({ "id": 1, "type": kind, "details": details })).unwrap()
    }

    fn new_coupon(kind: &str, details: Value) -> NewCoupon {
        serde_json::from_value(json!({ "type": kind, "details": details })).unwrap()
    }

    #[test]
    fn test_active_default_depends_on_operation() {
        let new = new_coupon("cart-wise", json!({}));
        assert_eq!(new.active, None);
        assert!(Coupon::from_new(1, new.clone(), ACTIVE_ON_CREATE).active);
        assert!(!Coupon::from_new(1, new, ACTIVE_ON_REPLACE).active);

        let mut explicit = new_coupon("cart-wise", json!({}));
        explicit.active = Some(false);
        assert!(!Coupon::from_new(1, explicit, ACTIVE_ON_CREATE).active);
    }

    #[test]
    fn test_details_are_stored_in_canonical_form() {
        let new = new_coupon(
            "bxgy",
            json!({
                "buy_products": [{ "product_id": 1, "quantity": 3 }],
                "get_products": [{ "product_id": 2, "quantity": 1 }],
                "repition_limit": 2
            }),
        );
        let stored = Coupon::from_new(1, new, ACTIVE_ON_CREATE);
        assert_eq!(stored.details["repetition_limit"], 2);
        assert!(stored.details.get("repition_limit").is_none());

        let partial = Coupon::from_new(2, new_coupon("cart-wise", json!({})), ACTIVE_ON_CREATE);
        assert_eq!(partial.details, json!({ "threshold": 0, "discount": 0 }));

        // Undecodable payloads are kept as given
        let raw = json!({ "threshold": "lots" });
        let malformed = Coupon::from_new(3, new_coupon("cart-wise", raw.clone()), ACTIVE_ON_CREATE);
        assert_eq!(malformed.details, raw);
    }

    #[test]
    fn test_missing_fields_decode_to_zero() {
        let c = coupon("cart-wise", json!({ "threshold": 100 }));
        assert_eq!(
            c.details().unwrap(),
            CouponDetails::CartWise(CartWiseDetails {
                threshold: 100,
                discount_percent: 0
            })
        );

        let c = coupon("product-wise", Value::Null);
        assert_eq!(
            c.details().unwrap(),
            CouponDetails::ProductWise(ProductWiseDetails {
                product_id: 0,
                discount_percent: 0
            })
        );
    }

    #[test]
    fn test_unknown_type_round_trips() {
        let c = coupon("flat", json!({}));
        assert_eq!(c.kind, CouponType::Unsupported("flat".into()));
        assert_eq!(serde_json::to_value(&c).unwrap()["type"], "flat");
        assert!(matches!(c.details(), Err(DetailsError::UnsupportedType(t)) if t == "flat"));
    }

    #[test]
    fn test_decodes_cart_wise_details() {
        let c = coupon("cart-wise", json!({ "threshold": 100, "discount": 10 }));
        assert_eq!(
            c.details().unwrap(),
            CouponDetails::CartWise(CartWiseDetails {
                threshold: 100,
                discount_percent: 10
            })
        );
    }

    #[test]
    fn test_bxgy_accepts_legacy_limit_key() {
        let c = coupon(
            "bxgy",
            json!({
                "buy_products": [{ "product_id": 1, "quantity": 3 }],
                "get_products": [{ "product_id": 2, "quantity": 1 }],
                "repition_limit": 2
            }),
        );
        let CouponDetails::BxGy(details) = c.details().unwrap() else {
            panic!("expected bxgy details");
        };
        assert_eq!(details.repetition_limit, 2);
    }

    #[test]
    fn test_bxgy_limit_defaults_to_unlimited() {
        let c = coupon(
            "bxgy",
            json!({ "buy_products": [], "get_products": [] }),
        );
        let CouponDetails::BxGy(details) = c.details().unwrap() else {
            panic!("expected bxgy details");
        };
        assert_eq!(details.repetition_limit, 0);
    }

    #[test]
    fn test_malformed_details_are_reported() {
        let c = coupon("product-wise", json!({ "product_id": "abc" }));
        assert!(matches!(
            c.details(),
            Err(DetailsError::Malformed {
                kind: CouponType::ProductWise,
                ..
            })
        ));
    }

    #[test]
    fn test_expiry_is_strictly_before_now() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let mut c = coupon("cart-wise", json!({}));

        c.expires_at = Some(now);
        assert!(!c.is_expired(now));

        c.expires_at = Some(now - chrono::Duration::seconds(1));
        assert!(c.is_expired(now));

        c.expires_at = None;
        assert!(!c.is_expired(now));
    }
}
