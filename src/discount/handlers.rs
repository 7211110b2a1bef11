//! REST API handlers for the discount engine
//!
//! These endpoints take a snapshot of the relevant coupons from the store
//! and hand it, together with the request's cart, to the engine.

use super::{apply, evaluate, ApplicableCoupon, ApplyResult};
use crate::cart::Cart;
use crate::coupons::{CouponId, SharedState};
use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Creates routes for discount evaluation and application
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/applicable-coupons", post(applicable_coupons))
        .route("/apply-coupon/:id", post(apply_coupon))
}

/// Request body carrying the cart to price
#[derive(Debug, Deserialize)]
pub struct CartRequest {
    pub cart: Cart,
}

/// Response for the applicable-coupons endpoint
#[derive(Debug, Serialize)]
pub struct ApplicableCouponsResponse {
    pub applicable_coupons: Vec<ApplicableCoupon>,
}

/// Endpoint: POST /applicable-coupons
/// Lists every coupon that applies to the cart with its preview discount.
async fn applicable_coupons(
    State(state): State<SharedState>,
    body: Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<ApplicableCouponsResponse>, ApiError> {
    let Json(request) = body?;
    let coupons = state.coupons.list();
    let applicable_coupons = evaluate(&request.cart, &coupons, Utc::now());

    Ok(Json(ApplicableCouponsResponse { applicable_coupons }))
}

/// Endpoint: POST /apply-coupon/:id
/// Applies one coupon and returns the discounted cart.
async fn apply_coupon(
    State(state): State<SharedState>,
    id: Result<Path<CouponId>, PathRejection>,
    body: Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<ApplyResult>, ApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    let coupon = state.coupons.get(id).ok_or(ApiError::NotFound(id))?;

    match apply(&request.cart, &coupon, Utc::now()) {
        Ok(result) => Ok(Json(result)),
        Err(rejection) => {
            info!(coupon_id = id, reason = %rejection, "coupon rejected");
            Err(rejection.into())
        }
    }
}
