//! REST API handlers for coupon management
//!
//! Create, list, fetch, replace and delete coupon definitions.

use super::{models::*, state::SharedState};
use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

/// Creates routes for coupon CRUD operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/coupons", get(list_coupons).post(create_coupon))
        .route(
            "/coupons/:id",
            get(get_coupon).put(update_coupon).delete(delete_coupon),
        )
}

/// Endpoint: POST /coupons
async fn create_coupon(
    State(state): State<SharedState>,
    body: Result<Json<NewCoupon>, JsonRejection>,
) -> Result<Json<Coupon>, ApiError> {
    let Json(payload) = body?;
    let coupon = state.coupons.create(payload);
    info!(coupon_id = coupon.id, kind = %coupon.kind, "coupon created");
    Ok(Json(coupon))
}

/// Endpoint: GET /coupons
async fn list_coupons(State(state): State<SharedState>) -> Json<Vec<Coupon>> {
    Json(state.coupons.list())
}

/// Endpoint: GET /coupons/:id
async fn get_coupon(
    State(state): State<SharedState>,
    id: Result<Path<CouponId>, PathRejection>,
) -> Result<Json<Coupon>, ApiError> {
    let Path(id) = id?;
    state
        .coupons
        .get(id)
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// Endpoint: PUT /coupons/:id
/// Replaces the whole definition; the id is kept.
async fn update_coupon(
    State(state): State<SharedState>,
    id: Result<Path<CouponId>, PathRejection>,
    body: Result<Json<NewCoupon>, JsonRejection>,
) -> Result<Json<Coupon>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = body?;
    let coupon = state
        .coupons
        .replace(id, payload)
        .ok_or(ApiError::NotFound(id))?;
    info!(coupon_id = id, "coupon replaced");
    Ok(Json(coupon))
}

/// Endpoint: DELETE /coupons/:id
async fn delete_coupon(
    State(state): State<SharedState>,
    id: Result<Path<CouponId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !state.coupons.delete(id) {
        return Err(ApiError::NotFound(id));
    }
    info!(coupon_id = id, "coupon deleted");
    Ok(StatusCode::NO_CONTENT)
}
