//! API Error Handling
//!
//! Maps failures of the REST layer to HTTP responses of the form
//! `{"error": "<message>"}`.

use crate::coupons::models::CouponId;
use crate::discount::models::Rejection;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by the REST handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("coupon {0} not found")]
    NotFound(CouponId),

    #[error("{0}")]
    BadRequest(String),

    /// The engine refused to apply a coupon to the cart
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::BadRequest("invalid id".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_keep_their_reason() {
        let err = ApiError::from(Rejection::Expired);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "coupon expired");
    }

    #[test]
    fn test_not_found_status() {
        let err = ApiError::NotFound(7);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "coupon 7 not found");
    }
}
