use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;
use shared::params::ParamError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error")]
    Internal { detail: Option<String> },
}

impl ApiError {
    /// Wraps a store failure at the operation boundary. The error is logged
    /// with the operation name here; the response carries the detail only
    /// when `expose_detail` is set (development environments).
    pub fn storage(operation: &'static str, err: sqlx::Error, expose_detail: bool) -> Self {
        tracing::error!(operation, error = %err, "store query failed");
        Self::Internal {
            detail: expose_detail.then(|| err.to_string()),
        }
    }
}

impl From<ParamError> for ApiError {
    fn from(err: ParamError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NoData(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please try again later.".to_string(),
                None,
            ),
            ApiError::Internal { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
                detail,
            ),
        };

        (status, Json(ApiResponse::failure(message, detail))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status() {
        let response = ApiError::Unauthorized("Missing Authorization header".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_status() {
        let response = ApiError::Validation("bad date".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_data_status() {
        let response = ApiError::NoData("No data to export".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rate_limited_status() {
        let response = ApiError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_internal_status() {
        let response = ApiError::Internal { detail: None }.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_param_error_maps_to_validation() {
        let error: ApiError = ParamError::MissingDateRange.into();
        assert!(matches!(error, ApiError::Validation(_)));
    }

    #[test]
    fn test_internal_message_is_generic() {
        // Detail travels separately; the display string stays generic.
        let error = ApiError::Internal {
            detail: Some("password=hunter2".to_string()),
        };
        assert_eq!(error.to_string(), "Internal error");
    }
}
