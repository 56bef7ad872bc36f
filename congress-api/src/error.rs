//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use congress_core::error::CongressError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    /// Upstream API failure.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message, "UPSTREAM_ERROR")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// Returns the HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<CongressError> for ApiError {
    fn from(err: CongressError) -> Self {
        match &err {
            CongressError::InvalidBillSlug(_) => ApiError::bad_request(err.to_string()),
            CongressError::NoData => ApiError::not_found(err.to_string()),
            e if e.is_upstream_error() => {
                tracing::warn!(error = %err, "Upstream request failed");
                ApiError::upstream(err.to_string())
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use congress_core::types::Chamber;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (CongressError::InvalidBillSlug("x".into()), StatusCode::BAD_REQUEST),
            (CongressError::NoData, StatusCode::NOT_FOUND),
            (CongressError::BadStatus("ERROR".into()), StatusCode::BAD_GATEWAY),
            (CongressError::HttpError("reset".into()), StatusCode::BAD_GATEWAY),
            (
                CongressError::AggregationFailed {
                    chamber: Chamber::House,
                    source: Box::new(CongressError::NoData),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (CongressError::ConfigError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
