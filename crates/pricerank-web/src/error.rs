use std::time::Duration;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pricerank_core::{PriceError, ValidationError};
use serde::Serialize;
use thiserror::Error;

const DATA_UNAVAILABLE: &str =
    "Something went wrong while reading the price data. Contact your administrator.";

/// Request-level failures and their HTTP mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("You have exhausted your API Request Quota")]
    RateLimited { retry_after: Duration },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Price(error) => match error {
                PriceError::NotFound { .. }
                | PriceError::EmptySet
                | PriceError::NoDataForDate { .. } => StatusCode::NOT_FOUND,
                PriceError::Validation(_) | PriceError::InvalidRange { .. } => {
                    StatusCode::BAD_REQUEST
                }
                PriceError::DivisionByZero | PriceError::RangeOverflow { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PriceError::Parse { .. } | PriceError::Io { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Price(error) => match error {
                PriceError::NotFound { .. } => "currency_not_supported",
                PriceError::EmptySet | PriceError::NoDataForDate { .. } => "no_such_element",
                PriceError::Validation(_) | PriceError::InvalidRange { .. } => "invalid_request",
                PriceError::DivisionByZero => "division_by_zero",
                PriceError::RangeOverflow { .. } => "range_overflow",
                PriceError::Parse { .. } | PriceError::Io { .. } => "price_data_unavailable",
            },
            Self::Validation(_) | Self::BadRequest(_) => "invalid_request",
            Self::RateLimited { .. } => "rate_limited",
            Self::Internal(_) => "price_data_unavailable",
        }
    }

    /// Client-facing message; server-side detail is logged, never returned.
    fn public_message(&self) -> String {
        match self {
            Self::Price(PriceError::NotFound { symbol }) => {
                format!("Cryptocurrency '{symbol}' is not yet supported by the service")
            }
            _ if self.status().is_server_error() => DATA_UNAVAILABLE.to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.public_message(),
            },
        };
        let mut response = (status, Json(body)).into_response();

        if let Self::RateLimited { retry_after } = &self {
            let seconds = retry_after.as_secs_f64().ceil().max(1.0) as u64;
            if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}
