//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use invoicer_core::calculation::CalculationError;
use invoicer_core::numbering::NumberingError;
use invoicer_core::payment::PaymentError;
use invoicer_core::portfolio::PortfolioError;
use invoicer_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by API handlers.
///
/// Rendered as `{"error": CODE, "message": text}` with the status code of the
/// wrapped [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message()
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<CalculationError> for ApiError {
    fn from(e: CalculationError) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

impl From<PaymentError> for ApiError {
    fn from(e: PaymentError) -> Self {
        Self(AppError::BusinessRule(e.to_string()))
    }
}

impl From<PortfolioError> for ApiError {
    fn from(e: PortfolioError) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

impl From<NumberingError> for ApiError {
    fn from(e: NumberingError) -> Self {
        Self(AppError::Conflict(e.to_string()))
    }
}
