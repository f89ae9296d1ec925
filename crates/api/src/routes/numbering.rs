//! Invoice number allocation.

use axum::{Json, Router, extract::State, routing::post};
use chrono::{Datelike, Utc};
use invoicer_core::numbering::InvoiceNumbering;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

/// Creates the numbering routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/invoice-numbers/next", post(next_number))
}

/// Request body for allocating an invoice number.
#[derive(Debug, Default, Deserialize)]
pub struct NextNumberRequest {
    /// Numbering state; the configured defaults are used when absent.
    #[serde(default)]
    pub numbering: Option<InvoiceNumbering>,
    /// Year printed in the number; the current year when absent.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Allocated invoice number with the advanced numbering state.
#[derive(Debug, Serialize)]
pub struct NextNumberResponse {
    /// The allocated number.
    pub invoice_number: String,
    /// Numbering state to persist for the next allocation.
    pub numbering: InvoiceNumbering,
}

async fn next_number(
    State(state): State<AppState>,
    Json(payload): Json<NextNumberRequest>,
) -> Result<Json<NextNumberResponse>, ApiError> {
    let year = payload.year.unwrap_or_else(|| Utc::now().year());
    let mut numbering = payload
        .numbering
        .unwrap_or_else(|| state.default_numbering());
    let invoice_number = numbering.allocate(year)?;

    Ok(Json(NextNumberResponse {
        invoice_number,
        numbering,
    }))
}
