//! Stateless totals calculation.

use axum::{Json, Router, extract::State, routing::post};
use invoicer_core::calculation::{
    CalculationOptions, InvoiceTotals, LineBreakdown, LineItem, calculate_invoice_totals,
    evaluate_lines, validate_calculation_input,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the calculation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/invoices/calculate", post(calculate))
}

/// Request body for a totals calculation.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    /// Line items in display order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Invoice-level options.
    #[serde(default)]
    pub options: CalculationOptions,
}

/// Calculated totals with the per-line figures they were built from.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    /// Invoice totals.
    pub totals: InvoiceTotals,
    /// Unrounded per-line figures, in input order.
    pub lines: Vec<LineBreakdown>,
}

async fn calculate(
    State(state): State<AppState>,
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    validate_calculation_input(&payload.items, &payload.options, &state.limits())?;

    let totals = calculate_invoice_totals(&payload.items, &payload.options);
    let lines = evaluate_lines(&payload.items, payload.options.tax_inclusive);

    info!(
        lines = payload.items.len(),
        grand_total = %totals.grand_total,
        "Invoice totals calculated"
    );

    Ok(Json(CalculateResponse { totals, lines }))
}
