//! Invoice lifecycle routes.
//!
//! Every handler receives the invoice records it operates on and returns the
//! updated records. Nothing is stored server-side.

use axum::{Json, Router, extract::State, routing::post};
use chrono::{Datelike, Utc};
use invoicer_core::calculation::validate_calculation_input;
use invoicer_core::invoice::{Invoice, InvoiceService};
use invoicer_core::numbering::InvoiceNumbering;
use invoicer_core::payment::{Payment, PaymentService};
use invoicer_core::portfolio::{InvoiceQuery, PortfolioSummary, search_invoices, summarize};
use invoicer_shared::types::{InvoiceId, PageResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices/recalculate", post(recalculate))
        .route("/invoices/payments", post(record_payment))
        .route("/invoices/duplicate", post(duplicate))
        .route("/invoices/search", post(search))
        .route("/invoices/summary", post(summary))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Invoice being paid.
    pub invoice: Invoice,
    /// Payment to record.
    pub payment: Payment,
}

/// Request body for duplicating an invoice.
#[derive(Debug, Deserialize)]
pub struct DuplicateRequest {
    /// Invoice to copy.
    pub invoice: Invoice,
    /// Numbering state; the configured defaults are used when absent.
    #[serde(default)]
    pub numbering: Option<InvoiceNumbering>,
    /// Year printed in the new number; the current year when absent.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Response for a duplicated invoice.
#[derive(Debug, Serialize)]
pub struct DuplicateResponse {
    /// The new draft invoice.
    pub invoice: Invoice,
    /// Numbering state after allocating the new number.
    pub numbering: InvoiceNumbering,
}

/// Request body for listing invoices.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Invoices to search.
    pub invoices: Vec<Invoice>,
    /// Filters, sort and page.
    #[serde(default)]
    pub query: InvoiceQuery,
}

/// Request body for the dashboard summary.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    /// Invoices to summarize.
    pub invoices: Vec<Invoice>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn recalculate(
    State(state): State<AppState>,
    Json(invoice): Json<Invoice>,
) -> Result<Json<Invoice>, ApiError> {
    validate_calculation_input(&invoice.items, &invoice.options, &state.limits())?;

    let now = Utc::now();
    let invoice = InvoiceService::recalculate(invoice, now.date_naive(), now);

    info!(
        invoice_number = %invoice.invoice_number,
        status = ?invoice.status,
        "Invoice recalculated"
    );

    Ok(Json(invoice))
}

async fn record_payment(
    State(state): State<AppState>,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<Json<Invoice>, ApiError> {
    validate_calculation_input(
        &payload.invoice.items,
        &payload.invoice.options,
        &state.limits(),
    )?;

    let invoice = PaymentService::record_payment(payload.invoice, payload.payment, Utc::now())?;
    Ok(Json(invoice))
}

async fn duplicate(
    State(state): State<AppState>,
    Json(payload): Json<DuplicateRequest>,
) -> Result<Json<DuplicateResponse>, ApiError> {
    validate_calculation_input(
        &payload.invoice.items,
        &payload.invoice.options,
        &state.limits(),
    )?;

    let now = Utc::now();
    let year = payload.year.unwrap_or_else(|| now.year());
    let mut numbering = payload
        .numbering
        .unwrap_or_else(|| state.default_numbering());
    let invoice_number = numbering.allocate(year)?;

    let invoice = InvoiceService::duplicate(&payload.invoice, InvoiceId::new(), invoice_number, now);

    info!(
        source = %payload.invoice.invoice_number,
        invoice_number = %invoice.invoice_number,
        "Invoice duplicated"
    );

    Ok(Json(DuplicateResponse { invoice, numbering }))
}

async fn search(Json(payload): Json<SearchRequest>) -> Json<PageResponse<Invoice>> {
    let today = Utc::now().date_naive();
    Json(search_invoices(payload.invoices, &payload.query, today))
}

async fn summary(
    Json(payload): Json<SummaryRequest>,
) -> Result<Json<PortfolioSummary>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(summarize(&payload.invoices, today)?))
}
