//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the invoicing core
//! - Error-to-response mapping
//!
//! The API is stateless: callers send the invoices they want computed and
//! persist the results themselves.

pub mod error;
pub mod routes;

use axum::Router;
use invoicer_core::calculation::CalculationLimits;
use invoicer_core::numbering::InvoiceNumbering;
use invoicer_shared::InvoicingConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Invoicing configuration.
    pub invoicing: Arc<InvoicingConfig>,
}

impl AppState {
    /// Creates application state from the invoicing configuration.
    #[must_use]
    pub fn new(invoicing: InvoicingConfig) -> Self {
        Self {
            invoicing: Arc::new(invoicing),
        }
    }

    /// Returns the input limits applied before any calculation.
    #[must_use]
    pub fn limits(&self) -> CalculationLimits {
        CalculationLimits {
            max_line_items: self.invoicing.max_line_items,
            max_amount: self.invoicing.max_amount,
            max_tax_rate: self.invoicing.max_tax_rate,
        }
    }

    /// Returns a fresh numbering record with the configured prefix and padding.
    #[must_use]
    pub fn default_numbering(&self) -> InvoiceNumbering {
        InvoiceNumbering::new(
            self.invoicing.number_prefix.clone(),
            self.invoicing.number_padding,
        )
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
