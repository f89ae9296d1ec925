//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod calculation;
pub mod health;
pub mod invoices;
pub mod numbering;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(calculation::routes())
        .merge(invoices::routes())
        .merge(numbering::routes())
}
