//! Invoice portfolio listing and dashboard summary.

pub mod error;
pub mod query;
pub mod summary;

pub use error::PortfolioError;
pub use query::{InvoiceQuery, SortDirection, SortField, search_invoices};
pub use summary::{PAID_WINDOW_DAYS, PortfolioSummary, summarize};
