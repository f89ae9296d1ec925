//! Invoice records and lifecycle rules.
//!
//! This module implements:
//! - The invoice record with its items, options, payments and stored totals
//! - Status and payment-terms types
//! - Overdue detection
//! - Totals computation with payment overlay, recalculation and duplication

pub mod service;
pub mod types;

pub use service::InvoiceService;
pub use types::{Invoice, InvoiceStatus, PaymentTerms};
