//! Sequential invoice numbering.
//!
//! Numbers look like `INV-2026-0001`: a prefix, the issue year and a
//! zero-padded sequence. The sequence state is an explicit value owned by
//! the caller, who persists it between allocations.

pub mod error;
pub mod sequence;

pub use error::NumberingError;
pub use sequence::{InvoiceNumbering, MAX_PADDING, format_invoice_number, parse_invoice_number};
