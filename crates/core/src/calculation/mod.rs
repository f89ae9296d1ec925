//! Invoice monetary calculation.
//!
//! This module implements the totals engine:
//! - Line evaluation (extension, discount, tax)
//! - Invoice aggregation (tax buckets, invoice discount, shipping, withholding)
//! - Cent rounding with configurable grand-total rounding
//! - Boundary validation for untrusted input

pub mod engine;
pub mod line;
pub mod rounding;
pub mod types;
pub mod validation;


pub use engine::calculate_invoice_totals;
pub use line::{evaluate_line, evaluate_lines};
pub use rounding::{MONEY_DECIMAL_PLACES, round_money, round_with_mode};
pub use types::{
    Adjustment, CalculationOptions, InvoiceTotals, LineBreakdown, LineItem, LineTax, RoundingMode,
    TaxSummaryEntry,
};
pub use validation::{CalculationError, CalculationLimits, validate_calculation_input};
