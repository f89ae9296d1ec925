//! Payment error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Payment recording errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Payment amount must be positive.
    #[error("Payment amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Payments cannot be recorded against a cancelled invoice.
    #[error("Cannot record a payment on cancelled invoice {0}")]
    InvoiceCancelled(String),

    /// The accumulated paid amount no longer fits a decimal.
    #[error("Paid amount on invoice {0} is out of range")]
    PaidAmountOutOfRange(String),
}
