//! Payment types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payment received against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Amount received, in the invoice currency.
    pub amount: Decimal,
    /// Date the payment was received.
    pub date: NaiveDate,
    /// Payment method (bank transfer, card, cash).
    #[serde(default)]
    pub method: String,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Payment {
    /// Creates a payment without a note.
    #[must_use]
    pub fn new(amount: Decimal, date: NaiveDate, method: impl Into<String>) -> Self {
        Self {
            amount,
            date,
            method: method.into(),
            note: None,
        }
    }
}
