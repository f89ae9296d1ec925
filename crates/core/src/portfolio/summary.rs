//! Dashboard summary over a set of invoices.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PortfolioError;
use crate::calculation::round_money;
use crate::invoice::{Invoice, InvoiceStatus};

/// Window for the "paid recently" figure.
pub const PAID_WINDOW_DAYS: u64 = 30;

/// Aggregate figures for a set of invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of due amounts of sent and overdue invoices.
    pub total_outstanding: Decimal,
    /// Sum of grand totals of invoices paid within the last 30 days.
    pub paid_last_30_days: Decimal,
    /// Number of overdue invoices, by status or by due date.
    pub overdue_count: usize,
    /// Number of draft invoices.
    pub draft_count: usize,
}

/// Summarizes a set of invoices as of `today`.
///
/// A paid invoice counts towards the recent total when its last update falls
/// within the window.
///
/// # Errors
///
/// Returns `PortfolioError::AmountOutOfRange` if either sum overflows.
pub fn summarize(
    invoices: &[Invoice],
    today: NaiveDate,
) -> Result<PortfolioSummary, PortfolioError> {
    let window_start = today
        .checked_sub_days(Days::new(PAID_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);

    let mut total_outstanding = Decimal::ZERO;
    let mut paid_last_30_days = Decimal::ZERO;
    let mut overdue_count = 0;
    let mut draft_count = 0;

    for invoice in invoices {
        match invoice.status {
            InvoiceStatus::Sent | InvoiceStatus::Overdue => {
                let due = invoice
                    .totals
                    .as_ref()
                    .map_or(Decimal::ZERO, |totals| totals.due_amount);
                total_outstanding = total_outstanding
                    .checked_add(due)
                    .ok_or(PortfolioError::AmountOutOfRange("total_outstanding"))?;
            }
            InvoiceStatus::Paid if invoice.updated_at.date_naive() >= window_start => {
                paid_last_30_days = paid_last_30_days
                    .checked_add(invoice.grand_total())
                    .ok_or(PortfolioError::AmountOutOfRange("paid_last_30_days"))?;
            }
            InvoiceStatus::Draft => draft_count += 1,
            _ => {}
        }

        if invoice.status == InvoiceStatus::Overdue || invoice.is_overdue(today) {
            overdue_count += 1;
        }
    }

    Ok(PortfolioSummary {
        total_outstanding: round_money(total_outstanding),
        paid_last_30_days: round_money(paid_last_30_days),
        overdue_count,
        draft_count,
    })
}
