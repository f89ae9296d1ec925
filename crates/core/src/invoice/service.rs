//! Invoice service for totals and lifecycle operations.

use chrono::{DateTime, NaiveDate, Utc};
use invoicer_shared::types::InvoiceId;
use tracing::debug;

use super::types::{Invoice, InvoiceStatus};
use crate::calculation::{InvoiceTotals, calculate_invoice_totals, round_money};

/// Invoice service for business logic.
pub struct InvoiceService;

impl InvoiceService {
    /// Computes the totals of an invoice, carrying over its payment state.
    ///
    /// When the invoice already has totals, the paid amount is kept and the
    /// due amount becomes `grand_total - paid_amount`. The due amount is not
    /// clamped here, so editing an invoice below what was already paid shows
    /// up as a negative due amount.
    #[must_use]
    pub fn compute_totals(invoice: &Invoice) -> InvoiceTotals {
        let mut totals = calculate_invoice_totals(&invoice.items, &invoice.calculation_options());

        if let Some(previous) = &invoice.totals {
            totals.paid_amount = round_money(previous.paid_amount);
            let due = totals.grand_total.saturating_sub(previous.paid_amount);
            totals.due_amount = round_money(due);
        }

        totals
    }

    /// Recomputes totals, fills a missing due date from the payment terms and
    /// refreshes the overdue status.
    #[must_use]
    pub fn recalculate(mut invoice: Invoice, today: NaiveDate, now: DateTime<Utc>) -> Invoice {
        if invoice.due_date.is_none() {
            invoice.due_date = invoice.effective_due_date();
        }
        invoice.totals = Some(Self::compute_totals(&invoice));

        if invoice.refresh_status(today) {
            debug!(invoice_number = %invoice.invoice_number, "Invoice is overdue");
        }
        invoice.updated_at = now;
        invoice
    }

    /// Creates a draft copy of an invoice under a new id and number.
    ///
    /// Payments are not copied, so the copy starts fully due.
    #[must_use]
    pub fn duplicate(
        source: &Invoice,
        new_id: InvoiceId,
        invoice_number: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Invoice {
        let mut copy = Invoice {
            id: new_id,
            invoice_number: invoice_number.into(),
            status: InvoiceStatus::Draft,
            payments: Vec::new(),
            totals: None,
            created_at: now,
            updated_at: now,
            ..source.clone()
        };
        copy.totals = Some(Self::compute_totals(&copy));
        copy
    }
}
