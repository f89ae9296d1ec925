//! Payment service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::error::PaymentError;
use super::types::Payment;
use crate::calculation::round_money;
use crate::invoice::{Invoice, InvoiceService, InvoiceStatus};

/// Payment service for business logic.
pub struct PaymentService;

impl PaymentService {
    /// Records a payment and returns the updated invoice.
    ///
    /// The paid amount accumulates across payments. The invoice becomes PAID
    /// once the paid amount reaches the grand total; otherwise its status is
    /// left unchanged. The due amount never drops below zero.
    ///
    /// Invoices without stored totals are computed first.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NonPositiveAmount` if the amount is zero or negative.
    /// Returns `PaymentError::InvoiceCancelled` if the invoice is cancelled.
    /// Returns `PaymentError::PaidAmountOutOfRange` if the accumulated paid
    /// amount overflows.
    pub fn record_payment(
        mut invoice: Invoice,
        payment: Payment,
        now: DateTime<Utc>,
    ) -> Result<Invoice, PaymentError> {
        if payment.amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount(payment.amount));
        }
        if invoice.status == InvoiceStatus::Cancelled {
            return Err(PaymentError::InvoiceCancelled(invoice.invoice_number));
        }

        let mut totals = match invoice.totals.take() {
            Some(totals) => totals,
            None => InvoiceService::compute_totals(&invoice),
        };

        let Some(paid) = totals.paid_amount.checked_add(payment.amount) else {
            return Err(PaymentError::PaidAmountOutOfRange(invoice.invoice_number));
        };
        let due = totals.grand_total.saturating_sub(paid).max(Decimal::ZERO);

        totals.paid_amount = round_money(paid);
        totals.due_amount = round_money(due);

        if paid >= totals.grand_total {
            invoice.status = InvoiceStatus::Paid;
        }

        info!(
            invoice_number = %invoice.invoice_number,
            amount = %payment.amount,
            paid = %totals.paid_amount,
            due = %totals.due_amount,
            "Recorded payment"
        );

        invoice.totals = Some(totals);
        invoice.payments.push(payment);
        invoice.updated_at = now;

        Ok(invoice)
    }
}
