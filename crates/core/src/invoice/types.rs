//! Invoice record types.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use invoicer_shared::types::{ClientId, Currency, InvoiceId};

use crate::calculation::{CalculationOptions, InvoiceTotals, LineItem};
use crate::payment::Payment;

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Invoice is being prepared and has not been sent.
    #[default]
    Draft,
    /// Invoice has been sent to the client.
    Sent,
    /// Invoice has been paid in full.
    Paid,
    /// Invoice was sent and its due date has passed.
    Overdue,
    /// Invoice has been cancelled.
    Cancelled,
}

/// Payment terms used to derive the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentTerms {
    /// Due 7 days after issue.
    #[serde(rename = "NET_7")]
    Net7,
    /// Due 14 days after issue.
    #[serde(rename = "NET_14")]
    Net14,
    /// Due 15 days after issue.
    #[serde(rename = "NET_15")]
    Net15,
    /// Due 30 days after issue.
    #[serde(rename = "NET_30")]
    Net30,
    /// Due 60 days after issue.
    #[serde(rename = "NET_60")]
    Net60,
    /// Due after a custom number of days.
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl PaymentTerms {
    /// Returns the number of days between issue and due date.
    ///
    /// Custom terms return `custom_days`, which may be absent.
    #[must_use]
    pub const fn net_days(self, custom_days: Option<u32>) -> Option<u32> {
        match self {
            Self::Net7 => Some(7),
            Self::Net14 => Some(14),
            Self::Net15 => Some(15),
            Self::Net30 => Some(30),
            Self::Net60 => Some(60),
            Self::Custom => custom_days,
        }
    }

    /// Computes the due date for an invoice issued on `issue_date`.
    #[must_use]
    pub fn due_date(self, issue_date: NaiveDate, custom_days: Option<u32>) -> Option<NaiveDate> {
        let days = self.net_days(custom_days)?;
        issue_date.checked_add_days(Days::new(u64::from(days)))
    }
}

/// An invoice issued to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Human-readable invoice number (e.g., INV-2026-0001).
    pub invoice_number: String,
    /// Billed client.
    pub client_id: ClientId,
    /// Client display name, used by search.
    #[serde(default)]
    pub client_name: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Payment terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<PaymentTerms>,
    /// Day count for custom payment terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms_custom_days: Option<u32>,
    /// Invoice currency.
    #[serde(default)]
    pub currency: Currency,
    /// PO, contract or project reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Notes printed on the invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Line items.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Invoice-level calculation options.
    #[serde(default)]
    pub options: CalculationOptions,
    /// Current status.
    #[serde(default)]
    pub status: InvoiceStatus,
    /// Recorded payments, oldest first.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// Last computed totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<InvoiceTotals>,
    /// When the invoice was created.
    pub created_at: DateTime<Utc>,
    /// When the invoice was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates an empty draft invoice.
    #[must_use]
    pub fn new(
        id: InvoiceId,
        invoice_number: impl Into<String>,
        client_id: ClientId,
        issue_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            invoice_number: invoice_number.into(),
            client_id,
            client_name: String::new(),
            issue_date,
            due_date: None,
            payment_terms: None,
            payment_terms_custom_days: None,
            currency: Currency::default(),
            reference: None,
            notes: None,
            items: Vec::new(),
            options: CalculationOptions::default(),
            status: InvoiceStatus::Draft,
            payments: Vec::new(),
            totals: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the calculation options of this invoice.
    #[must_use]
    pub fn calculation_options(&self) -> CalculationOptions {
        self.options.clone()
    }

    /// Returns the due date, falling back to the one implied by the payment terms.
    #[must_use]
    pub fn effective_due_date(&self) -> Option<NaiveDate> {
        self.due_date.or_else(|| {
            self.payment_terms
                .and_then(|terms| terms.due_date(self.issue_date, self.payment_terms_custom_days))
        })
    }

    /// Returns the amount paid so far.
    #[must_use]
    pub fn paid_amount(&self) -> Decimal {
        self.totals
            .as_ref()
            .map_or(Decimal::ZERO, |totals| totals.paid_amount)
    }

    /// Returns the stored grand total, or zero when totals were never computed.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.totals
            .as_ref()
            .map_or(Decimal::ZERO, |totals| totals.grand_total)
    }

    /// Returns true if the invoice was sent and its due date is before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Sent && self.due_date.is_some_and(|due| due < today)
    }

    /// Marks a sent invoice past its due date as overdue.
    ///
    /// Returns true if the status changed.
    pub fn refresh_status(&mut self, today: NaiveDate) -> bool {
        if self.is_overdue(today) {
            self.status = InvoiceStatus::Overdue;
            true
        } else {
            false
        }
    }
}
