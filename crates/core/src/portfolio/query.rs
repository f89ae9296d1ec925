//! Invoice listing: filter, sort and paginate.

use std::cmp::Ordering;

use chrono::NaiveDate;
use invoicer_shared::types::{Currency, PageRequest, PageResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::{Invoice, InvoiceStatus};

/// Sortable invoice fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Issue date.
    IssueDate,
    /// Due date; invoices without one sort first in ascending order.
    DueDate,
    /// Invoice number, case-insensitive.
    InvoiceNumber,
    /// Stored grand total.
    Total,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

/// Invoice listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceQuery {
    /// Only invoices with this status (after the overdue refresh).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    /// Case-insensitive match on invoice number, reference or client name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Only invoices in this currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Earliest issue date, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest issue date, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Smallest grand total, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_total: Option<Decimal>,
    /// Largest grand total, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total: Option<Decimal>,
    /// Sort field.
    #[serde(default)]
    pub sort_by: SortField,
    /// Sort direction.
    #[serde(default)]
    pub sort_dir: SortDirection,
    /// Page to return.
    #[serde(flatten)]
    pub page: PageRequest,
}

impl InvoiceQuery {
    /// Returns true if the invoice passes every filter.
    #[must_use]
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if self.status.is_some_and(|status| invoice.status != status) {
            return false;
        }
        if self
            .currency
            .is_some_and(|currency| invoice.currency != currency)
        {
            return false;
        }
        if self.start_date.is_some_and(|start| invoice.issue_date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| invoice.issue_date > end) {
            return false;
        }

        let total = invoice.grand_total();
        if self.min_total.is_some_and(|min| total < min) {
            return false;
        }
        if self.max_total.is_some_and(|max| total > max) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => matches_search(invoice, &term.to_lowercase()),
            _ => true,
        }
    }

    fn compare(&self, a: &Invoice, b: &Invoice) -> Ordering {
        let ordering = match self.sort_by {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::IssueDate => a.issue_date.cmp(&b.issue_date),
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::InvoiceNumber => a
                .invoice_number
                .to_lowercase()
                .cmp(&b.invoice_number.to_lowercase()),
            SortField::Total => a.grand_total().cmp(&b.grand_total()),
        };
        match self.sort_dir {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn matches_search(invoice: &Invoice, term: &str) -> bool {
    invoice.invoice_number.to_lowercase().contains(term)
        || invoice
            .reference
            .as_ref()
            .is_some_and(|reference| reference.to_lowercase().contains(term))
        || invoice.client_name.to_lowercase().contains(term)
}

/// Lists invoices matching a query.
///
/// Sent invoices past their due date are reported as overdue before filtering.
/// Sorting is stable, so invoices with equal keys keep their input order.
#[must_use]
pub fn search_invoices(
    invoices: Vec<Invoice>,
    query: &InvoiceQuery,
    today: NaiveDate,
) -> PageResponse<Invoice> {
    let mut matching: Vec<Invoice> = invoices
        .into_iter()
        .map(|mut invoice| {
            invoice.refresh_status(today);
            invoice
        })
        .filter(|invoice| query.matches(invoice))
        .collect();

    matching.sort_by(|a, b| query.compare(a, b));

    PageRequest::new(query.page.page, query.page.per_page).paginate(matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::LineItem;
    use crate::invoice::InvoiceService;
    use chrono::{TimeZone, Utc};
    use invoicer_shared::types::{ClientId, InvoiceId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(number: &str, client: &str, issue: NaiveDate, amount: Decimal) -> Invoice {
        let created = Utc.from_utc_datetime(&issue.and_hms_opt(9, 0, 0).unwrap());
        let mut invoice = Invoice::new(InvoiceId::new(), number, ClientId::new(), issue, created);
        invoice.client_name = client.to_string();
        invoice.items = vec![LineItem::new(dec!(1), amount)];
        invoice.totals = Some(InvoiceService::compute_totals(&invoice));
        invoice
    }

    fn portfolio() -> Vec<Invoice> {
        let mut first = invoice("INV-2026-0001", "Acme Corp", date(2026, 1, 5), dec!(500));
        first.status = InvoiceStatus::Paid;
        first.currency = Currency::Eur;

        let mut second = invoice("INV-2026-0002", "Globex", date(2026, 2, 10), dec!(1200));
        second.status = InvoiceStatus::Sent;
        second.due_date = Some(date(2026, 3, 10));
        second.reference = Some("PO-ACME-9".to_string());

        let third = invoice("INV-2026-0003", "Initech", date(2026, 3, 1), dec!(80));

        vec![first, second, third]
    }

    fn numbers(page: &PageResponse<Invoice>) -> Vec<&str> {
        page.data.iter().map(|i| i.invoice_number.as_str()).collect()
    }

    #[test]
    fn test_default_query_sorts_newest_first() {
        let page = search_invoices(portfolio(), &InvoiceQuery::default(), date(2026, 3, 5));

        assert_eq!(
            numbers(&page),
            vec!["INV-2026-0003", "INV-2026-0002", "INV-2026-0001"]
        );
        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.per_page, 10);
    }

    #[test]
    fn test_search_matches_number_reference_and_client() {
        let query = InvoiceQuery {
            search: Some("acme".to_string()),
            sort_dir: SortDirection::Asc,
            ..InvoiceQuery::default()
        };
        let page = search_invoices(portfolio(), &query, date(2026, 3, 5));

        assert_eq!(numbers(&page), vec!["INV-2026-0001", "INV-2026-0002"]);

        let query = InvoiceQuery {
            search: Some("0003".to_string()),
            ..InvoiceQuery::default()
        };
        let page = search_invoices(portfolio(), &query, date(2026, 3, 5));
        assert_eq!(numbers(&page), vec!["INV-2026-0003"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let query = InvoiceQuery {
            search: Some("   ".to_string()),
            ..InvoiceQuery::default()
        };
        let page = search_invoices(portfolio(), &query, date(2026, 3, 5));
        assert_eq!(page.meta.total, 3);
    }

    #[test]
    fn test_status_filter_sees_refreshed_overdue() {
        let query = InvoiceQuery {
            status: Some(InvoiceStatus::Overdue),
            ..InvoiceQuery::default()
        };

        let before_due = search_invoices(portfolio(), &query, date(2026, 3, 10));
        assert!(before_due.data.is_empty());

        let after_due = search_invoices(portfolio(), &query, date(2026, 3, 11));
        assert_eq!(numbers(&after_due), vec!["INV-2026-0002"]);
        assert_eq!(after_due.data[0].status, InvoiceStatus::Overdue);
    }

    #[test]
    fn test_date_currency_and_total_filters() {
        let query = InvoiceQuery {
            start_date: Some(date(2026, 1, 5)),
            end_date: Some(date(2026, 2, 10)),
            ..InvoiceQuery::default()
        };
        let page = search_invoices(portfolio(), &query, date(2026, 3, 5));
        assert_eq!(numbers(&page), vec!["INV-2026-0002", "INV-2026-0001"]);

        let query = InvoiceQuery {
            currency: Some(Currency::Eur),
            ..InvoiceQuery::default()
        };
        let page = search_invoices(portfolio(), &query, date(2026, 3, 5));
        assert_eq!(numbers(&page), vec!["INV-2026-0001"]);

        let query = InvoiceQuery {
            min_total: Some(dec!(80)),
            max_total: Some(dec!(500)),
            sort_by: SortField::Total,
            sort_dir: SortDirection::Asc,
            ..InvoiceQuery::default()
        };
        let page = search_invoices(portfolio(), &query, date(2026, 3, 5));
        assert_eq!(numbers(&page), vec!["INV-2026-0003", "INV-2026-0001"]);
    }

    #[test]
    fn test_sort_by_due_date_puts_missing_first_ascending() {
        let query = InvoiceQuery {
            sort_by: SortField::DueDate,
            sort_dir: SortDirection::Asc,
            ..InvoiceQuery::default()
        };
        let page = search_invoices(portfolio(), &query, date(2026, 3, 5));

        assert_eq!(
            numbers(&page),
            vec!["INV-2026-0001", "INV-2026-0003", "INV-2026-0002"]
        );
    }

    #[test]
    fn test_sort_by_invoice_number_ignores_case() {
        let mut invoices = portfolio();
        invoices[1].invoice_number = "inv-2026-0002".to_string();
        let query = InvoiceQuery {
            sort_by: SortField::InvoiceNumber,
            sort_dir: SortDirection::Asc,
            ..InvoiceQuery::default()
        };
        let page = search_invoices(invoices, &query, date(2026, 3, 5));

        assert_eq!(
            numbers(&page),
            vec!["INV-2026-0001", "inv-2026-0002", "INV-2026-0003"]
        );
    }

    #[test]
    fn test_pagination() {
        let query = InvoiceQuery {
            sort_dir: SortDirection::Asc,
            page: PageRequest::new(2, 2),
            ..InvoiceQuery::default()
        };
        let page = search_invoices(portfolio(), &query, date(2026, 3, 5));

        assert_eq!(numbers(&page), vec!["INV-2026-0003"]);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.total_pages, 2);
    }

    #[test]
    fn test_query_deserializes_flat_page_fields() {
        let query: InvoiceQuery =
            serde_json::from_str(r#"{"status": "SENT", "sort_by": "total", "page": 3}"#).unwrap();

        assert_eq!(query.status, Some(InvoiceStatus::Sent));
        assert_eq!(query.sort_by, SortField::Total);
        assert_eq!(query.sort_dir, SortDirection::Desc);
        assert_eq!(query.page.page, 3);
        assert_eq!(query.page.per_page, 10);
    }
}
