//! Invoice aggregation.
//!
//! Folds evaluated lines and invoice-level options into [`InvoiceTotals`].
//! The order of steps is fixed:
//!
//! 1. Sum line extensions, line discounts and post-discount amounts.
//! 2. Bucket line tax by (name, rate) in first-seen order.
//! 3. Apply the invoice-level discount to the post-line-discount total. Line
//!    taxes computed in step 2 are not reduced by it.
//! 4. Sum tax buckets.
//! 5. Add shipping (untaxed).
//! 6. Compute withholding on the gross amount.
//! 7. Apply the rounding mode to the grand total; round everything else to cents.
//!
//! Every sum saturates at the `Decimal` range. Input that passed
//! [`validate_calculation_input`](super::validate_calculation_input) never
//! gets near it.

use rust_decimal::Decimal;
use tracing::debug;

use super::line::evaluate_line;
use super::rounding::{round_money, round_with_mode};
use super::types::{CalculationOptions, InvoiceTotals, LineItem, TaxSummaryEntry};

/// Calculates the complete totals of an invoice.
///
/// This is a total function: it never fails and never mutates its inputs.
/// The returned totals carry `paid_amount = 0` and `due_amount = grand_total`;
/// callers overlay payment history themselves.
///
/// In tax-inclusive mode the taxable total already contains the line taxes,
/// so the gross amount is the taxable total itself. In exclusive mode the tax
/// total is added on top.
#[must_use]
pub fn calculate_invoice_totals(items: &[LineItem], options: &CalculationOptions) -> InvoiceTotals {
    let mut subtotal = Decimal::ZERO;
    let mut discount_total = Decimal::ZERO;
    let mut taxable_total = Decimal::ZERO;
    let mut buckets: Vec<TaxSummaryEntry> = Vec::new();

    for item in items {
        let line = evaluate_line(item, options.tax_inclusive);
        subtotal = subtotal.saturating_add(line.line_extension);
        discount_total = discount_total.saturating_add(line.line_discount);
        taxable_total = taxable_total.saturating_add(line.after_discount);

        if let Some(tax) = &item.tax {
            match buckets
                .iter_mut()
                .find(|bucket| bucket.name == tax.name && bucket.rate == tax.rate)
            {
                Some(bucket) => bucket.amount = bucket.amount.saturating_add(line.line_tax),
                None => buckets.push(TaxSummaryEntry {
                    name: tax.name.clone(),
                    rate: tax.rate,
                    amount: line.line_tax,
                }),
            }
        }
    }

    if let Some(discount) = options.invoice_level_discount {
        let invoice_discount = discount.amount_of(taxable_total);
        discount_total = discount_total.saturating_add(invoice_discount);
        taxable_total = taxable_total.saturating_sub(invoice_discount);
    }

    let tax_total = buckets
        .iter()
        .fold(Decimal::ZERO, |total, bucket| total.saturating_add(bucket.amount));
    let shipping_total = options.shipping_amount.unwrap_or(Decimal::ZERO);

    let gross_total = if options.tax_inclusive {
        taxable_total
    } else {
        taxable_total.saturating_add(tax_total)
    };

    let withholding = options
        .withholding_tax
        .map_or(Decimal::ZERO, |withholding| withholding.amount_of(gross_total));

    let raw_grand_total = gross_total
        .saturating_add(shipping_total)
        .saturating_sub(withholding);
    let grand_total = round_with_mode(raw_grand_total, options.rounding_mode);

    debug!(
        lines = items.len(),
        tax_buckets = buckets.len(),
        tax_inclusive = options.tax_inclusive,
        %grand_total,
        "Calculated invoice totals"
    );

    InvoiceTotals {
        subtotal: round_money(subtotal),
        discount_total: round_money(discount_total),
        taxable_total: round_money(taxable_total),
        tax_total: round_money(tax_total),
        tax_summary: buckets
            .into_iter()
            .map(|bucket| TaxSummaryEntry {
                amount: round_money(bucket.amount),
                ..bucket
            })
            .collect(),
        shipping_total: round_money(shipping_total),
        withholding_tax: (!withholding.is_zero()).then(|| round_money(withholding)),
        grand_total,
        paid_amount: round_money(Decimal::ZERO),
        due_amount: grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::types::{Adjustment, RoundingMode};
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_items() {
        let totals = calculate_invoice_totals(&[], &CalculationOptions::exclusive());

        assert_eq!(totals.subtotal, dec!(0));
        assert_eq!(totals.discount_total, dec!(0));
        assert_eq!(totals.taxable_total, dec!(0));
        assert_eq!(totals.tax_total, dec!(0));
        assert!(totals.tax_summary.is_empty());
        assert_eq!(totals.shipping_total, dec!(0));
        assert_eq!(totals.withholding_tax, None);
        assert_eq!(totals.grand_total, dec!(0));
        assert_eq!(totals.paid_amount, dec!(0));
        assert_eq!(totals.due_amount, totals.grand_total);
    }

    #[test]
    fn test_single_line_exclusive_tax() {
        let items = vec![LineItem::new(dec!(2), dec!(100)).with_tax("VAT", dec!(20))];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(totals.subtotal, dec!(200));
        assert_eq!(totals.taxable_total, dec!(200));
        assert_eq!(totals.tax_total, dec!(40));
        assert_eq!(totals.grand_total, dec!(240));
        assert_eq!(totals.due_amount, dec!(240));
    }

    #[test]
    fn test_single_line_inclusive_tax_does_not_inflate_total() {
        let items = vec![LineItem::new(dec!(1), dec!(120)).with_tax("VAT", dec!(20))];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::inclusive());

        assert_eq!(totals.subtotal, dec!(120));
        assert_eq!(totals.tax_total, dec!(20));
        assert_eq!(totals.tax_summary[0].amount, dec!(20));
        assert_eq!(totals.grand_total, dec!(120));
    }

    #[test]
    fn test_percent_line_discount() {
        let items =
            vec![LineItem::new(dec!(1), dec!(100)).with_discount(Adjustment::Percent(dec!(10)))];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(totals.discount_total, dec!(10));
        assert_eq!(totals.taxable_total, dec!(90));
        assert_eq!(totals.grand_total, dec!(90));
    }

    #[test]
    fn test_invoice_level_discount_composes_with_lines() {
        let items = vec![
            LineItem::new(dec!(1), dec!(100)),
            LineItem::new(dec!(2), dec!(50)),
        ];
        let options = CalculationOptions {
            invoice_level_discount: Some(Adjustment::Percent(dec!(10))),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.subtotal, dec!(200));
        assert_eq!(totals.discount_total, dec!(20));
        assert_eq!(totals.taxable_total, dec!(180));
        assert_eq!(totals.grand_total, dec!(180));
    }

    #[test]
    fn test_invoice_level_discount_does_not_reduce_line_tax() {
        let items = vec![LineItem::new(dec!(1), dec!(100)).with_tax("VAT", dec!(20))];
        let options = CalculationOptions {
            invoice_level_discount: Some(Adjustment::Fixed(dec!(50))),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.taxable_total, dec!(50));
        assert_eq!(totals.tax_total, dec!(20));
        assert_eq!(totals.grand_total, dec!(70));
    }

    #[test]
    fn test_invoice_discount_applies_after_line_discounts() {
        let items = vec![
            LineItem::new(dec!(1), dec!(200)).with_discount(Adjustment::Fixed(dec!(100))),
        ];
        let options = CalculationOptions {
            invoice_level_discount: Some(Adjustment::Percent(dec!(50))),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.discount_total, dec!(150));
        assert_eq!(totals.taxable_total, dec!(50));
    }

    #[test]
    fn test_multi_rate_tax_aggregation() {
        let items = vec![
            LineItem::new(dec!(1), dec!(100)).with_tax("VAT", dec!(20)),
            LineItem::new(dec!(1), dec!(200)).with_tax("Reduced VAT", dec!(5)),
            LineItem::new(dec!(1), dec!(50)).with_tax("VAT", dec!(20)),
            LineItem::new(dec!(1), dec!(10)),
        ];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(totals.tax_summary.len(), 2);
        assert_eq!(totals.tax_summary[0].name, "VAT");
        assert_eq!(totals.tax_summary[0].rate, dec!(20));
        assert_eq!(totals.tax_summary[0].amount, dec!(30));
        assert_eq!(totals.tax_summary[1].name, "Reduced VAT");
        assert_eq!(totals.tax_summary[1].amount, dec!(10));
        assert_eq!(totals.tax_total, dec!(40));
        assert_eq!(totals.grand_total, dec!(400));
    }

    #[test]
    fn test_same_name_different_rate_are_separate_buckets() {
        let items = vec![
            LineItem::new(dec!(1), dec!(100)).with_tax("GST", dec!(5)),
            LineItem::new(dec!(1), dec!(100)).with_tax("GST", dec!(12)),
        ];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(totals.tax_summary.len(), 2);
        assert_eq!(totals.tax_summary[0].amount, dec!(5));
        assert_eq!(totals.tax_summary[1].amount, dec!(12));
    }

    #[test]
    fn test_rate_scale_does_not_split_buckets() {
        let items = vec![
            LineItem::new(dec!(1), dec!(100)).with_tax("VAT", dec!(20)),
            LineItem::new(dec!(1), dec!(100)).with_tax("VAT", dec!(20.00)),
        ];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(totals.tax_summary.len(), 1);
        assert_eq!(totals.tax_summary[0].amount, dec!(40));
    }

    #[test]
    fn test_rounding_modes_apply_to_grand_total_only() {
        let items = vec![LineItem::new(dec!(1), dec!(99.995))];

        let up = calculate_invoice_totals(
            &items,
            &CalculationOptions {
                rounding_mode: RoundingMode::Up,
                ..CalculationOptions::exclusive()
            },
        );
        let down = calculate_invoice_totals(
            &items,
            &CalculationOptions {
                rounding_mode: RoundingMode::Down,
                ..CalculationOptions::exclusive()
            },
        );
        let standard = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(up.grand_total, dec!(100.00));
        assert_eq!(down.grand_total, dec!(99.99));
        assert_eq!(standard.grand_total, dec!(100.00));
        assert_eq!(down.subtotal, dec!(100.00));
        assert_eq!(down.due_amount, dec!(99.99));
    }

    #[test]
    fn test_percent_withholding() {
        let items = vec![LineItem::new(dec!(1), dec!(100))];
        let options = CalculationOptions {
            withholding_tax: Some(Adjustment::Percent(dec!(10))),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.withholding_tax, Some(dec!(10)));
        assert_eq!(totals.grand_total, dec!(90));
    }

    #[test]
    fn test_withholding_base_includes_tax() {
        let items = vec![LineItem::new(dec!(1), dec!(100)).with_tax("VAT", dec!(20))];
        let options = CalculationOptions {
            withholding_tax: Some(Adjustment::Percent(dec!(10))),
            shipping_amount: Some(dec!(30)),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.withholding_tax, Some(dec!(12)));
        assert_eq!(totals.grand_total, dec!(138));
    }

    #[test]
    fn test_zero_withholding_is_absent() {
        let items = vec![LineItem::new(dec!(1), dec!(100))];
        let options = CalculationOptions {
            withholding_tax: Some(Adjustment::Percent(dec!(0))),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.withholding_tax, None);
        assert_eq!(totals.grand_total, dec!(100));
    }

    #[test]
    fn test_negative_fixed_withholding_is_reported() {
        let items = vec![LineItem::new(dec!(1), dec!(100))];
        let options = CalculationOptions {
            withholding_tax: Some(Adjustment::Fixed(dec!(-5))),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.withholding_tax, Some(dec!(-5)));
        assert_eq!(totals.grand_total, dec!(105));
    }

    #[test]
    fn test_shipping_is_not_taxed() {
        let items = vec![LineItem::new(dec!(1), dec!(100)).with_tax("VAT", dec!(20))];
        let options = CalculationOptions {
            shipping_amount: Some(dec!(15)),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.shipping_total, dec!(15));
        assert_eq!(totals.tax_total, dec!(20));
        assert_eq!(totals.tax_summary[0].amount, dec!(20));
        assert_eq!(totals.grand_total, dec!(135));
    }

    #[test]
    fn test_inclusive_mode_with_discount_and_shipping() {
        let items = vec![
            LineItem::new(dec!(2), dec!(60))
                .with_tax("VAT", dec!(20))
                .with_discount(Adjustment::Percent(dec!(50))),
        ];
        let options = CalculationOptions {
            shipping_amount: Some(dec!(5)),
            ..CalculationOptions::inclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.subtotal, dec!(120));
        assert_eq!(totals.discount_total, dec!(60));
        assert_eq!(totals.taxable_total, dec!(60));
        assert_eq!(totals.tax_total, dec!(10));
        assert_eq!(totals.grand_total, dec!(65));
    }

    #[test]
    fn test_inclusive_withholding_uses_taxable_total_as_base() {
        let items = vec![LineItem::new(dec!(1), dec!(120)).with_tax("VAT", dec!(20))];
        let options = CalculationOptions {
            withholding_tax: Some(Adjustment::Percent(dec!(10))),
            ..CalculationOptions::inclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.taxable_total, dec!(120));
        assert_eq!(totals.withholding_tax, Some(dec!(12)));
        assert_eq!(totals.grand_total, dec!(108));
    }

    #[test]
    fn test_inclusive_invoice_discount_keeps_line_tax() {
        let items = vec![LineItem::new(dec!(1), dec!(120)).with_tax("VAT", dec!(20))];
        let options = CalculationOptions {
            invoice_level_discount: Some(Adjustment::Fixed(dec!(20))),
            ..CalculationOptions::inclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.discount_total, dec!(20));
        assert_eq!(totals.taxable_total, dec!(100));
        assert_eq!(totals.tax_total, dec!(20));
        assert_eq!(totals.grand_total, dec!(100));
    }

    #[test]
    fn test_fixed_invoice_discount_larger_than_taxable_total() {
        let items = vec![LineItem::new(dec!(1), dec!(50)).with_tax("VAT", dec!(20))];
        let options = CalculationOptions {
            invoice_level_discount: Some(Adjustment::Fixed(dec!(80))),
            ..CalculationOptions::exclusive()
        };
        let totals = calculate_invoice_totals(&items, &options);

        assert_eq!(totals.discount_total, dec!(80));
        assert_eq!(totals.taxable_total, dec!(-30));
        assert_eq!(totals.tax_total, dec!(10));
        assert_eq!(totals.grand_total, dec!(-20));
        assert_eq!(totals.due_amount, dec!(-20));
    }

    #[test]
    fn test_out_of_range_input_saturates_instead_of_panicking() {
        let items = vec![
            LineItem::new(dec!(1), Decimal::MAX),
            LineItem::new(dec!(1), Decimal::MAX).with_tax("VAT", dec!(20)),
        ];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.grand_total, Decimal::MAX);

        let huge_rate = vec![
            LineItem::new(dec!(1000000000000), dec!(1000000000000))
                .with_tax("Luxury", dec!(1000000)),
        ];
        let totals = calculate_invoice_totals(&huge_rate, &CalculationOptions::exclusive());

        assert_eq!(totals.subtotal, dec!(1000000000000000000000000));
        assert!(totals.grand_total > totals.subtotal);
    }

    #[test]
    fn test_credit_line_reduces_totals() {
        let items = vec![
            LineItem::new(dec!(1), dec!(100)),
            LineItem::new(dec!(1), dec!(-30)),
        ];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(totals.subtotal, dec!(70));
        assert_eq!(totals.grand_total, dec!(70));
    }

    #[test]
    fn test_tax_amounts_are_rounded_independently() {
        let items = vec![
            LineItem::new(dec!(1), dec!(0.05)).with_tax("VAT", dec!(10)),
            LineItem::new(dec!(1), dec!(0.05)).with_tax("GST", dec!(10)),
        ];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        // Each bucket holds 0.005 which rounds to 0.01; the total of 0.010 also rounds to 0.01.
        assert_eq!(totals.tax_summary[0].amount, dec!(0.01));
        assert_eq!(totals.tax_summary[1].amount, dec!(0.01));
        assert_eq!(totals.tax_total, dec!(0.01));
    }

    #[test]
    fn test_reported_amounts_have_two_decimal_places() {
        let items = vec![LineItem::new(dec!(2), dec!(100)).with_tax("VAT", dec!(20))];
        let totals = calculate_invoice_totals(&items, &CalculationOptions::exclusive());

        assert_eq!(totals.subtotal.to_string(), "200.00");
        assert_eq!(totals.grand_total.to_string(), "240.00");
        assert_eq!(totals.paid_amount.to_string(), "0.00");
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let items = vec![LineItem::new(dec!(3), dec!(33.333)).with_tax("VAT", dec!(7))];
        let options = CalculationOptions::exclusive();
        let items_before = items.clone();

        let first = calculate_invoice_totals(&items, &options);
        let second = calculate_invoice_totals(&items, &options);

        assert_eq!(first, second);
        assert_eq!(items, items_before);
    }
}
