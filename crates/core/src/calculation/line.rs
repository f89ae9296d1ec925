//! Line evaluation.
//!
//! Maps one line item to its extension, discount, post-discount amount and
//! tax. No range checks are applied here: negative quantities, fixed discounts
//! larger than the line, and rates above 100 all follow the arithmetic.
//! Products and differences saturate at the `Decimal` range instead of
//! overflowing.

use rust_decimal::Decimal;
use tracing::warn;

use super::types::{LineBreakdown, LineItem};

/// Evaluates a single line item.
///
/// In tax-inclusive mode the line amount is assumed to contain its tax, so the
/// tax is backed out as `after_discount × rate / (100 + rate)`. In exclusive
/// mode it is added on top as `after_discount × rate / 100`.
#[must_use]
pub fn evaluate_line(item: &LineItem, tax_inclusive: bool) -> LineBreakdown {
    let line_extension = item.quantity.saturating_mul(item.unit_price);
    let line_discount = item
        .discount
        .map_or(Decimal::ZERO, |discount| discount.amount_of(line_extension));
    let after_discount = line_extension.saturating_sub(line_discount);

    let line_tax = match &item.tax {
        None => Decimal::ZERO,
        Some(tax) if tax_inclusive => {
            let divisor = Decimal::ONE_HUNDRED.saturating_add(tax.rate);
            after_discount
                .saturating_mul(tax.rate)
                .checked_div(divisor)
                .unwrap_or_else(|| {
                    warn!(
                        tax_name = %tax.name,
                        rate = %tax.rate,
                        "Cannot back out inclusive tax at this rate, treating line tax as zero"
                    );
                    Decimal::ZERO
                })
        }
        Some(tax) => after_discount.saturating_mul(tax.rate) / Decimal::ONE_HUNDRED,
    };

    LineBreakdown {
        line_extension,
        line_discount,
        after_discount,
        line_tax,
    }
}

/// Evaluates every line in input order.
#[must_use]
pub fn evaluate_lines(items: &[LineItem], tax_inclusive: bool) -> Vec<LineBreakdown> {
    items
        .iter()
        .map(|item| evaluate_line(item, tax_inclusive))
        .collect()
}
