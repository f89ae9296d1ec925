//! Calculation data types.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A percentage or fixed-amount adjustment.
///
/// Used for line discounts, the invoice-level discount and withholding tax.
/// Serialized as `{"kind": "percent" | "fixed", "value": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Adjustment {
    /// Percentage of the base, interpreted on a 0-100 scale.
    Percent(Decimal),
    /// Fixed amount, independent of the base.
    Fixed(Decimal),
}

impl Adjustment {
    /// Returns the adjustment amount for the given base.
    ///
    /// Fixed amounts are returned verbatim and are not capped at the base.
    /// Percentages of very large bases saturate at the `Decimal` range.
    #[must_use]
    pub fn amount_of(self, base: Decimal) -> Decimal {
        match self {
            Self::Percent(percent) => base.saturating_mul(percent) / Decimal::ONE_HUNDRED,
            Self::Fixed(amount) => amount,
        }
    }

    /// Returns the raw adjustment value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        match self {
            Self::Percent(value) | Self::Fixed(value) => value,
        }
    }
}

/// Tax applied to a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTax {
    /// Tax label, also the grouping key in the tax summary (e.g., "VAT").
    pub name: String,
    /// Tax rate as a percentage (20 means 20%).
    pub rate: Decimal,
}

impl LineTax {
    /// Creates a line tax.
    #[must_use]
    pub fn new(name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }
}

/// One billable row on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display title. Never affects arithmetic.
    #[serde(default)]
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit label (pcs, hours, days, service).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Number of units; fractional values are allowed (e.g., hours).
    pub quantity: Decimal,
    /// Price per unit; negative values describe credit lines.
    pub unit_price: Decimal,
    /// Optional line discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Adjustment>,
    /// Optional line tax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<LineTax>,
}

impl LineItem {
    /// Creates an untitled line with no discount and no tax.
    #[must_use]
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            title: String::new(),
            description: None,
            unit: None,
            sku: None,
            quantity,
            unit_price,
            discount: None,
            tax: None,
        }
    }

    /// Sets the line discount.
    #[must_use]
    pub fn with_discount(mut self, discount: Adjustment) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Sets the line tax.
    #[must_use]
    pub fn with_tax(mut self, name: impl Into<String>, rate: Decimal) -> Self {
        self.tax = Some(LineTax::new(name, rate));
        self
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Policy for resolving fractional cents of the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Nearest cent, halves away from zero.
    #[default]
    Standard,
    /// Smallest cent value not below the raw total.
    Up,
    /// Largest cent value not above the raw total.
    Down,
}

impl RoundingMode {
    /// Returns the decimal rounding strategy implementing this mode.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::Standard => RoundingStrategy::MidpointAwayFromZero,
            Self::Up => RoundingStrategy::ToPositiveInfinity,
            Self::Down => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

/// Invoice-level calculation options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculationOptions {
    /// When true, unit prices already contain their line tax.
    #[serde(default)]
    pub tax_inclusive: bool,
    /// Discount applied once to the sum of post-line-discount amounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_level_discount: Option<Adjustment>,
    /// Shipping added after tax; never taxed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_amount: Option<Decimal>,
    /// Tax withheld by the payer, subtracted from the grand total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withholding_tax: Option<Adjustment>,
    /// Rounding policy for the grand total.
    #[serde(default)]
    pub rounding_mode: RoundingMode,
}

impl CalculationOptions {
    /// Options for tax-exclusive pricing with no invoice-level modifiers.
    #[must_use]
    pub fn exclusive() -> Self {
        Self::default()
    }

    /// Options for tax-inclusive pricing with no invoice-level modifiers.
    #[must_use]
    pub fn inclusive() -> Self {
        Self {
            tax_inclusive: true,
            ..Self::default()
        }
    }
}

/// Unrounded figures for a single evaluated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBreakdown {
    /// Quantity times unit price.
    pub line_extension: Decimal,
    /// Line discount amount.
    pub line_discount: Decimal,
    /// Extension minus discount.
    pub after_discount: Decimal,
    /// Tax carried by the line (added on top or contained, per pricing mode).
    pub line_tax: Decimal,
}

/// Tax aggregated per distinct (name, rate) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummaryEntry {
    /// Tax label.
    pub name: String,
    /// Tax rate as a percentage.
    pub rate: Decimal,
    /// Total tax collected under this label and rate.
    pub amount: Decimal,
}

/// Complete monetary breakdown of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line extensions before any discount.
    pub subtotal: Decimal,
    /// Line discounts plus the invoice-level discount.
    pub discount_total: Decimal,
    /// Subtotal minus all discounts.
    ///
    /// In tax-inclusive mode this amount still contains the line taxes, so it
    /// is the gross rather than the net; the net is `taxable_total - tax_total`.
    pub taxable_total: Decimal,
    /// Sum of all line taxes.
    pub tax_total: Decimal,
    /// Tax buckets in first-seen order.
    pub tax_summary: Vec<TaxSummaryEntry>,
    /// Shipping amount.
    pub shipping_total: Decimal,
    /// Withheld amount, present only when non-zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withholding_tax: Option<Decimal>,
    /// Final amount after the configured rounding mode.
    pub grand_total: Decimal,
    /// Amount already paid; zero unless overlaid by the caller.
    pub paid_amount: Decimal,
    /// Amount still due; equals the grand total unless overlaid by the caller.
    pub due_amount: Decimal,
}
