//! Boundary validation for calculation input.
//!
//! The calculation engine accepts any decimal input. Layers that receive
//! untrusted input (HTTP handlers, importers) run these checks first.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{Adjustment, CalculationOptions, LineItem};

/// Validation errors for calculation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// Too many line items.
    #[error("Invoice has {count} line items, the maximum is {max}")]
    TooManyLines {
        /// Number of submitted lines.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Quantity is negative.
    #[error("Line {line}: quantity cannot be negative")]
    NegativeQuantity {
        /// Zero-based line index.
        line: usize,
    },

    /// Discount value is negative.
    #[error("Line {line}: discount cannot be negative")]
    NegativeDiscount {
        /// Zero-based line index.
        line: usize,
    },

    /// Percent discount above 100.
    #[error("Line {line}: percent discount cannot exceed 100")]
    DiscountPercentTooLarge {
        /// Zero-based line index.
        line: usize,
    },

    /// Tax rate is negative.
    #[error("Line {line}: tax rate cannot be negative")]
    NegativeTaxRate {
        /// Zero-based line index.
        line: usize,
    },

    /// Tax rate above the configured ceiling.
    #[error("Line {line}: tax rate cannot exceed {max}")]
    TaxRateTooLarge {
        /// Zero-based line index.
        line: usize,
        /// Configured maximum.
        max: Decimal,
    },

    /// Tax name is empty.
    #[error("Line {line}: tax name is required")]
    MissingTaxName {
        /// Zero-based line index.
        line: usize,
    },

    /// A line amount exceeds the configured magnitude.
    #[error("Line {line}: {field} exceeds the maximum of {max}")]
    LineAmountTooLarge {
        /// Zero-based line index.
        line: usize,
        /// Offending field.
        field: &'static str,
        /// Configured maximum.
        max: Decimal,
    },

    /// Invalid invoice-level discount.
    #[error("Invoice discount must be between 0 and 100 percent or a non-negative amount")]
    InvalidInvoiceDiscount,

    /// Invalid shipping amount.
    #[error("Shipping amount must be non-negative")]
    NegativeShipping,

    /// Invalid withholding tax.
    #[error("Withholding tax percentage must be between 0 and 100")]
    InvalidWithholdingPercent,

    /// An invoice-level amount exceeds the configured magnitude.
    #[error("{field} exceeds the maximum of {max}")]
    OptionAmountTooLarge {
        /// Offending field.
        field: &'static str,
        /// Configured maximum.
        max: Decimal,
    },
}

/// Magnitude limits applied by [`validate_calculation_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationLimits {
    /// Maximum number of line items.
    pub max_line_items: usize,
    /// Largest magnitude of any quantity, price, line extension or fixed amount.
    pub max_amount: Decimal,
    /// Highest accepted tax rate, as a percentage.
    pub max_tax_rate: Decimal,
}

impl Default for CalculationLimits {
    fn default() -> Self {
        Self {
            max_line_items: 500,
            max_amount: Decimal::from(1_000_000_000_000_i64),
            max_tax_rate: Decimal::ONE_THOUSAND,
        }
    }
}

/// Validates calculation input before it reaches the engine.
///
/// Credit lines (negative unit price), tax rates above 100 and negative fixed
/// withholding are accepted.
///
/// Quantity times unit price is bounded by `max_amount` just like each factor,
/// so validated input stays well inside the `Decimal` range through every step
/// of the calculation.
///
/// # Errors
///
/// Returns the first violation found, scanning lines in order and then the
/// invoice-level options.
pub fn validate_calculation_input(
    items: &[LineItem],
    options: &CalculationOptions,
    limits: &CalculationLimits,
) -> Result<(), CalculationError> {
    if items.len() > limits.max_line_items {
        return Err(CalculationError::TooManyLines {
            count: items.len(),
            max: limits.max_line_items,
        });
    }

    for (line, item) in items.iter().enumerate() {
        validate_line(line, item, limits)?;
    }

    if let Some(discount) = options.invoice_level_discount {
        if !is_valid_discount(discount) {
            return Err(CalculationError::InvalidInvoiceDiscount);
        }
        check_option_amount("invoice_level_discount", discount.value(), limits)?;
    }

    if let Some(shipping) = options.shipping_amount {
        if shipping < Decimal::ZERO {
            return Err(CalculationError::NegativeShipping);
        }
        check_option_amount("shipping_amount", shipping, limits)?;
    }

    match options.withholding_tax {
        Some(Adjustment::Percent(percent))
            if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED =>
        {
            return Err(CalculationError::InvalidWithholdingPercent);
        }
        Some(Adjustment::Fixed(amount)) => check_option_amount("withholding_tax", amount, limits)?,
        _ => {}
    }

    Ok(())
}

fn validate_line(
    line: usize,
    item: &LineItem,
    limits: &CalculationLimits,
) -> Result<(), CalculationError> {
    if item.quantity < Decimal::ZERO {
        return Err(CalculationError::NegativeQuantity { line });
    }
    check_line_amount(line, "quantity", item.quantity, limits)?;
    check_line_amount(line, "unit_price", item.unit_price, limits)?;

    let extension_fits = item
        .quantity
        .checked_mul(item.unit_price)
        .is_some_and(|extension| extension.abs() <= limits.max_amount);
    if !extension_fits {
        return Err(CalculationError::LineAmountTooLarge {
            line,
            field: "line_extension",
            max: limits.max_amount,
        });
    }

    if let Some(discount) = item.discount {
        if discount.value() < Decimal::ZERO {
            return Err(CalculationError::NegativeDiscount { line });
        }
        if let Adjustment::Percent(percent) = discount {
            if percent > Decimal::ONE_HUNDRED {
                return Err(CalculationError::DiscountPercentTooLarge { line });
            }
        }
        check_line_amount(line, "discount", discount.value(), limits)?;
    }

    if let Some(tax) = &item.tax {
        if tax.name.trim().is_empty() {
            return Err(CalculationError::MissingTaxName { line });
        }
        if tax.rate < Decimal::ZERO {
            return Err(CalculationError::NegativeTaxRate { line });
        }
        if tax.rate > limits.max_tax_rate {
            return Err(CalculationError::TaxRateTooLarge {
                line,
                max: limits.max_tax_rate,
            });
        }
    }

    Ok(())
}

fn is_valid_discount(discount: Adjustment) -> bool {
    match discount {
        Adjustment::Percent(percent) => {
            percent >= Decimal::ZERO && percent <= Decimal::ONE_HUNDRED
        }
        Adjustment::Fixed(amount) => amount >= Decimal::ZERO,
    }
}

fn check_line_amount(
    line: usize,
    field: &'static str,
    value: Decimal,
    limits: &CalculationLimits,
) -> Result<(), CalculationError> {
    if value.abs() > limits.max_amount {
        return Err(CalculationError::LineAmountTooLarge {
            line,
            field,
            max: limits.max_amount,
        });
    }
    Ok(())
}

fn check_option_amount(
    field: &'static str,
    value: Decimal,
    limits: &CalculationLimits,
) -> Result<(), CalculationError> {
    if value.abs() > limits.max_amount {
        return Err(CalculationError::OptionAmountTooLarge {
            field,
            max: limits.max_amount,
        });
    }
    Ok(())
}
