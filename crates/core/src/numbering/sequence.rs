//! Invoice number sequence.

use serde::{Deserialize, Serialize};

use super::error::NumberingError;

/// Widest zero padding honoured, the digit count of `u64::MAX`.
pub const MAX_PADDING: usize = 20;

/// Formats an invoice number as `{prefix}-{year}-{number}`.
///
/// The number is left-padded with zeros to `padding` digits, capped at
/// [`MAX_PADDING`]; longer numbers are never truncated.
#[must_use]
pub fn format_invoice_number(prefix: &str, number: u64, padding: usize, year: i32) -> String {
    let padding = padding.min(MAX_PADDING);
    format!("{prefix}-{year}-{number:0>padding$}")
}

/// Extracts the trailing sequence from an invoice number.
///
/// Returns `None` unless the number ends with a dash followed by digits.
#[must_use]
pub fn parse_invoice_number(invoice_number: &str) -> Option<u64> {
    let (_, digits) = invoice_number.rsplit_once('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Invoice numbering state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumbering {
    /// Number prefix (e.g., "INV").
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Sequence value used by the next allocation.
    #[serde(default = "default_next_number")]
    pub next_number: u64,
    /// Minimum digit count of the sequence.
    #[serde(default = "default_padding")]
    pub padding: usize,
}

fn default_prefix() -> String {
    "INV".to_string()
}

fn default_next_number() -> u64 {
    1
}

fn default_padding() -> usize {
    4
}

impl Default for InvoiceNumbering {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            next_number: default_next_number(),
            padding: default_padding(),
        }
    }
}

impl InvoiceNumbering {
    /// Creates a sequence starting at 1.
    #[must_use]
    pub fn new(prefix: impl Into<String>, padding: usize) -> Self {
        Self {
            prefix: prefix.into(),
            next_number: default_next_number(),
            padding,
        }
    }

    /// Returns the number the next allocation would produce, without advancing.
    #[must_use]
    pub fn peek(&self, year: i32) -> String {
        format_invoice_number(&self.prefix, self.next_number, self.padding, year)
    }

    /// Returns the next invoice number and advances the sequence.
    ///
    /// # Errors
    ///
    /// Returns `NumberingError::SequenceExhausted` if the sequence cannot advance.
    pub fn allocate(&mut self, year: i32) -> Result<String, NumberingError> {
        let following = self
            .next_number
            .checked_add(1)
            .ok_or(NumberingError::SequenceExhausted(self.next_number))?;
        let number = self.peek(year);
        self.next_number = following;
        Ok(number)
    }

    /// Moves the sequence past every parseable number in `existing`.
    ///
    /// The sequence never moves backwards, and unparseable numbers are ignored.
    ///
    /// # Errors
    ///
    /// Returns `NumberingError::SequenceExhausted` if the largest existing
    /// sequence is already at the maximum value.
    pub fn resume_after<'a, I>(&mut self, existing: I) -> Result<(), NumberingError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Some(largest) = existing.into_iter().filter_map(parse_invoice_number).max() else {
            return Ok(());
        };
        let following = largest
            .checked_add(1)
            .ok_or(NumberingError::SequenceExhausted(largest))?;
        self.next_number = self.next_number.max(following);
        Ok(())
    }
}
