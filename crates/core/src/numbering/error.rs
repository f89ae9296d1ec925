//! Numbering error types.

use thiserror::Error;

/// Invoice numbering errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberingError {
    /// The sequence cannot advance past its maximum value.
    #[error("Invoice number sequence exhausted at {0}")]
    SequenceExhausted(u64),
}
