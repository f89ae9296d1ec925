//! Portfolio error types.

use thiserror::Error;

/// Portfolio aggregation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioError {
    /// A summed figure no longer fits a decimal.
    #[error("Sum of {0} is out of range")]
    AmountOutOfRange(&'static str),
}
