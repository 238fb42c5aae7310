//! Settlement error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during settlement planning.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The planning loop exceeded its iteration guard without settling all
    /// balances. This indicates unbalanced input (a broken conservation
    /// invariant upstream) and is surfaced as a hard failure: silently
    /// returning a wrong answer about money owed is unacceptable.
    #[error("settlement did not converge after {iterations} iterations, {residual} left unsettled")]
    NonConvergence {
        /// Iterations executed before giving up.
        iterations: usize,
        /// Sum of absolute balances still outstanding.
        residual: Decimal,
    },
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonConvergence { .. } => "SETTLEMENT_NON_CONVERGENCE",
        }
    }
}
