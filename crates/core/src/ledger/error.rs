//! Ledger error types.
//!
//! These cover input-integrity problems caught by the strict validation
//! path used at expense-creation time. The aggregation fold itself is
//! tolerant and does not raise them; see
//! [`aggregate`](super::aggregate::LedgerAggregator::aggregate).

use rust_decimal::Decimal;
use splitledger_shared::types::{ExpenseId, MemberId};
use thiserror::Error;

/// Errors that can occur while validating ledger input.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Expense amount must be positive.
    #[error("Expense {expense} amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending expense.
        expense: ExpenseId,
        /// The rejected amount.
        amount: Decimal,
    },

    /// Expense must have at least one participant.
    #[error("Expense {0} has no participants")]
    EmptyParticipants(ExpenseId),

    /// Participant shares must sum to the expense amount.
    #[error("Expense {expense} shares sum to {share_sum}, expected {amount}")]
    ShareSumMismatch {
        /// The offending expense.
        expense: ExpenseId,
        /// The expense amount.
        amount: Decimal,
        /// The actual sum of participant shares.
        share_sum: Decimal,
    },

    /// Expense references a member that is not in the project roster.
    #[error("Expense {expense} references unknown member {member}")]
    UnknownMember {
        /// The offending expense.
        expense: ExpenseId,
        /// The unknown member reference.
        member: MemberId,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::EmptyParticipants(_) => "EMPTY_PARTICIPANTS",
            Self::ShareSumMismatch { .. } => "SHARE_SUM_MISMATCH",
            Self::UnknownMember { .. } => "UNKNOWN_MEMBER",
        }
    }
}
