//! Expense ledger domain types and balance aggregation.
//!
//! This module implements the read-only fold from a project's expense list
//! to per-member balances:
//! - Domain types for members, expenses, and participant shares
//! - Balance aggregation in the reporting currency
//! - Strict validation helpers for expense creation
//! - Error types for ledger operations

pub mod aggregate;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregate::{LedgerAggregator, distinct_currencies, validate_expense};
pub use error::LedgerError;
pub use types::{Expense, Member, MemberBalance, ParticipantShare};
