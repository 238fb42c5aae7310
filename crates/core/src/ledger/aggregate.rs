//! Balance aggregation over the expense ledger.
//!
//! Folds a project's expenses into one [`MemberBalance`] per roster member,
//! converted into the reporting currency. The fold is pure and
//! order-insensitive beyond rounding: inputs are borrowed immutably and a
//! fresh balance list is returned on every call.

use std::collections::{BTreeSet, HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::warn;

use splitledger_shared::types::MemberId;

use super::error::LedgerError;
use super::types::{Expense, Member, MemberBalance};
use crate::currency::{RatePolicy, RateTable, epsilon, round_money};

/// Returns the distinct set of currencies used across `expenses`.
///
/// The resolver uses this to batch rate lookups: each currency is resolved
/// exactly once per run, never once per expense.
#[must_use]
pub fn distinct_currencies(expenses: &[Expense]) -> BTreeSet<String> {
    expenses.iter().map(|e| e.currency.clone()).collect()
}

/// Strict expense validation for the expense-creation path.
///
/// The aggregator assumes these invariants hold; the wider application runs
/// this check when an expense is created or edited.
///
/// # Errors
///
/// Returns a [`LedgerError`] naming the offending record when the amount is
/// not positive, the participant list is empty, a referenced member is not
/// in `roster`, or the shares do not sum to the amount within epsilon.
pub fn validate_expense(
    expense: &Expense,
    roster: &HashSet<MemberId>,
    precision: u32,
) -> Result<(), LedgerError> {
    if expense.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount {
            expense: expense.id,
            amount: expense.amount,
        });
    }
    if expense.participants.is_empty() {
        return Err(LedgerError::EmptyParticipants(expense.id));
    }
    if !roster.contains(&expense.payer) {
        return Err(LedgerError::UnknownMember {
            expense: expense.id,
            member: expense.payer,
        });
    }
    for share in &expense.participants {
        if !roster.contains(&share.member) {
            return Err(LedgerError::UnknownMember {
                expense: expense.id,
                member: share.member,
            });
        }
    }

    let share_sum: Decimal = expense.participants.iter().map(|s| s.share_amount).sum();
    if (share_sum - expense.amount).abs() > epsilon(precision) {
        return Err(LedgerError::ShareSumMismatch {
            expense: expense.id,
            amount: expense.amount,
            share_sum,
        });
    }
    Ok(())
}

/// Aggregates expenses into per-member balances.
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Folds `expenses` into one balance per member of `members`.
    ///
    /// Every roster member appears in the output, in roster order, even
    /// with no expenses (a true zero balance must exist so the settlement
    /// planner can exclude it deterministically). Each expense amount and
    /// share is converted with the rate resolved for its currency and
    /// rounded at the policy precision; a final defensive re-round closes
    /// the run.
    ///
    /// An expense whose currency has no resolved rate is still included via
    /// the table's fallback rate - dropping it would break conservation. A
    /// payer or participant not present in `members` is skipped with a
    /// warning; this tolerant behavior matches the expense-creation path
    /// owning strict validation (see [`validate_expense`]).
    #[must_use]
    pub fn aggregate(
        members: &[Member],
        expenses: &[Expense],
        rates: &RateTable,
        policy: &RatePolicy,
    ) -> Vec<MemberBalance> {
        let index: HashMap<MemberId, usize> = members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id, i))
            .collect();
        let mut balances: Vec<MemberBalance> =
            members.iter().map(|m| MemberBalance::new(m.id)).collect();

        for expense in expenses {
            let rate = rates.rate_for(&expense.currency).rate;

            let paid = round_money(expense.amount * rate, policy.precision);
            if let Some(&i) = index.get(&expense.payer) {
                balances[i].add_paid(paid);
            } else {
                warn!(
                    expense = %expense.id,
                    payer = %expense.payer,
                    "payer not in roster, skipping paid credit"
                );
            }

            for share in &expense.participants {
                let owed = round_money(share.share_amount * rate, policy.precision);
                if let Some(&i) = index.get(&share.member) {
                    balances[i].add_share(owed);
                } else {
                    warn!(
                        expense = %expense.id,
                        member = %share.member,
                        "participant not in roster, skipping share"
                    );
                }
            }
        }

        for balance in &mut balances {
            balance.round_to(policy.precision);
        }
        balances
    }
}
