//! Greedy minimal-transfer settlement planning.
//!
//! Finding the true minimum number of transfers that settles a group is
//! NP-hard, so this module implements the well-understood greedy
//! largest-debtor/largest-creditor matching instead: a good, not provably
//! optimal, plan in `O(n log n)`, never more than `N - 1` transfers for `N`
//! members with a non-zero balance. The tradeoff is deliberate; do not
//! replace this with exact minimization without revisiting the complexity.

use rust_decimal::Decimal;
use tracing::warn;

use splitledger_shared::types::MemberId;

use super::error::SettlementError;
use super::types::Settlement;
use crate::currency::{is_settled, round_money};
use crate::ledger::MemberBalance;

/// Working copy of one member's outstanding balance.
///
/// The planner decrements these in place; the caller's `MemberBalance`
/// records are never mutated.
#[derive(Debug, Clone, Copy)]
struct Outstanding {
    member: MemberId,
    balance: Decimal,
}

/// The greedy largest-debtor/largest-creditor settlement strategy.
pub struct GreedyMaxMatch;

impl GreedyMaxMatch {
    /// Plans transfers that drive every balance to within epsilon of zero.
    ///
    /// Balances already within epsilon of zero are excluded up front, so a
    /// member with a true zero balance never appears in the plan. Ties on
    /// magnitude are broken by stable input order, which keeps the output
    /// reproducible. The loop carries an iteration guard of `2 * N`;
    /// exceeding it means the input was not conserved (hand-built balances
    /// bypassing the aggregator) and is reported as a hard error rather
    /// than a silent partial plan.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::NonConvergence`] when the guard trips.
    pub fn plan(
        balances: &[MemberBalance],
        precision: u32,
    ) -> Result<Vec<Settlement>, SettlementError> {
        let mut debtors: Vec<Outstanding> = balances
            .iter()
            .filter(|b| b.balance < Decimal::ZERO && !is_settled(b.balance, precision))
            .map(|b| Outstanding {
                member: b.member,
                balance: b.balance,
            })
            .collect();
        let mut creditors: Vec<Outstanding> = balances
            .iter()
            .filter(|b| b.balance > Decimal::ZERO && !is_settled(b.balance, precision))
            .map(|b| Outstanding {
                member: b.member,
                balance: b.balance,
            })
            .collect();

        let guard = 2 * (debtors.len() + creditors.len());
        let mut settlements = Vec::new();
        let mut iterations = 0usize;

        while !debtors.is_empty() && !creditors.is_empty() {
            iterations += 1;
            if iterations > guard {
                let residual = Self::residual(&debtors, &creditors);
                return Err(SettlementError::NonConvergence {
                    iterations,
                    residual,
                });
            }

            // Strict comparisons keep the earliest entry on ties (stable
            // input order).
            let di = Self::position_of_extreme(&debtors, |a, b| a < b);
            let ci = Self::position_of_extreme(&creditors, |a, b| a > b);

            let amount = round_money(
                debtors[di].balance.abs().min(creditors[ci].balance),
                precision,
            );
            if amount <= Decimal::ZERO {
                // No progress is possible; let the guard report it.
                continue;
            }

            settlements.push(Settlement {
                from: debtors[di].member,
                to: creditors[ci].member,
                amount,
            });

            debtors[di].balance += amount;
            creditors[ci].balance -= amount;

            if is_settled(debtors[di].balance, precision) {
                debtors.remove(di);
            }
            if is_settled(creditors[ci].balance, precision) {
                creditors.remove(ci);
            }
        }

        let residual = Self::residual(&debtors, &creditors);
        if !residual.is_zero() {
            // Expected to be empty when the aggregator's conservation
            // invariant held; a leftover means sub-cent drift upstream.
            warn!(%residual, "settlement left a residual balance unsettled");
        }

        Ok(settlements)
    }

    /// Index of the extreme element under `wins` (first occurrence on ties).
    fn position_of_extreme(
        entries: &[Outstanding],
        wins: impl Fn(Decimal, Decimal) -> bool,
    ) -> usize {
        let mut best = 0;
        for (i, entry) in entries.iter().enumerate().skip(1) {
            if wins(entry.balance, entries[best].balance) {
                best = i;
            }
        }
        best
    }

    fn residual(debtors: &[Outstanding], creditors: &[Outstanding]) -> Decimal {
        debtors
            .iter()
            .chain(creditors)
            .map(|o| o.balance.abs())
            .sum()
    }
}
