//! Property-based tests for balance aggregation.
//!
//! The load-bearing invariant is conservation: everything paid by someone
//! is owed by the group, so net balances always sum to zero (exactly in
//! the single-currency case, within the rounding budget once conversion
//! rounding is involved).

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use splitledger_shared::types::{ExpenseId, MemberId};

use super::aggregate::LedgerAggregator;
use super::types::{Expense, Member, ParticipantShare};
use crate::currency::{RateOrigin, RatePolicy, RateTable, ResolvedRate};

const MEMBERS: usize = 4;

/// One generated expense: payer index plus share cents per member.
type RawExpense = (usize, Vec<i64>);

/// Strategy for a ledger of 1 to 15 expenses over a fixed 4-member roster.
/// Shares are generated first; the amount is their exact sum, so the
/// share-sum precondition always holds.
fn ledger_strategy() -> impl Strategy<Value = Vec<RawExpense>> {
    prop::collection::vec(
        (
            0..MEMBERS,
            prop::collection::vec(0i64..10_000, MEMBERS..=MEMBERS),
        ),
        1..15,
    )
}

/// Strategy for a positive conversion rate (0.0001 to 10.0000).
fn conversion_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000).prop_map(|v| Decimal::new(v, 4))
}

fn build_ledger(raw: &[RawExpense], currency: &str) -> (Vec<Member>, Vec<Expense>) {
    let members: Vec<Member> = (0..MEMBERS)
        .map(|i| Member::placeholder(MemberId::new(), format!("M{i}")))
        .collect();

    let expenses = raw
        .iter()
        .map(|(payer, share_cents)| {
            let participants: Vec<ParticipantShare> = share_cents
                .iter()
                .zip(&members)
                .map(|(cents, member)| ParticipantShare {
                    member: member.id,
                    share_amount: Decimal::new(*cents, 2),
                })
                .collect();
            let amount: Decimal = participants.iter().map(|p| p.share_amount).sum();
            Expense {
                id: ExpenseId::new(),
                description: "generated".to_string(),
                amount,
                currency: currency.to_string(),
                payer: members[*payer].id,
                expense_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
                participants,
            }
        })
        .collect();

    (members, expenses)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Same-currency ledgers conserve exactly: no conversion rounding, so
    /// the net sum of balances is zero to the cent.
    #[test]
    fn prop_conservation_same_currency(raw in ledger_strategy()) {
        let (members, expenses) = build_ledger(&raw, "TWD");
        let policy = RatePolicy::new("TWD");
        let rates = RateTable::from_rates("TWD", HashMap::new(), false);

        let balances = LedgerAggregator::aggregate(&members, &expenses, &rates, &policy);

        let net: Decimal = balances.iter().map(|b| b.balance).sum();
        prop_assert_eq!(net, Decimal::ZERO);
    }

    /// Converted ledgers conserve within the rounding budget: each rounded
    /// amount moves by at most half a minor unit, so the net sum is bounded
    /// by (shares + payers) * 0.005.
    #[test]
    fn prop_conservation_with_conversion(
        raw in ledger_strategy(),
        rate in conversion_rate(),
    ) {
        let (members, expenses) = build_ledger(&raw, "JPY");
        let policy = RatePolicy::new("TWD");
        let rates = RateTable::from_rates(
            "TWD",
            HashMap::from([(
                "JPY".to_string(),
                ResolvedRate { rate, origin: RateOrigin::Custom },
            )]),
            false,
        );

        let balances = LedgerAggregator::aggregate(&members, &expenses, &rates, &policy);

        let rounded_amounts = expenses.len() * (MEMBERS + 1);
        let half_unit = Decimal::new(5, policy.precision + 1);
        let budget = half_unit * Decimal::from(rounded_amounts as u64);

        let net: Decimal = balances.iter().map(|b| b.balance).sum();
        prop_assert!(
            net.abs() <= budget,
            "net {} exceeded rounding budget {}",
            net,
            budget
        );
    }

    /// Every roster member appears in the output, in roster order, and
    /// total_paid - total_share always equals balance.
    #[test]
    fn prop_output_covers_roster(raw in ledger_strategy()) {
        let (members, expenses) = build_ledger(&raw, "TWD");
        let policy = RatePolicy::new("TWD");
        let rates = RateTable::from_rates("TWD", HashMap::new(), false);

        let balances = LedgerAggregator::aggregate(&members, &expenses, &rates, &policy);

        prop_assert_eq!(balances.len(), members.len());
        for (balance, member) in balances.iter().zip(&members) {
            prop_assert_eq!(balance.member, member.id);
            prop_assert_eq!(balance.balance, balance.total_paid - balance.total_share);
        }
    }

    /// Aggregation is deterministic for the same inputs.
    #[test]
    fn prop_aggregation_deterministic(raw in ledger_strategy()) {
        let (members, expenses) = build_ledger(&raw, "TWD");
        let policy = RatePolicy::new("TWD");
        let rates = RateTable::from_rates("TWD", HashMap::new(), false);

        let first = LedgerAggregator::aggregate(&members, &expenses, &rates, &policy);
        let second = LedgerAggregator::aggregate(&members, &expenses, &rates, &policy);

        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.balance, b.balance);
            prop_assert_eq!(a.total_paid, b.total_paid);
            prop_assert_eq!(a.total_share, b.total_share);
        }
    }
}
