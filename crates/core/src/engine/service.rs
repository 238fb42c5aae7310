//! The settlement engine service.

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::error::EngineError;
use super::types::{CurrencyRate, SettlementReport, SettlementSummary};
use crate::currency::{ExchangeRateResolver, RatePolicy, RateProvider, epsilon, round_money};
use crate::ledger::{Expense, LedgerAggregator, Member, distinct_currencies};
use crate::settlement::GreedyMaxMatch;

/// Computes balances and settlement plans for one project snapshot.
///
/// The engine is stateless between calls: every invocation receives its
/// full input (a snapshot read of members and active expenses) and returns
/// a fresh report. Concurrent computations for different projects are
/// fully independent.
pub struct SettlementEngine<P> {
    resolver: ExchangeRateResolver<P>,
}

impl<P: RateProvider> SettlementEngine<P> {
    /// Creates an engine over the given rate provider. `rate_timeout`
    /// bounds the single external fetch per computation.
    pub fn new(provider: P, rate_timeout: Duration) -> Self {
        Self {
            resolver: ExchangeRateResolver::new(provider, rate_timeout),
        }
    }

    /// Computes the full settlement report for one project snapshot.
    ///
    /// Pipeline: resolve the distinct expense currencies once, fold the
    /// ledger into balances, then plan transfers. A rate source outage
    /// still yields a complete report with `summary.rates_stale` set.
    ///
    /// # Errors
    ///
    /// Only an internal-consistency failure in settlement planning is a
    /// hard error; see [`EngineError`].
    #[instrument(skip_all, fields(members = members.len(), expenses = expenses.len()))]
    pub async fn compute(
        &self,
        members: &[Member],
        expenses: &[Expense],
        policy: &RatePolicy,
    ) -> Result<SettlementReport, EngineError> {
        let currencies = distinct_currencies(expenses);
        let rates = self.resolver.resolve_all(&currencies, policy).await;

        let balances = LedgerAggregator::aggregate(members, expenses, &rates, policy);
        let settlements = GreedyMaxMatch::plan(&balances, policy.precision)?;

        let total_amount = round_money(
            expenses
                .iter()
                .map(|e| round_money(e.amount * rates.rate_for(&e.currency).rate, policy.precision))
                .sum(),
            policy.precision,
        );
        let net: Decimal = balances.iter().map(|b| b.balance).sum();

        let summary = SettlementSummary {
            expense_count: expenses.len(),
            total_amount,
            is_balanced: net.abs() <= epsilon(policy.precision),
            rates_stale: rates.is_stale(),
            currencies: rates
                .resolved()
                .map(|(currency, resolved)| CurrencyRate {
                    currency: currency.to_string(),
                    rate: resolved.rate,
                    origin: resolved.origin,
                })
                .collect(),
        };
        debug!(
            settlements = settlements.len(),
            stale = summary.rates_stale,
            "settlement computed"
        );

        Ok(SettlementReport {
            balances,
            settlements,
            summary,
        })
    }
}
