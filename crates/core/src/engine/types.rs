//! Settlement report types returned to callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::RateOrigin;
use crate::ledger::MemberBalance;
use crate::settlement::Settlement;

/// One foreign currency's resolved rate, for UI transparency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// ISO 4217 currency code.
    pub currency: String,
    /// Conversion rate into the reporting currency.
    pub rate: Decimal,
    /// Whether the rate was live, custom, or a fallback.
    pub origin: RateOrigin,
}

/// Aggregate facts about one computation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Number of expenses folded.
    pub expense_count: usize,
    /// Sum of all expenses, converted into the reporting currency.
    pub total_amount: Decimal,
    /// Conservation check: true when net balances sum to within epsilon
    /// of zero.
    pub is_balanced: bool,
    /// True when any rate fell back because the source was unavailable;
    /// the UI should warn that amounts are approximate.
    pub rates_stale: bool,
    /// Every resolved foreign currency with its rate and origin.
    pub currencies: Vec<CurrencyRate>,
}

/// Full output of one settlement computation.
///
/// Fresh on every call; callers may cache it but the engine never does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Net position per roster member, in roster order.
    pub balances: Vec<MemberBalance>,
    /// Transfers that settle all balances.
    pub settlements: Vec<Settlement>,
    /// Run metadata for display.
    pub summary: SettlementSummary,
}
