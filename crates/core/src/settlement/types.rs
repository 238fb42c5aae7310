//! Settlement domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::MemberId;

/// One directed transfer: `from` must pay `amount` to `to`.
///
/// A full settlement plan is an ordered sequence of these. Transient
/// computation output; the engine holds no state across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The member paying.
    pub from: MemberId,
    /// The member being paid.
    pub to: MemberId,
    /// The transfer amount in the reporting currency.
    pub amount: Decimal,
}
