//! Ledger domain types.
//!
//! These are read-only inputs to the engine. The wider application owns
//! their lifecycle (creation, soft deletion, member management); the engine
//! only folds over them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{ExpenseId, MemberId, UserId};

use crate::currency::round_money;

/// A member of a trip project.
///
/// `linked_user == None` models a placeholder member: a slot created before
/// the person joined with a real account. Placeholders take part in
/// balances and settlements like any other member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// The member ID, unique within a project.
    pub id: MemberId,
    /// Name shown in balances and settlement plans.
    pub display_name: String,
    /// The linked user account, if the member has claimed the slot.
    pub linked_user: Option<UserId>,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
}

impl Member {
    /// Creates a placeholder member with just a display name.
    #[must_use]
    pub fn placeholder(id: MemberId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            linked_user: None,
            avatar_url: None,
        }
    }
}

/// One participant's share of an expense, in the expense's currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantShare {
    /// The member owing this share.
    pub member: MemberId,
    /// The owed amount in the expense currency.
    pub share_amount: Decimal,
}

/// One logged expense.
///
/// Precondition (enforced at creation time via [`validate_expense`], not
/// re-checked by the aggregator): the participant shares sum to `amount`
/// within epsilon, and soft-deleted expenses are filtered out before the
/// engine sees them.
///
/// [`validate_expense`]: crate::ledger::validate_expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// The expense ID.
    pub id: ExpenseId,
    /// Human-readable description ("dinner", "taxi to airport").
    pub description: String,
    /// The positive amount paid, in `currency`.
    pub amount: Decimal,
    /// ISO 4217 currency code the expense was paid in.
    pub currency: String,
    /// The member who paid.
    pub payer: MemberId,
    /// The date the expense occurred.
    pub expense_date: NaiveDate,
    /// Who shares this expense and for how much. Order is irrelevant.
    pub participants: Vec<ParticipantShare>,
}

/// A member's derived net position in the reporting currency.
///
/// Fresh output of every aggregation run; never persisted by the engine.
/// Positive `balance` means the member is owed money, negative means the
/// member owes money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberBalance {
    /// The member this balance belongs to.
    pub member: MemberId,
    /// Total the member paid, converted and rounded.
    pub total_paid: Decimal,
    /// Total of the member's shares, converted and rounded.
    pub total_share: Decimal,
    /// Net position: `total_paid - total_share`.
    pub balance: Decimal,
}

impl MemberBalance {
    /// Creates a zero balance for a member.
    #[must_use]
    pub fn new(member: MemberId) -> Self {
        Self {
            member,
            total_paid: Decimal::ZERO,
            total_share: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Credits an amount the member paid.
    pub fn add_paid(&mut self, amount: Decimal) {
        self.total_paid += amount;
        self.balance = self.total_paid - self.total_share;
    }

    /// Debits a share the member owes.
    pub fn add_share(&mut self, amount: Decimal) {
        self.total_share += amount;
        self.balance = self.total_paid - self.total_share;
    }

    /// Defensive final rounding of all three fields.
    ///
    /// Incremental per-expense rounding can still accumulate sub-cent error
    /// over many expenses, so aggregation ends with one more pass.
    pub fn round_to(&mut self, precision: u32) {
        self.total_paid = round_money(self.total_paid, precision);
        self.total_share = round_money(self.total_share, precision);
        self.balance = round_money(self.balance, precision);
    }
}
