//! Balance and settlement engine for Splitledger.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. Given a project's members, its expense ledger, and a rate
//! policy, it answers who owes whom and how to settle up with few transfers.
//!
//! # Modules
//!
//! - `currency` - Monetary rounding, rate table composition, rate resolution
//! - `ledger` - Expense domain types and balance aggregation
//! - `settlement` - Greedy minimal-transfer settlement planning
//! - `engine` - Caller-facing settlement report computation

pub mod currency;
pub mod engine;
pub mod ledger;
pub mod settlement;
