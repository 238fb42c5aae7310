//! Common type definitions.

pub mod id;

pub use id::{ExpenseId, MemberId, ProjectId, UserId};
