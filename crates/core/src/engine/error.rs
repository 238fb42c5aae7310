//! Engine error types.

use thiserror::Error;

use crate::settlement::SettlementError;

/// Errors that can escape a settlement computation.
///
/// Rate source failures never appear here: they degrade to fallback rates
/// inside the resolver so the computation always produces an answer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Settlement planning hit its internal-consistency guard.
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

impl EngineError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Settlement(err) => err.error_code(),
        }
    }
}
