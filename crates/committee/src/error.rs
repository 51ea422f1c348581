//! Error types for committee sessions

use crate::roles::CommitteeRole;
use thiserror::Error;

/// Result type alias for committee operations
pub type Result<T> = std::result::Result<T, CommitteeError>;

/// Errors surfaced by a debate session
///
/// Evidence-lookup failures never appear here: the evidence tools recover
/// locally with a fallback signal string.
#[derive(Debug, Error)]
pub enum CommitteeError {
    /// The stock symbol from the driver was empty or malformed
    #[error("Invalid stock symbol: {0:?}")]
    InvalidSymbol(String),

    /// Reasoning-service failure during a specific agent's turn
    #[error("{role} turn failed: {reason}")]
    TurnFailed {
        /// Role whose turn was executing
        role: CommitteeRole,
        /// What went wrong
        reason: String,
    },

    /// The chairman's turn completed without recording a decision
    #[error("chairman turn completed without recording an investment decision")]
    DecisionMissing,

    /// Orchestrator invariant violation - a programming defect, fatal to the session
    #[error("session invariant violated: {0}")]
    InvariantViolation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reasoning-service error outside any agent turn (summary composition)
    #[error("Reasoning service error: {0}")]
    Llm(#[from] committee_llm::LlmError),

    /// JSON handling error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
