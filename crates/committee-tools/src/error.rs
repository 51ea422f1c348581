//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool execution
#[derive(Error, Debug)]
pub enum ToolError {
    /// Tool input did not match the declared schema
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool ran but could not produce a result
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}
