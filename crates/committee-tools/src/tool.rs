//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools the committee agents can execute
///
/// Tools are functions the reasoning service can call during a turn. Each
/// tool provides a name, description, and a JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with the given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as a JSON value (should match `input_schema`)
    ///
    /// # Returns
    ///
    /// Tool output as a JSON value (the committee's tools return text signals)
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a [`crate::ToolRegistry`] and match the name in
    /// the advertised tool definition.
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// Helps the reasoning service decide when to use this tool.
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;
}
