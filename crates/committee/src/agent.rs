//! A single committee agent and its reason-act-observe loop
//!
//! Each turn: present the role identity and the full shared history to the
//! reasoning service, execute any requested tool calls against the role's
//! authorized registry, feed results back, and stop when the service emits
//! final text. Tool results stay in the loop-local context; only the final
//! text reaches the shared history.

use crate::config::CommitteeConfig;
use crate::error::{CommitteeError, Result};
use crate::history::ConversationHistory;
use crate::prompts;
use crate::roles::CommitteeRole;
use committee_llm::{
    CompletionRequest, ContentBlock, LlmProvider, Message, StopReason, ToolDefinition,
};
use committee_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One role-specialized reasoning agent
pub struct CommitteeAgent {
    role: CommitteeRole,
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: Arc<CommitteeConfig>,
    turns_taken: u32,
}

impl CommitteeAgent {
    /// Create an agent for `role` over its authorized tool registry
    pub fn new(
        role: CommitteeRole,
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: Arc<CommitteeConfig>,
    ) -> Self {
        Self {
            role,
            provider,
            tools,
            config,
            turns_taken: 0,
        }
    }

    /// This agent's role
    pub fn role(&self) -> CommitteeRole {
        self.role
    }

    /// How many turns this agent has completed this session
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// Run one full turn against the shared history, returning the final text
    ///
    /// The loop is bounded by `max_tool_rounds`; exhausting it, truncation,
    /// and reasoning-service errors are all turn failures attributed to this
    /// role.
    pub async fn take_turn(&mut self, history: &ConversationHistory) -> Result<String> {
        let opening = format!(
            "{}\n\n{}",
            history.transcript(),
            prompts::turn_directive(self.role, self.turns_taken)
        );
        let mut conversation = vec![Message::user(opening)];
        let tool_definitions = self.tool_definitions();

        for round in 1..=self.config.max_tool_rounds {
            debug!(
                "{} turn, round {}/{}",
                self.role, round, self.config.max_tool_rounds
            );

            let mut builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .system(self.role.system_prompt())
                .max_tokens(self.config.max_tokens);
            if let Some(temperature) = self.config.temperature {
                builder = builder.temperature(temperature);
            }
            if !tool_definitions.is_empty() {
                builder = builder.tools(tool_definitions.clone());
            }

            let response = self
                .provider
                .complete(builder.build())
                .await
                .map_err(|e| self.turn_failure(e.to_string()))?;

            conversation.push(response.message.clone());

            match response.stop_reason {
                StopReason::EndTurn => {
                    let text = response.message.text().unwrap_or_default().to_string();
                    if text.is_empty() {
                        return Err(self.turn_failure("reasoning service returned no text"));
                    }
                    info!("{} finished turn after {} round(s)", self.role, round);
                    self.turns_taken += 1;
                    return Ok(text);
                }

                StopReason::ToolUse => {
                    let results = self.execute_tools(&response.message).await?;
                    if results.is_empty() {
                        return Err(
                            self.turn_failure("tool use requested without any tool call")
                        );
                    }
                    conversation.extend(results);
                }

                StopReason::MaxTokens => {
                    return Err(self.turn_failure("response truncated at the token limit"));
                }
            }
        }

        Err(self.turn_failure(format!(
            "no final text after {} tool-call rounds",
            self.config.max_tool_rounds
        )))
    }

    /// Build tool definitions from the authorized registry
    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute the tool calls in an assistant message
    ///
    /// A request for a tool outside the authorized set is a turn failure, not
    /// a lookup in some wider catalog.
    async fn execute_tools(&self, message: &Message) -> Result<Vec<Message>> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            if let ContentBlock::ToolUse { id, name, input } = tool_use {
                let Some(tool) = self.tools.get(name) else {
                    return Err(self.turn_failure(format!(
                        "requested unauthorized tool '{}' (authorized: {})",
                        name,
                        self.tools.names().join(", ")
                    )));
                };

                debug!("{} invoking tool {}", self.role, name);
                match tool.execute(input.clone()).await {
                    Ok(value) => {
                        let text = match value {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        };
                        results.push(Message::tool_result(id.clone(), text));
                    }
                    Err(e) => {
                        warn!("{} tool {} failed: {}", self.role, name, e);
                        results.push(Message::tool_error(id.clone(), format!("Error: {e}")));
                    }
                }
            }
        }

        Ok(results)
    }

    fn turn_failure(&self, reason: impl Into<String>) -> CommitteeError {
        CommitteeError::TurnFailed {
            role: self.role,
            reason: reason.into(),
        }
    }
}
