//! Scripted collaborators shared by the crate's tests

use crate::search::{EvidenceSearch, SearchError, SearchResult};
use async_trait::async_trait;
use committee_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, LlmError, LlmProvider, Message,
    MessageContent, Role, StopReason, TokenUsage,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Reasoning service replaying a fixed script of responses
pub(crate) struct ScriptedProvider {
    responses: Mutex<VecDeque<CompletionResponse>>,
}

impl ScriptedProvider {
    pub(crate) fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> committee_llm::Result<CompletionResponse> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::RequestFailed("script exhausted".to_string()))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub(crate) fn text_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage {
            input_tokens: 0,
            output_tokens: 0,
        },
    }
}

pub(crate) fn tool_use_response(id: &str, name: &str, input: serde_json::Value) -> CompletionResponse {
    CompletionResponse {
        message: Message {
            role: Role::Assistant,
            content: MessageContent::Blocks(vec![ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input,
            }]),
        },
        stop_reason: StopReason::ToolUse,
        usage: TokenUsage {
            input_tokens: 0,
            output_tokens: 0,
        },
    }
}

/// Evidence lookup returning a fixed result set (or always failing)
pub(crate) struct StubSearch {
    results: Vec<SearchResult>,
    fail: bool,
}

impl StubSearch {
    /// A lookup that finds nothing
    pub(crate) fn empty() -> Self {
        Self {
            results: Vec::new(),
            fail: false,
        }
    }

    /// A lookup that always errors
    pub(crate) fn failing() -> Self {
        Self {
            results: Vec::new(),
            fail: true,
        }
    }

    #[allow(dead_code)]
    pub(crate) fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            fail: false,
        }
    }
}

#[async_trait]
impl EvidenceSearch for StubSearch {
    async fn search(
        &self,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if self.fail {
            return Err(SearchError::Api("stub failure".to_string()));
        }
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}
