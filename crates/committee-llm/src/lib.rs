//! Reasoning-service abstraction layer for committee-rs
//!
//! This crate defines the provider-agnostic types used to talk to a hosted
//! chat-completion model:
//!
//! - Message types for conversation turns and tool use
//! - Completion request/response types
//! - Tool definitions for function calling
//! - The [`LlmProvider`] trait implemented by concrete backends

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LlmProvider;
pub use tools::ToolDefinition;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
