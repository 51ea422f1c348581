//! Investment committee debate orchestration
//!
//! Runs a scripted debate among three role-specialized agents - an optimistic
//! bull, a pessimistic bear, and a decision-making chairman - to produce a
//! single investment recommendation for a stock symbol.
//!
//! The core is [`DebateSession`]: a fixed-order state machine that hands the
//! shared conversation history to each agent in turn, drives each agent's
//! tool-calling loop, and terminates with a chairman decision followed by a
//! debate summary. The reasoning service ([`committee_llm::LlmProvider`]) and
//! the evidence lookup service ([`search::EvidenceSearch`]) are injected, so
//! the orchestration is testable with scripted collaborators.
//!
//! # Example
//!
//! ```no_run
//! use committee::{CommitteeConfig, DebateSession, search::TavilyClient};
//! use committee_llm::providers::OpenAIProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> committee::Result<()> {
//! let provider = Arc::new(OpenAIProvider::from_env().unwrap());
//! let search = Arc::new(TavilyClient::from_env().unwrap());
//!
//! let mut session = DebateSession::new("AAPL", provider, search, CommitteeConfig::default())?;
//! while let Some(turn) = session.next_turn().await? {
//!     println!("{}", turn.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod history;
pub mod prompts;
pub mod roles;
pub mod scorer;
pub mod search;
pub mod session;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::CommitteeAgent;
pub use config::CommitteeConfig;
pub use error::{CommitteeError, Result};
pub use history::{ConversationHistory, Turn, TurnRole};
pub use roles::CommitteeRole;
pub use scorer::{Confidence, Decision, Recommendation};
pub use session::{DebateOutcome, DebateSession, DebateState};
