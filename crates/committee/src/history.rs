//! Conversation history shared across the debate
//!
//! The history is owned exclusively by the session for its whole lifetime and
//! is append-only: entries get a monotonically increasing ordinal when pushed
//! and are never mutated afterwards. Exactly one agent reads it per turn, so
//! no locking is needed.

use crate::roles::CommitteeRole;
use serde::{Deserialize, Serialize};

/// Kind of conversation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The seed query from the session driver
    User,
    /// A turn produced by an agent (or the session's own summary)
    Agent,
    /// A tool result; these live only in an agent's loop-local context and
    /// never reach the shared history
    ToolResult,
}

/// One conversation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Kind of entry
    pub role: TurnRole,
    /// Speaking role; `None` for the seed query and the session summary
    pub speaker: Option<CommitteeRole>,
    /// Text of the turn
    pub content: String,
    /// Position within the session, strictly increasing
    pub ordinal: usize,
}

/// Append-only ordered sequence of turns for one session
#[derive(Debug, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, assigning the next ordinal
    pub fn push(
        &mut self,
        role: TurnRole,
        speaker: Option<CommitteeRole>,
        content: impl Into<String>,
    ) -> &Turn {
        let ordinal = self.turns.len();
        self.turns.push(Turn {
            role,
            speaker,
            content: content.into(),
            ordinal,
        });
        // Just pushed, so the vec is non-empty
        self.turns.last().unwrap()
    }

    /// All turns so far, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns (seed included)
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the full history as a labeled transcript
    ///
    /// Every turn stays visible to every later turn; there is no rolling
    /// window.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            let label = match (turn.role, turn.speaker) {
                (TurnRole::User, _) => "User".to_string(),
                (_, Some(role)) => format!("[{}]", role.label()),
                (_, None) => "[COMMITTEE]".to_string(),
            };
            out.push_str(&label);
            out.push_str(": ");
            out.push_str(&turn.content);
        }
        out
    }
}
