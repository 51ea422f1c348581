//! The deliberation state machine
//!
//! A [`DebateSession`] runs one debate for one stock symbol. Turn order is a
//! property of session state, never of message content: bull opens, bear
//! opens, bull rebuts, bear rebuts, the chairman decides, and the session
//! itself closes with a summary. The caller pulls turns one at a time through
//! [`DebateSession::next_turn`], so a driver can display each turn as it
//! completes; the sequence is finite (exactly six turns) and a session is not
//! restartable - analyze another symbol with a fresh session.

use crate::agent::CommitteeAgent;
use crate::config::CommitteeConfig;
use crate::error::{CommitteeError, Result};
use crate::history::{ConversationHistory, Turn, TurnRole};
use crate::prompts;
use crate::roles::CommitteeRole;
use crate::scorer::{Decision, DecisionSlot};
use crate::search::EvidenceSearch;
use crate::tools::toolset_for;
use committee_llm::{CompletionRequest, LlmProvider, Message};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Session state, advanced strictly left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebateState {
    /// Bull's opening argument
    BullOpen,
    /// Bear's opening argument
    BearOpen,
    /// Bull's rebuttal
    BullRebut,
    /// Bear's rebuttal
    BearRebut,
    /// Chairman weighs the debate and records the decision
    ChairmanDecide,
    /// Session composes the closing summary (no agent call)
    Summarize,
    /// Terminal state
    Done,
}

impl DebateState {
    /// The single successor of each state
    fn next(self) -> Self {
        match self {
            Self::BullOpen => Self::BearOpen,
            Self::BearOpen => Self::BullRebut,
            Self::BullRebut => Self::BearRebut,
            Self::BearRebut => Self::ChairmanDecide,
            Self::ChairmanDecide => Self::Summarize,
            Self::Summarize | Self::Done => Self::Done,
        }
    }

    /// Which role speaks in this state, if any
    fn speaker(self) -> Option<CommitteeRole> {
        match self {
            Self::BullOpen | Self::BullRebut => Some(CommitteeRole::Bull),
            Self::BearOpen | Self::BearRebut => Some(CommitteeRole::Bear),
            Self::ChairmanDecide => Some(CommitteeRole::Chairman),
            Self::Summarize | Self::Done => None,
        }
    }
}

/// Everything a completed session produced
#[derive(Debug, Clone)]
pub struct DebateOutcome {
    /// The analyzed symbol
    pub symbol: String,
    /// The six agent-produced turns, in order
    pub turns: Vec<Turn>,
    /// The chairman's recorded decision
    pub decision: Decision,
    /// The closing summary text
    pub summary: String,
}

/// One debate for one stock symbol
pub struct DebateSession {
    symbol: String,
    state: DebateState,
    history: ConversationHistory,
    bull: CommitteeAgent,
    bear: CommitteeAgent,
    chairman: CommitteeAgent,
    provider: Arc<dyn LlmProvider>,
    config: Arc<CommitteeConfig>,
    decision_slot: DecisionSlot,
    decision: Option<Decision>,
}

impl DebateSession {
    /// Create a session for `symbol`, seeding the history with the user query
    ///
    /// The reasoning and evidence services are injected here; the session
    /// holds no global state, so independent sessions never share anything
    /// mutable.
    pub fn new(
        symbol: &str,
        provider: Arc<dyn LlmProvider>,
        search: Arc<dyn EvidenceSearch>,
        config: CommitteeConfig,
    ) -> Result<Self> {
        let symbol = normalize_symbol(symbol)?;
        config.validate()?;
        let config = Arc::new(config);

        let decision_slot: DecisionSlot = Arc::new(Mutex::new(None));
        let agent = |role| {
            CommitteeAgent::new(
                role,
                Arc::clone(&provider),
                Arc::new(toolset_for(
                    role,
                    &search,
                    &decision_slot,
                    config.search_max_results,
                )),
                Arc::clone(&config),
            )
        };

        let mut history = ConversationHistory::new();
        history.push(TurnRole::User, None, prompts::seed_query(&symbol));

        info!("Debate session opened for {}", symbol);
        Ok(Self {
            symbol,
            state: DebateState::BullOpen,
            history,
            bull: agent(CommitteeRole::Bull),
            bear: agent(CommitteeRole::Bear),
            chairman: agent(CommitteeRole::Chairman),
            provider,
            config,
            decision_slot,
            decision: None,
        })
    }

    /// The analyzed symbol (normalized to upper case)
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Current session state
    pub fn state(&self) -> DebateState {
        self.state
    }

    /// The shared history, seed turn included
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// The chairman's decision, once recorded
    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    /// Execute the next state and yield its turn
    ///
    /// Returns `Ok(None)` once the session is done. A turn failure leaves the
    /// already-completed turns readable through [`Self::history`]; the
    /// session itself should be discarded.
    pub async fn next_turn(&mut self) -> Result<Option<Turn>> {
        let state = self.state;
        match state {
            DebateState::Done => Ok(None),

            DebateState::Summarize => {
                let Some(decision) = self.decision.clone() else {
                    return Err(CommitteeError::InvariantViolation(
                        "summary requested before a decision was recorded".to_string(),
                    ));
                };
                let turn = self.compose_summary(&decision).await?;
                self.state = state.next();
                Ok(Some(turn))
            }

            _ => {
                // Every remaining state is exactly one agent invocation
                let role = state
                    .speaker()
                    .ok_or_else(|| CommitteeError::InvariantViolation(
                        format!("state {state:?} has no speaking role"),
                    ))?;
                debug!("State {:?}: {} takes the turn", state, role);

                let agent = match role {
                    CommitteeRole::Bull => &mut self.bull,
                    CommitteeRole::Bear => &mut self.bear,
                    CommitteeRole::Chairman => &mut self.chairman,
                };
                let text = agent.take_turn(&self.history).await?;
                let turn = self.history.push(TurnRole::Agent, Some(role), text).clone();

                if state == DebateState::ChairmanDecide {
                    let recorded = self.decision_slot.lock().unwrap().clone();
                    let Some(decision) = recorded else {
                        return Err(CommitteeError::DecisionMissing);
                    };
                    info!(
                        "{}: chairman decided {} ({})",
                        self.symbol, decision.recommendation, decision.confidence
                    );
                    self.decision = Some(decision);
                }

                self.state = state.next();
                Ok(Some(turn))
            }
        }
    }

    /// Drive the session to its terminal state
    pub async fn run_to_completion(mut self) -> Result<DebateOutcome> {
        let mut turns = Vec::new();
        while let Some(turn) = self.next_turn().await? {
            turns.push(turn);
        }

        let decision = self.decision.ok_or(CommitteeError::DecisionMissing)?;
        let summary = turns.last().map(|t| t.content.clone()).unwrap_or_default();

        Ok(DebateOutcome {
            symbol: self.symbol,
            turns,
            decision,
            summary,
        })
    }

    /// Compose the bounded closing summary (no tools, no agent)
    async fn compose_summary(&mut self, decision: &Decision) -> Result<Turn> {
        debug!("Composing summary for {}", self.symbol);

        let input = format!(
            "{}\n\nRecorded decision:\n{}\n\nSummarize the debate now.",
            self.history.transcript(),
            decision.report()
        );

        let mut builder = CompletionRequest::builder(&self.config.model)
            .add_message(Message::user(input))
            .system(prompts::SUMMARY_PROMPT)
            .max_tokens(self.config.summary_max_tokens);
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }

        let response = self.provider.complete(builder.build()).await?;
        let text = response.message.text().unwrap_or_default().to_string();
        if text.is_empty() {
            return Err(CommitteeError::Llm(
                committee_llm::LlmError::UnexpectedResponse(
                    "summary response contained no text".to_string(),
                ),
            ));
        }

        Ok(self.history.push(TurnRole::Agent, None, text).clone())
    }
}

/// Validate and normalize a stock symbol from the driver
fn normalize_symbol(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !valid {
        return Err(CommitteeError::InvalidSymbol(raw.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::{Confidence, Recommendation};
    use crate::testing::{ScriptedProvider, StubSearch, text_response, tool_use_response};
    use committee_llm::CompletionResponse;
    use serde_json::json;

    fn scripted_full_debate() -> Vec<CompletionResponse> {
        vec![
            text_response("• growth strong • profit\nThis is why you should BUY AAPL"),
            text_response("• minor concern\nThis is why you should AVOID AAPL"),
            text_response("The bear said 'minor concern', but growth dwarfs it."),
            text_response("The bull said 'growth', but the concern stands."),
            tool_use_response(
                "call_decide",
                "make_investment_decision",
                json!({
                    "symbol": "AAPL",
                    "bull_points": "• growth strong • profit",
                    "bear_points": "• minor concern",
                }),
            ),
            text_response("The bull presented stronger evidence. Final decision: BUY."),
            text_response("Bulls argued growth and profit; bears saw one concern; the chairman chose BUY."),
        ]
    }

    fn session_with(responses: Vec<CompletionResponse>) -> DebateSession {
        DebateSession::new(
            "AAPL",
            Arc::new(ScriptedProvider::new(responses)),
            Arc::new(StubSearch::empty()),
            CommitteeConfig::default(),
        )
        .unwrap()
    }

    async fn drain(session: &mut DebateSession) -> Vec<Turn> {
        let mut turns = Vec::new();
        while let Some(turn) = session.next_turn().await.unwrap() {
            turns.push(turn);
        }
        turns
    }

    #[tokio::test]
    async fn test_turn_order_is_fixed() {
        let mut session = session_with(scripted_full_debate());
        let turns = drain(&mut session).await;

        let speakers: Vec<Option<CommitteeRole>> = turns.iter().map(|t| t.speaker).collect();
        assert_eq!(
            speakers,
            vec![
                Some(CommitteeRole::Bull),
                Some(CommitteeRole::Bear),
                Some(CommitteeRole::Bull),
                Some(CommitteeRole::Bear),
                Some(CommitteeRole::Chairman),
                None, // summary is the session's own voice
            ]
        );
        assert_eq!(session.state(), DebateState::Done);
    }

    #[tokio::test]
    async fn test_history_is_seed_plus_six_turns() {
        let mut session = session_with(scripted_full_debate());
        let turns = drain(&mut session).await;

        assert_eq!(turns.len(), 6);
        assert_eq!(session.history().len(), 7);

        let ordinals: Vec<usize> = session.history().turns().iter().map(|t| t.ordinal).collect();
        assert_eq!(ordinals, (0..7).collect::<Vec<_>>());
        assert_eq!(session.history().turns()[0].role, TurnRole::User);
    }

    #[tokio::test]
    async fn test_decision_recorded_before_summary() {
        let mut session = session_with(scripted_full_debate());

        for _ in 0..4 {
            session.next_turn().await.unwrap();
            assert!(session.decision().is_none());
        }
        session.next_turn().await.unwrap(); // chairman
        let decision = session.decision().unwrap();
        assert_eq!(decision.recommendation, Recommendation::Buy);
        assert_eq!(decision.confidence, Confidence::High);
        assert_eq!(session.state(), DebateState::Summarize);
    }

    #[tokio::test]
    async fn test_identical_scripts_yield_identical_decisions() {
        let first = session_with(scripted_full_debate())
            .run_to_completion()
            .await
            .unwrap();
        let second = session_with(scripted_full_debate())
            .run_to_completion()
            .await
            .unwrap();
        assert_eq!(first.decision, second.decision);
        assert_eq!(first.summary, second.summary);
    }

    #[tokio::test]
    async fn test_cancel_after_bear_open_keeps_prefix() {
        let mut session = session_with(scripted_full_debate());
        session.next_turn().await.unwrap();
        session.next_turn().await.unwrap();

        // Cancelled here: completed prefix stays readable, no decision exists
        assert_eq!(session.history().len(), 3);
        assert!(session.decision().is_none());
        drop(session);
    }

    #[tokio::test]
    async fn test_chairman_without_decision_tool_fails() {
        let mut responses = scripted_full_debate();
        // Chairman answers in plain text instead of calling the decision tool
        responses.splice(4..6, [text_response("I think we should buy.")]);
        let mut session = session_with(responses);

        for _ in 0..4 {
            session.next_turn().await.unwrap();
        }
        let err = session.next_turn().await.unwrap_err();
        assert!(matches!(err, CommitteeError::DecisionMissing));
    }

    #[tokio::test]
    async fn test_summarize_without_decision_is_invariant_violation() {
        let mut session = session_with(vec![]);
        session.state = DebateState::Summarize;

        let err = session.next_turn().await.unwrap_err();
        assert!(matches!(err, CommitteeError::InvariantViolation(_)));
    }

    #[tokio::test]
    async fn test_done_session_yields_none() {
        let mut session = session_with(scripted_full_debate());
        drain(&mut session).await;
        assert!(session.next_turn().await.unwrap().is_none());
    }

    #[test]
    fn test_invalid_symbols_rejected() {
        for bad in ["", "   ", "AA PL", "AAPL$"] {
            let result = DebateSession::new(
                bad,
                Arc::new(ScriptedProvider::new(vec![])),
                Arc::new(StubSearch::empty()),
                CommitteeConfig::default(),
            );
            assert!(matches!(result, Err(CommitteeError::InvalidSymbol(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_symbol_normalized_to_uppercase() {
        let session = session_with(vec![]);
        assert_eq!(session.symbol(), "AAPL");

        let lower = DebateSession::new(
            "msft",
            Arc::new(ScriptedProvider::new(vec![])),
            Arc::new(StubSearch::empty()),
            CommitteeConfig::default(),
        )
        .unwrap();
        assert_eq!(lower.symbol(), "MSFT");
        assert!(lower.history().turns()[0].content.contains("MSFT"));
    }

    #[test]
    fn test_transition_table_is_linear() {
        let mut state = DebateState::BullOpen;
        let mut seen = vec![state];
        while state != DebateState::Done {
            state = state.next();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                DebateState::BullOpen,
                DebateState::BearOpen,
                DebateState::BullRebut,
                DebateState::BearRebut,
                DebateState::ChairmanDecide,
                DebateState::Summarize,
                DebateState::Done,
            ]
        );
    }
}
