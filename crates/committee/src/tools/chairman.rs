//! Chairman-only tools: market sentiment plus the final decision

use super::{SymbolParams, clip, title_or_default};
use crate::scorer::{self, DecisionSlot};
use crate::search::{EvidenceSearch, SearchResult};
use async_trait::async_trait;
use committee_llm::tools::schema;
use committee_tools::{Result, Tool, ToolError};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// Terms that mark a snippet as sentiment-relevant
const SENTIMENT_KEYWORDS: [&str; 4] = ["price", "trading", "market", "analyst"];

const SENTIMENT_SNIPPET_CHARS: usize = 150;
const MAX_SIGNALS: usize = 2;

/// Reduce lookup results to a bounded market-sentiment signal
pub(crate) fn sentiment_signals(symbol: &str, results: &[SearchResult]) -> String {
    let signals: Vec<String> = results
        .iter()
        .filter(|r| {
            let haystack = format!("{} {}", r.title, r.content).to_lowercase();
            SENTIMENT_KEYWORDS.iter().any(|word| haystack.contains(word))
        })
        .take(MAX_SIGNALS)
        .map(|r| {
            format!(
                "• {}: {}",
                title_or_default(&r.title),
                clip(&r.content, SENTIMENT_SNIPPET_CHARS)
            )
        })
        .collect();

    if signals.is_empty() {
        format!("📊 {symbol}: Market data limited - need more information for decision")
    } else {
        format!(
            "📊 CURRENT MARKET DATA for {symbol}:\n{}",
            signals.join("\n")
        )
    }
}

/// Get overall market sentiment and recent performance
pub struct GetMarketSentimentTool {
    search: Arc<dyn EvidenceSearch>,
    max_results: usize,
}

impl GetMarketSentimentTool {
    /// Create the tool over the given evidence service
    pub fn new(search: Arc<dyn EvidenceSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for GetMarketSentimentTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: SymbolParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        let query = format!(
            "{} stock current price today market sentiment analyst rating",
            params.symbol
        );
        let results = self
            .search
            .search(&query, self.max_results)
            .await
            .unwrap_or_else(|e| {
                warn!("Evidence lookup failed, using fallback signal: {}", e);
                Vec::new()
            });

        Ok(Value::String(sentiment_signals(&params.symbol, &results)))
    }

    fn name(&self) -> &str {
        super::GET_CURRENT_MARKET_SENTIMENT
    }

    fn description(&self) -> &str {
        "Get overall market sentiment and recent performance for a stock"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({"symbol": schema::string("Stock ticker symbol")}),
            vec!["symbol"],
        )
    }
}

#[derive(Debug, Deserialize)]
struct DecisionParams {
    symbol: String,
    bull_points: String,
    bear_points: String,
}

/// Record the final investment recommendation
///
/// Scores the debate deterministically and writes the [`crate::Decision`]
/// into the session's shared slot. The decision is final: a second call in
/// the same session is a tool error.
pub struct MakeInvestmentDecisionTool {
    slot: DecisionSlot,
}

impl MakeInvestmentDecisionTool {
    /// Create the tool over the session's decision slot
    pub fn new(slot: DecisionSlot) -> Self {
        Self { slot }
    }
}

#[async_trait]
impl Tool for MakeInvestmentDecisionTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: DecisionParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        let decision = scorer::score_debate(&params.symbol, &params.bull_points, &params.bear_points);
        info!(
            "Decision recorded for {}: {}",
            decision.symbol, decision.recommendation
        );

        let mut slot = self.slot.lock().unwrap();
        if slot.is_some() {
            return Err(ToolError::ExecutionFailed(
                "a final decision has already been recorded for this session".to_string(),
            ));
        }
        let report = decision.report();
        *slot = Some(decision);

        Ok(Value::String(report))
    }

    fn name(&self) -> &str {
        super::MAKE_INVESTMENT_DECISION
    }

    fn description(&self) -> &str {
        "Make the final investment recommendation based on the bull and bear arguments"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Stock ticker symbol"),
                "bull_points": schema::string("The bull agent's accumulated arguments"),
                "bear_points": schema::string("The bear agent's accumulated arguments"),
            }),
            vec!["symbol", "bull_points", "bear_points"],
        )
    }
}
