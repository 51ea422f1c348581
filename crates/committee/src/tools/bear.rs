//! Bear-only evidence tools (pessimistic, sell-focused)

use super::{SymbolParams, clip, title_or_default};
use crate::search::{EvidenceSearch, SearchResult};
use async_trait::async_trait;
use committee_llm::tools::schema;
use committee_tools::{Result, Tool, ToolError};
use regex::Regex;
use serde_json::{Value, json};
use std::sync::{Arc, LazyLock};
use tracing::warn;

/// Vocabulary that marks a snippet as a warning signal
const NEGATIVE_KEYWORDS: [&str; 9] = [
    "loss", "decline", "risk", "warning", "downgrade", "weak", "negative", "bearish", "concern",
];

/// Terms that indicate a risk factor
const RISK_TERMS: [&str; 6] = [
    "risk",
    "volatile",
    "uncertain",
    "concern",
    "debt",
    "competition",
];

const NEWS_SNIPPET_CHARS: usize = 200;
const MAX_SIGNALS: usize = 2;
const MAX_FACTORS: usize = 3;
/// Negative percentage moves per snippet
const MAX_DOWN_MOVES: usize = 2;

static DOWN_PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"down\s+(\d+(?:\.\d+)?)\s*%").unwrap());

/// Reduce lookup results to a bounded warning signal
pub(crate) fn negative_signals(symbol: &str, results: &[SearchResult]) -> String {
    let signals: Vec<String> = results
        .iter()
        .filter(|r| {
            let content = r.content.to_lowercase();
            NEGATIVE_KEYWORDS.iter().any(|word| content.contains(word))
        })
        .take(MAX_SIGNALS)
        .map(|r| {
            format!(
                "• {}: {}",
                title_or_default(&r.title),
                clip(&r.content, NEWS_SNIPPET_CHARS)
            )
        })
        .collect();

    if signals.is_empty() {
        format!("🐻 {symbol}: No major red flags found, but market volatility always poses risks!")
    } else {
        format!("🐻 WARNING SIGNALS for {symbol}:\n{}", signals.join("\n"))
    }
}

/// Extract risk factors: risk-term matches plus downward percentage moves
pub(crate) fn risk_factors(symbol: &str, results: &[SearchResult]) -> String {
    let mut factors: Vec<String> = Vec::new();

    for result in results {
        let content = result.content.to_lowercase();

        if RISK_TERMS.iter().any(|term| content.contains(term)) {
            factors.push("Market risk identified".to_string());
        }

        for cap in DOWN_PERCENT_RE.captures_iter(&content).take(MAX_DOWN_MOVES) {
            factors.push(format!("Down {}%", &cap[1]));
        }
    }

    if factors.is_empty() {
        format!("⚠️ {symbol}: Risk factors unclear - proceed with extreme caution!")
    } else {
        let listed: Vec<String> = factors.into_iter().take(MAX_FACTORS).collect();
        format!("⚠️ RISK ASSESSMENT for {symbol}: {}", listed.join(", "))
    }
}

/// Search for negative news and risks about a stock
pub struct FindNegativeNewsTool {
    search: Arc<dyn EvidenceSearch>,
    max_results: usize,
}

impl FindNegativeNewsTool {
    /// Create the tool over the given evidence service
    pub fn new(search: Arc<dyn EvidenceSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for FindNegativeNewsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: SymbolParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        let query = format!(
            "{} stock negative news risks decline losses downgrade warning",
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

        Ok(Value::String(negative_signals(&params.symbol, &results)))
    }

    fn name(&self) -> &str {
        super::FIND_NEGATIVE_NEWS
    }

    fn description(&self) -> &str {
        "Search for negative news and risks about a stock"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({"symbol": schema::string("Stock ticker symbol")}),
            vec!["symbol"],
        )
    }
}

/// Assess overall market risks and bearish indicators
pub struct AssessMarketRisksTool {
    search: Arc<dyn EvidenceSearch>,
    max_results: usize,
}

impl AssessMarketRisksTool {
    /// Create the tool over the given evidence service
    pub fn new(search: Arc<dyn EvidenceSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for AssessMarketRisksTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: SymbolParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        let query = format!(
            "{} stock market risks volatility debt competition regulatory concerns",
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

        Ok(Value::String(risk_factors(&params.symbol, &results)))
    }

    fn name(&self) -> &str {
        super::ASSESS_MARKET_RISKS
    }

    fn description(&self) -> &str {
        "Assess overall market risks and bearish indicators for a stock"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({"symbol": schema::string("Stock ticker symbol")}),
            vec!["symbol"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubSearch;

    fn hit(title: &str, content: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_negative_signals_filters_by_keyword() {
        let results = vec![
            hit("Downgrade", "Analyst downgrade amid profit concern"),
            hit("Recipe", "How to bake bread"),
        ];
        let signal = negative_signals("TSLA", &results);
        assert!(signal.contains("WARNING SIGNALS for TSLA"));
        assert!(signal.contains("downgrade"));
        assert!(!signal.contains("bread"));
    }

    #[test]
    fn test_negative_signals_fallback_names_symbol() {
        let signal = negative_signals("XYZ", &[]);
        assert!(signal.contains("XYZ"));
        assert!(signal.contains("volatility"));
    }

    #[test]
    fn test_risk_factors_extracts_down_moves() {
        let results = vec![hit("Slump", "Shares down 8% on volatile trading")];
        let signal = risk_factors("TSLA", &results);
        assert!(signal.contains("RISK ASSESSMENT for TSLA"));
        assert!(signal.contains("Market risk identified"));
        assert!(signal.contains("Down 8%"));
    }

    #[test]
    fn test_risk_factors_caps_at_three() {
        let results = vec![
            hit("A", "risk everywhere, down 1%, down 2%"),
            hit("B", "more risk, down 3%"),
        ];
        let signal = risk_factors("TSLA", &results);
        let listed = signal.split(": ").nth(1).unwrap();
        assert_eq!(listed.split(", ").count(), 3);
    }

    #[tokio::test]
    async fn test_tool_recovers_from_empty_results() {
        let tool = AssessMarketRisksTool::new(Arc::new(StubSearch::empty()), 3);
        let out = tool.execute(json!({"symbol": "TSLA"})).await.unwrap();
        assert!(out.as_str().unwrap().contains("TSLA"));
    }
}
