//! Bull-only evidence tools (optimistic, buy-focused)

use super::{SymbolParams, clip, title_or_default};
use crate::search::{EvidenceSearch, SearchResult};
use async_trait::async_trait;
use committee_llm::tools::schema;
use committee_tools::{Result, Tool, ToolError};
use regex::Regex;
use serde_json::{Value, json};
use std::sync::{Arc, LazyLock};
use tracing::warn;

/// Vocabulary that marks a snippet as a positive signal
const POSITIVE_KEYWORDS: [&str; 7] = [
    "profit", "growth", "upgrade", "beat", "strong", "positive", "bullish",
];

/// Terms that indicate a positive trend in growth data
const GROWTH_TERMS: [&str; 6] = ["increase", "growth", "up", "higher", "rose", "gained"];

/// Snippet bound for news signals
const NEWS_SNIPPET_CHARS: usize = 200;
/// At most this many snippets per signal string
const MAX_SIGNALS: usize = 2;
/// At most this many numeric indicators reported
const MAX_INDICATORS: usize = 3;

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap());

/// Reduce lookup results to a bounded positive-news signal
///
/// Always returns a non-empty string: absence of evidence becomes a
/// deterministic fallback naming the symbol.
pub(crate) fn positive_signals(symbol: &str, results: &[SearchResult]) -> String {
    let signals: Vec<String> = results
        .iter()
        .filter(|r| {
            let content = r.content.to_lowercase();
            POSITIVE_KEYWORDS.iter().any(|word| content.contains(word))
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
        format!("🐂 {symbol}: Limited positive news found, but that could mean it's undervalued!")
    } else {
        format!("🐂 POSITIVE SIGNALS for {symbol}:\n{}", signals.join("\n"))
    }
}

/// Extract growth indicators: percentage tokens plus a trend marker
pub(crate) fn growth_indicators(symbol: &str, results: &[SearchResult]) -> String {
    let mut indicators: Vec<String> = Vec::new();

    for result in results {
        let content = result.content.to_lowercase();

        for cap in PERCENT_RE.captures_iter(&content).take(MAX_INDICATORS) {
            let token = format!("{}%", &cap[1]);
            if !indicators.contains(&token) {
                indicators.push(token);
            }
        }

        if GROWTH_TERMS.iter().any(|term| content.contains(term)) {
            let marker = "Positive trend detected".to_string();
            if !indicators.contains(&marker) {
                indicators.push(marker);
            }
        }
    }

    if indicators.is_empty() {
        format!("📈 {symbol}: Growth data limited, but could indicate overlooked opportunity!")
    } else {
        let listed: Vec<String> = indicators.into_iter().take(MAX_INDICATORS).collect();
        format!("📈 GROWTH POTENTIAL for {symbol}: {}", listed.join(", "))
    }
}

/// Search for positive news and developments about a stock
pub struct FindPositiveNewsTool {
    search: Arc<dyn EvidenceSearch>,
    max_results: usize,
}

impl FindPositiveNewsTool {
    /// Create the tool over the given evidence service
    pub fn new(search: Arc<dyn EvidenceSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for FindPositiveNewsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: SymbolParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        let query = format!(
            "{} stock positive news earnings growth revenue profit upgrade",
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

        Ok(Value::String(positive_signals(&params.symbol, &results)))
    }

    fn name(&self) -> &str {
        super::FIND_POSITIVE_NEWS
    }

    fn description(&self) -> &str {
        "Search for positive news and developments about a stock"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({"symbol": schema::string("Stock ticker symbol")}),
            vec!["symbol"],
        )
    }
}

/// Calculate basic growth metrics and bullish indicators
pub struct CalculateGrowthPotentialTool {
    search: Arc<dyn EvidenceSearch>,
    max_results: usize,
}

impl CalculateGrowthPotentialTool {
    /// Create the tool over the given evidence service
    pub fn new(search: Arc<dyn EvidenceSearch>, max_results: usize) -> Self {
        Self {
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Tool for CalculateGrowthPotentialTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: SymbolParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        let query = format!(
            "{} stock price earnings revenue growth rate market cap",
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

        Ok(Value::String(growth_indicators(&params.symbol, &results)))
    }

    fn name(&self) -> &str {
        super::CALCULATE_GROWTH_POTENTIAL
    }

    fn description(&self) -> &str {
        "Calculate basic growth metrics and bullish indicators for a stock"
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
    fn test_positive_signals_filters_by_keyword() {
        let results = vec![
            hit("Earnings", "Record profit this quarter"),
            hit("Weather", "Cloudy with a chance of rain"),
        ];
        let signal = positive_signals("AAPL", &results);
        assert!(signal.contains("POSITIVE SIGNALS for AAPL"));
        assert!(signal.contains("Record profit"));
        assert!(!signal.contains("Cloudy"));
    }

    #[test]
    fn test_positive_signals_caps_at_two_snippets() {
        let results = vec![
            hit("A", "strong results"),
            hit("B", "profit up"),
            hit("C", "bullish outlook"),
        ];
        let signal = positive_signals("AAPL", &results);
        assert_eq!(signal.matches('•').count(), 2);
    }

    #[test]
    fn test_positive_signals_fallback_names_symbol() {
        let signal = positive_signals("XYZ", &[]);
        assert!(signal.contains("XYZ"));
        assert!(signal.contains("undervalued"));
    }

    #[test]
    fn test_growth_indicators_extracts_distinct_percentages() {
        let results = vec![hit("Q1", "Revenue rose 12% and then 12% again, margin 3.5%")];
        let signal = growth_indicators("AAPL", &results);
        assert!(signal.contains("12%"));
        assert!(signal.contains("3.5%"));
        // duplicate 12% reported once
        assert_eq!(signal.matches("12%").count(), 1);
    }

    #[test]
    fn test_growth_indicators_fallback() {
        let signal = growth_indicators("XYZ", &[]);
        assert!(signal.contains("XYZ"));
        assert!(signal.contains("Growth data limited"));
    }

    #[tokio::test]
    async fn test_tool_recovers_from_search_failure() {
        let tool = FindPositiveNewsTool::new(Arc::new(StubSearch::failing()), 3);
        let out = tool
            .execute(json!({"symbol": "AAPL"}))
            .await
            .expect("lookup failure must not surface");
        let text = out.as_str().unwrap();
        assert!(text.contains("AAPL"));
    }

    #[tokio::test]
    async fn test_tool_rejects_bad_params() {
        let tool = FindPositiveNewsTool::new(Arc::new(StubSearch::empty()), 3);
        let err = tool.execute(json!({"ticker": "AAPL"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }
}
