//! Deterministic decision scorer
//!
//! Converts the advocates' free-text arguments into a structured
//! recommendation. Intentionally a transparent heuristic rather than a model
//! call, so the terminal decision is auditable and stable for a given debate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Bull strength vocabulary
///
/// A bull argument containing any of these words (case-insensitive substring
/// match) counts as a strong bullish signal. The list is small and fixed;
/// changing it changes every decision, so it is a documented constant rather
/// than configuration.
pub const BULL_STRENGTH_TERMS: [&str; 4] = ["growth", "profit", "upgrade", "strong"];

/// Bear strength vocabulary, counterpart of [`BULL_STRENGTH_TERMS`]
pub const BEAR_STRENGTH_TERMS: [&str; 4] = ["risk", "decline", "warning", "concern"];

/// Final recommendation for a stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// The bull case won
    Buy,
    /// The bear case won
    SellAvoid,
    /// Neither side was decisively stronger
    HoldResearchMore,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Buy => "BUY",
            Self::SellAvoid => "SELL/AVOID",
            Self::HoldResearchMore => "HOLD/RESEARCH MORE",
        };
        write!(f, "{text}")
    }
}

/// Confidence attached to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// One side clearly won the debate
    High,
    /// The debate was inconclusive
    Medium,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::High => "High",
            Self::Medium => "Medium",
        };
        write!(f, "{text}")
    }
}

/// The terminal decision of a session, produced exactly once by the chairman
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Stock symbol the decision is about
    pub symbol: String,
    /// Recommendation
    pub recommendation: Recommendation,
    /// Confidence level
    pub confidence: Confidence,
    /// Number of bullet points counted in the bull's arguments
    pub bull_score: usize,
    /// Number of bullet points counted in the bear's arguments
    pub bear_score: usize,
    /// One-line rationale
    pub rationale: String,
}

impl Decision {
    /// Render the decision as the tool-output text the chairman conditions on
    pub fn report(&self) -> String {
        format!(
            "🎯 FINAL DECISION for {}: {}\nConfidence Level: {}\nBull Arguments: {} points\nBear Arguments: {} points\nRecommendation: {}",
            self.symbol,
            self.recommendation,
            self.confidence,
            self.bull_score,
            self.bear_score,
            self.rationale,
        )
    }
}

/// Shared slot the chairman's decision tool records into
///
/// The session reads it after the chairman's turn to permit the summary
/// transition.
pub type DecisionSlot = Arc<Mutex<Option<Decision>>>;

/// Score the debate and produce the final recommendation
///
/// `bull_score`/`bear_score` count bullet-delimited argument segments (at
/// least 1 when no markers are present). A side wins only when it has more
/// segments AND its strength vocabulary appears in its text; otherwise the
/// result is hold-and-research with medium confidence.
pub fn score_debate(symbol: &str, bull_points: &str, bear_points: &str) -> Decision {
    let bull_score = segment_count(bull_points);
    let bear_score = segment_count(bear_points);

    let strong_bull = contains_any(bull_points, &BULL_STRENGTH_TERMS);
    let strong_bear = contains_any(bear_points, &BEAR_STRENGTH_TERMS);

    let (recommendation, confidence) = if bull_score > bear_score && strong_bull {
        (Recommendation::Buy, Confidence::High)
    } else if bear_score > bull_score && strong_bear {
        (Recommendation::SellAvoid, Confidence::High)
    } else {
        (Recommendation::HoldResearchMore, Confidence::Medium)
    };

    let rationale = format!(
        "Based on current analysis, {} position",
        recommendation.to_string().to_lowercase()
    );

    Decision {
        symbol: symbol.to_string(),
        recommendation,
        confidence,
        bull_score,
        bear_score,
        rationale,
    }
}

/// Count non-empty bullet-delimited segments; 1 when no markers are present
fn segment_count(text: &str) -> usize {
    if text.contains('•') {
        text.split('•')
            .filter(|segment| !segment.trim().is_empty())
            .count()
            .max(1)
    } else {
        1
    }
}

fn contains_any(text: &str, terms: &[&str]) -> bool {
    let lower = text.to_lowercase();
    terms.iter().any(|term| lower.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_bull_majority_is_buy_high() {
        let decision = score_debate("AAPL", "• growth strong • profit", "• minor concern");
        assert_eq!(decision.bull_score, 2);
        assert_eq!(decision.bear_score, 1);
        assert_eq!(decision.recommendation, Recommendation::Buy);
        assert_eq!(decision.confidence, Confidence::High);
    }

    #[test]
    fn test_strong_bear_majority_is_sell_high() {
        let decision = score_debate("TSLA", "nothing special", "• risk • decline • warning");
        assert_eq!(decision.bull_score, 1);
        assert_eq!(decision.bear_score, 3);
        assert_eq!(decision.recommendation, Recommendation::SellAvoid);
        assert_eq!(decision.confidence, Confidence::High);
    }

    #[test]
    fn test_equal_scores_hold_medium() {
        let decision = score_debate("NVDA", "• ok", "• ok");
        assert_eq!(decision.recommendation, Recommendation::HoldResearchMore);
        assert_eq!(decision.confidence, Confidence::Medium);
    }

    #[test]
    fn test_majority_without_strength_words_holds() {
        // More bull segments, but no strength vocabulary on either side
        let decision = score_debate("IBM", "• cheap • shiny", "fine");
        assert_eq!(decision.recommendation, Recommendation::HoldResearchMore);
    }

    #[test]
    fn test_scorer_is_idempotent() {
        let first = score_debate("AAPL", "• growth strong • profit", "• minor concern");
        let second = score_debate("AAPL", "• growth strong • profit", "• minor concern");
        assert_eq!(first, second);
    }

    #[test]
    fn test_unmarked_text_counts_as_one_segment() {
        assert_eq!(segment_count("no bullets here"), 1);
        assert_eq!(segment_count("• a • b • c"), 3);
        assert_eq!(segment_count("•"), 1);
    }

    #[test]
    fn test_report_names_symbol_and_recommendation() {
        let decision = score_debate("AAPL", "• growth strong • profit", "• minor concern");
        let report = decision.report();
        assert!(report.contains("FINAL DECISION for AAPL: BUY"));
        assert!(report.contains("Confidence Level: High"));
    }
}
