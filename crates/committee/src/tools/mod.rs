//! Evidence tools for the committee roles
//!
//! Six tools, split by authorization: two bull-only, two bear-only, two
//! chairman-only. Lookup-backed tools reduce search snippets to short signal
//! strings and never fail - an empty or failed lookup produces a
//! deterministic fallback signal instead, so a reasoning turn always has tool
//! output to condition on.

pub mod bear;
pub mod bull;
pub mod chairman;

pub use bear::{AssessMarketRisksTool, FindNegativeNewsTool};
pub use bull::{CalculateGrowthPotentialTool, FindPositiveNewsTool};
pub use chairman::{GetMarketSentimentTool, MakeInvestmentDecisionTool};

use crate::roles::CommitteeRole;
use crate::scorer::DecisionSlot;
use crate::search::EvidenceSearch;
use committee_tools::ToolRegistry;
use serde::Deserialize;
use std::sync::Arc;

/// Bull-only: search for positive news about a stock
pub const FIND_POSITIVE_NEWS: &str = "find_positive_news";
/// Bull-only: extract growth metrics and bullish indicators
pub const CALCULATE_GROWTH_POTENTIAL: &str = "calculate_growth_potential";
/// Bear-only: search for negative news and red flags
pub const FIND_NEGATIVE_NEWS: &str = "find_negative_news";
/// Bear-only: assess market risks and bearish indicators
pub const ASSESS_MARKET_RISKS: &str = "assess_market_risks";
/// Chairman-only: current market sentiment and performance
pub const GET_CURRENT_MARKET_SENTIMENT: &str = "get_current_market_sentiment";
/// Chairman-only: record the final structured recommendation
pub const MAKE_INVESTMENT_DECISION: &str = "make_investment_decision";

/// Parameters shared by the single-argument lookup tools
#[derive(Debug, Deserialize)]
pub(crate) struct SymbolParams {
    /// Stock ticker symbol
    pub symbol: String,
}

/// Build the registry holding exactly the tools `role` may invoke
pub fn toolset_for(
    role: CommitteeRole,
    search: &Arc<dyn EvidenceSearch>,
    decision_slot: &DecisionSlot,
    max_results: usize,
) -> ToolRegistry {
    let registry = ToolRegistry::new();
    match role {
        CommitteeRole::Bull => {
            registry.register(Arc::new(FindPositiveNewsTool::new(
                Arc::clone(search),
                max_results,
            )));
            registry.register(Arc::new(CalculateGrowthPotentialTool::new(
                Arc::clone(search),
                max_results,
            )));
        }
        CommitteeRole::Bear => {
            registry.register(Arc::new(FindNegativeNewsTool::new(
                Arc::clone(search),
                max_results,
            )));
            registry.register(Arc::new(AssessMarketRisksTool::new(
                Arc::clone(search),
                max_results,
            )));
        }
        CommitteeRole::Chairman => {
            registry.register(Arc::new(GetMarketSentimentTool::new(
                Arc::clone(search),
                max_results,
            )));
            registry.register(Arc::new(MakeInvestmentDecisionTool::new(Arc::clone(
                decision_slot,
            ))));
        }
    }
    registry
}

/// Clip a snippet to a bounded number of characters, marking the cut
pub(crate) fn clip(text: &str, limit: usize) -> String {
    let clipped: String = text.chars().take(limit).collect();
    format!("{clipped}...")
}

/// Result title with the original's fallback for untitled hits
pub(crate) fn title_or_default(title: &str) -> &str {
    if title.is_empty() { "News" } else { title }
}
