//! The three committee roles
//!
//! A closed variant over bull, bear, and chairman. Routing and tool
//! authorization key off this enum, so an unrecognized role cannot exist at
//! runtime.

use crate::prompts;
use crate::tools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a committee agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitteeRole {
    /// Optimistic advocate - looks for reasons to buy
    Bull,
    /// Pessimistic advocate - looks for reasons to avoid
    Bear,
    /// Decision maker - weighs the debate and issues the final call
    Chairman,
}

impl CommitteeRole {
    /// Transcript label for this role
    pub fn label(self) -> &'static str {
        match self {
            Self::Bull => "BULL",
            Self::Bear => "BEAR",
            Self::Chairman => "CHAIRMAN",
        }
    }

    /// Role identity handed to the reasoning service as the system prompt
    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::Bull => prompts::BULL_PROMPT,
            Self::Bear => prompts::BEAR_PROMPT,
            Self::Chairman => prompts::CHAIRMAN_PROMPT,
        }
    }

    /// Names of the tools this role is authorized to invoke
    pub fn authorized_tools(self) -> &'static [&'static str] {
        match self {
            Self::Bull => &[tools::FIND_POSITIVE_NEWS, tools::CALCULATE_GROWTH_POTENTIAL],
            Self::Bear => &[tools::FIND_NEGATIVE_NEWS, tools::ASSESS_MARKET_RISKS],
            Self::Chairman => &[
                tools::GET_CURRENT_MARKET_SENTIMENT,
                tools::MAKE_INVESTMENT_DECISION,
            ],
        }
    }
}

impl fmt::Display for CommitteeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bull => "bull",
            Self::Bear => "bear",
            Self::Chairman => "chairman",
        };
        write!(f, "{name}")
    }
}
