//! Configuration for committee sessions
//!
//! Everything a session needs beyond its injected collaborators lives here,
//! passed in at construction rather than read from globals.

use crate::error::{CommitteeError, Result};
use serde::{Deserialize, Serialize};

/// Default reasoning model (the original committee runs on gpt-4o-mini)
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for a debate session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeConfig {
    /// Model identifier passed to the reasoning service
    pub model: String,

    /// Max tokens per agent completion
    pub max_tokens: usize,

    /// Max tokens for the closing summary
    pub summary_max_tokens: usize,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Bound on reason-act-observe rounds within one turn
    pub max_tool_rounds: usize,

    /// Result bound per evidence lookup
    pub search_max_results: usize,
}

impl Default for CommitteeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
            summary_max_tokens: 512,
            temperature: Some(0.7),
            max_tool_rounds: 6,
            search_max_results: 3,
        }
    }
}

impl CommitteeConfig {
    /// Create a new configuration builder
    pub fn builder() -> CommitteeConfigBuilder {
        CommitteeConfigBuilder::default()
    }

    /// Override the model from `OPENAI_MODEL` if set
    pub fn with_env_model(mut self) -> Self {
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            self.model = model;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(CommitteeError::Config("model must not be empty".to_string()));
        }
        if self.max_tool_rounds == 0 {
            return Err(CommitteeError::Config(
                "max_tool_rounds must be greater than 0".to_string(),
            ));
        }
        if self.search_max_results == 0 {
            return Err(CommitteeError::Config(
                "search_max_results must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`CommitteeConfig`]
#[derive(Debug, Default)]
pub struct CommitteeConfigBuilder {
    model: Option<String>,
    max_tokens: Option<usize>,
    summary_max_tokens: Option<usize>,
    temperature: Option<f32>,
    max_tool_rounds: Option<usize>,
    search_max_results: Option<usize>,
}

impl CommitteeConfigBuilder {
    /// Set the reasoning model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens per agent completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set max tokens for the closing summary
    pub fn summary_max_tokens(mut self, max_tokens: usize) -> Self {
        self.summary_max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the per-turn tool-round bound
    pub fn max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = Some(rounds);
        self
    }

    /// Set the evidence-lookup result bound
    pub fn search_max_results(mut self, max_results: usize) -> Self {
        self.search_max_results = Some(max_results);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<CommitteeConfig> {
        let defaults = CommitteeConfig::default();

        let config = CommitteeConfig {
            model: self.model.unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            summary_max_tokens: self
                .summary_max_tokens
                .unwrap_or(defaults.summary_max_tokens),
            temperature: self.temperature.or(defaults.temperature),
            max_tool_rounds: self.max_tool_rounds.unwrap_or(defaults.max_tool_rounds),
            search_max_results: self
                .search_max_results
                .unwrap_or(defaults.search_max_results),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CommitteeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.search_max_results, 3);
    }

    #[test]
    fn test_builder_overrides() {
        let config = CommitteeConfig::builder()
            .model("gpt-4o")
            .max_tool_rounds(4)
            .build()
            .unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tool_rounds, 4);
    }

    #[test]
    fn test_zero_tool_rounds_rejected() {
        let result = CommitteeConfig::builder().max_tool_rounds(0).build();
        assert!(result.is_err());
    }
}
