//! Concrete reasoning-service providers

pub mod openai;

pub use openai::{OpenAIConfig, OpenAIProvider};
