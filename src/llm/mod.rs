// src/llm/mod.rs
pub mod client;
pub mod models;

use crate::utils::error::LlmError;

#[allow(unused_imports)]
pub use client::{OpenAiConfig, OpenAiSummarizer};

/// Turns an extracted project activities section into a list of
/// "activity name: summary" strings.
#[allow(async_fn_in_trait)]
pub trait Summarizer {
    async fn summarize_activities(&self, section: &str) -> Result<Vec<String>, LlmError>;
}
