// src/llm/client.rs
use crate::llm::models::{
    detailed_activities_function, flat_activities_function, ChatMessage, ChatRequest, ChatResponse,
    DetailedActivities, FlatActivities, ResponseMessage,
};
use crate::llm::Summarizer;
use crate::utils::error::LlmError;
use serde_json::Value;
use std::time::Duration;

// --- Constants ---
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo-16k";
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 120;

const ACTIVITIES_SYSTEM_PROMPT: &str = "You are tasked to analyze a section from a carbon removal project's \
documentation focusing exclusively on the project's activities. Your task is to extract the key project \
activities. Provide a list of activities, where each activity is summarised in a few sentences. If the snippet \
is fragmented or lacks meaningful content, respond with 'No meaningful data found.'";

const CLEANUP_SYSTEM_PROMPT: &str = "You extract project activities. In case there are no project activities \
described, answer with 'no project activities'.";

/// Connection settings, read from `OPENAI_API_KEY`, `OPENAI_MODEL` and `OPENAI_BASE_URL`.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self { api_key, model, base_url })
    }
}

/// What the model handed back for an activities request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityReply {
    /// Prose that still needs to be split into activities.
    FreeText(String),
    Activities(Vec<String>),
}

/// Summarizes a project activities section with the chat-completions API.
/// One attempt per call; callers decide what a failure means for the batch.
pub struct OpenAiSummarizer {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiSummarizer {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    async fn chat(&self, system_prompt: &str, user_content: &str, function: Value) -> Result<ResponseMessage, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_content },
            ],
            temperature: TEMPERATURE,
            functions: vec![function],
        };

        tracing::debug!("Sending {} characters to {} ({})", user_content.len(), url, self.config.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(LlmError::RateLimited);
            }
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Http { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmError::InvalidResponse("response contained no choices".to_string()))
    }

    /// Second pass for free-text answers: asks for a flat list of activities.
    async fn cleanup_activities(&self, prose: &str) -> Result<Vec<String>, LlmError> {
        let message = self.chat(CLEANUP_SYSTEM_PROMPT, prose, flat_activities_function()).await?;
        parse_flat_reply(message)
    }
}

impl Summarizer for OpenAiSummarizer {
    async fn summarize_activities(&self, section: &str) -> Result<Vec<String>, LlmError> {
        let message = self.chat(ACTIVITIES_SYSTEM_PROMPT, section, detailed_activities_function()).await?;
        match parse_detailed_reply(message)? {
            ActivityReply::Activities(activities) => Ok(activities),
            ActivityReply::FreeText(prose) => {
                tracing::debug!("Model answered in prose, running cleanup pass");
                self.cleanup_activities(&prose).await
            }
        }
    }
}

fn non_empty_content(message: &ResponseMessage) -> Option<&str> {
    message.content.as_deref().map(str::trim).filter(|c| !c.is_empty())
}

/// Interprets a reply to the detailed activities request.
pub fn parse_detailed_reply(message: ResponseMessage) -> Result<ActivityReply, LlmError> {
    if let Some(content) = non_empty_content(&message) {
        return Ok(ActivityReply::FreeText(content.to_string()));
    }

    let call = message
        .function_call
        .ok_or_else(|| LlmError::InvalidResponse("neither content nor function call in reply".to_string()))?;
    let parsed: DetailedActivities = serde_json::from_str(&call.arguments)
        .map_err(|e| LlmError::InvalidResponse(format!("bad function arguments: {}", e)))?;

    Ok(ActivityReply::Activities(
        parsed
            .project_activities
            .into_iter()
            .map(|a| format!("{}: {}", a.activity_name, a.activity_summary))
            .collect(),
    ))
}

/// Interprets a reply to the cleanup request.
pub fn parse_flat_reply(message: ResponseMessage) -> Result<Vec<String>, LlmError> {
    if let Some(content) = non_empty_content(&message) {
        return Ok(vec![content.to_string()]);
    }

    let call = message
        .function_call
        .ok_or_else(|| LlmError::InvalidResponse("neither content nor function call in reply".to_string()))?;
    let parsed: FlatActivities = serde_json::from_str(&call.arguments)
        .map_err(|e| LlmError::InvalidResponse(format!("bad function arguments: {}", e)))?;
    Ok(parsed.project_activities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(json: &str) -> ResponseMessage {
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        response.choices.into_iter().next().unwrap().message
    }

    #[test]
    fn test_function_call_reply_is_formatted() {
        let msg = message(
            r#"{"choices": [{"message": {"content": null, "function_call": {
                "name": "list_project_activities",
                "arguments": "{\"project_activities\": [{\"activity_name\": \"Patrols\", \"activity_summary\": \"Rangers patrol the forest.\"}]}"
            }}}]}"#,
        );

        assert_eq!(
            parse_detailed_reply(msg).unwrap(),
            ActivityReply::Activities(vec!["Patrols: Rangers patrol the forest.".to_string()])
        );
    }

    #[test]
    fn test_content_reply_needs_cleanup() {
        let msg = message(r#"{"choices": [{"message": {"content": "1. Patrols 2. Nurseries"}}]}"#);
        assert_eq!(
            parse_detailed_reply(msg).unwrap(),
            ActivityReply::FreeText("1. Patrols 2. Nurseries".to_string())
        );
    }

    #[test]
    fn test_flat_reply() {
        let msg = message(
            r#"{"choices": [{"message": {"content": "", "function_call": {
                "name": "list_project_activities",
                "arguments": "{\"project_activities\": [\"Patrols: forest protection\", \"Nurseries: seedlings\"]}"
            }}}]}"#,
        );
        assert_eq!(
            parse_flat_reply(msg).unwrap(),
            vec!["Patrols: forest protection".to_string(), "Nurseries: seedlings".to_string()]
        );
    }

    #[test]
    fn test_malformed_arguments_are_invalid_response() {
        let msg = message(
            r#"{"choices": [{"message": {"function_call": {"name": "x", "arguments": "not json"}}}]}"#,
        );
        assert!(matches!(parse_detailed_reply(msg), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_empty_reply_is_invalid_response() {
        let msg = message(r#"{"choices": [{"message": {"content": "   "}}]}"#);
        assert!(matches!(parse_flat_reply(msg), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_request_serialization_omits_empty_functions() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage { role: "user", content: "hi" }],
            temperature: TEMPERATURE,
            functions: Vec::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("functions").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
