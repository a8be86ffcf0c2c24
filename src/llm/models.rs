// src/llm/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Request body for the chat-completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    #[allow(dead_code)]
    pub name: String,
    /// JSON-encoded arguments, as produced by the model.
    pub arguments: String,
}

/// Arguments of the detailed `list_project_activities` function.
#[derive(Debug, Deserialize)]
pub struct DetailedActivities {
    pub project_activities: Vec<ActivityEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityEntry {
    #[serde(default)]
    pub activity_name: String,
    #[serde(default)]
    pub activity_summary: String,
}

/// Arguments of the cleanup variant, where each activity is already one string.
#[derive(Debug, Deserialize)]
pub struct FlatActivities {
    pub project_activities: Vec<String>,
}

pub fn detailed_activities_function() -> Value {
    json!({
        "name": "list_project_activities",
        "description": "logs the project activities in the database",
        "parameters": {
            "type": "object",
            "properties": {
                "project_activities": {
                    "type": "array",
                    "description": "the list of project activities",
                    "items": {
                        "type": "object",
                        "properties": {
                            "activity_name": {
                                "type": "string",
                                "description": "description of a project activity"
                            },
                            "activity_summary": {
                                "type": "string",
                                "description": "few sentences summarising the project activity"
                            }
                        }
                    }
                }
            },
            "required": ["project_activities"]
        }
    })
}

pub fn flat_activities_function() -> Value {
    json!({
        "name": "list_project_activities",
        "description": "logs the project activities in the database",
        "parameters": {
            "type": "object",
            "properties": {
                "project_activities": {
                    "type": "array",
                    "description": "the list of project activities",
                    "items": {
                        "type": "string",
                        "description": "description of a project activity in the format 'activity name: activity summary'"
                    }
                }
            },
            "required": ["project_activities"]
        }
    })
}
