//! Chat turn validation, upstream request assembly and preference extraction.
//!
//! The upstream is asked to report every preference it learns through the
//! `record_preference` tool; each tool call's `summary` ends up in the
//! preference log.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::UpstreamConfig;
use crate::preferences::normalize_message;
use crate::proxy::error::ProxyError;

pub const PREFERENCE_TOOL: &str = "record_preference";

const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly matchmaking assistant. Chat with the \
user about what they look for in a partner. Whenever the user reveals a preference, call the \
record_preference tool with a one-sentence summary of it, and keep the conversation going.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub system: Option<String>,
}

/// What the chat endpoint returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub preferences: Vec<String>,
}

impl ChatRequest {
    /// Validates an incoming `{messages, system?}` body.
    pub fn from_json(body: &Value) -> Result<Self, ProxyError> {
        let messages = body
            .get("messages")
            .and_then(Value::as_array)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ProxyError::InvalidRequest("messages is required".to_string()))?;

        let messages = messages
            .iter()
            .enumerate()
            .map(|(index, message)| parse_message(index, message))
            .collect::<Result<Vec<_>, _>>()?;

        let system = match body.get("system") {
            None | Some(Value::Null) => None,
            Some(Value::String(system)) => Some(system.clone()),
            Some(_) => {
                return Err(ProxyError::InvalidRequest(
                    "system must be a string".to_string(),
                ))
            }
        };

        Ok(Self { messages, system })
    }

    /// Messages API request body, with the preference tool attached.
    pub fn upstream_body(&self, config: &UpstreamConfig) -> Value {
        json!({
            "model": config.model,
            "max_tokens": config.max_tokens,
            "system": self.system.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT),
            "messages": self.messages,
            "tools": [preference_tool()],
        })
    }
}

fn parse_message(index: usize, message: &Value) -> Result<ChatMessage, ProxyError> {
    let role = match message.get("role").and_then(Value::as_str) {
        Some("user") => Role::User,
        Some("assistant") => Role::Assistant,
        _ => {
            return Err(ProxyError::InvalidRequest(format!(
                "messages[{}].role must be \"user\" or \"assistant\"",
                index
            )))
        }
    };

    let content = message
        .get("content")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| {
            ProxyError::InvalidRequest(format!("messages[{}].content is required", index))
        })?;

    Ok(ChatMessage {
        role,
        content: content.to_string(),
    })
}

fn preference_tool() -> Value {
    json!({
        "name": PREFERENCE_TOOL,
        "description": "Record one preference the user has expressed about a partner.",
        "input_schema": {
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "One-sentence summary of the preference."
                }
            },
            "required": ["summary"]
        }
    })
}

/// Pulls reply text and preference summaries out of a Messages API response.
///
/// Tool calls other than the preference tool, and preference calls without
/// a usable summary, are skipped.
pub fn parse_reply(body: &Value) -> Result<ChatReply, ProxyError> {
    let blocks = body
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| ProxyError::InvalidUpstreamResponse("missing content array".to_string()))?;

    let mut text = Vec::new();
    let mut preferences = Vec::new();

    for block in blocks {
        match block.get("type").and_then(Value::as_str) {
            Some("text") => {
                if let Some(t) = block.get("text").and_then(Value::as_str) {
                    text.push(t.to_string());
                }
            }
            Some("tool_use") => {
                if block.get("name").and_then(Value::as_str) != Some(PREFERENCE_TOOL) {
                    continue;
                }
                let summary = block
                    .get("input")
                    .and_then(|input| input.get("summary"))
                    .and_then(Value::as_str)
                    .map(normalize_message)
                    .filter(|s| !s.is_empty());
                match summary {
                    Some(summary) => preferences.push(summary),
                    None => tracing::debug!("Preference tool call without summary skipped"),
                }
            }
            _ => {}
        }
    }

    Ok(ChatReply {
        reply: text.join("\n"),
        preferences,
    })
}
