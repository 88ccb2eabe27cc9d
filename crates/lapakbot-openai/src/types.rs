// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Chat Completions API request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A single message in the chat-completion transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// A tool (function) definition offered to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool type, always "function".
    #[serde(rename = "type")]
    pub kind: String,
    /// The function payload.
    pub function: FunctionDefinition,
}

impl ToolDefinition {
    /// Creates a function tool from a name, description, and JSON Schema.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            kind: "function".into(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

/// The function half of a tool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name (unique identifier).
    pub name: String,
    /// Human-readable description of what the function does.
    pub description: String,
    /// JSON Schema describing the function's parameters.
    pub parameters: serde_json::Value,
}

/// A request to the Chat Completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,

    /// Conversation transcript.
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature.
    pub temperature: f64,

    /// Completion token cap, omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Tool definitions available for the model to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    /// Tool-choice mode ("auto" when tools are offered).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

// --- Response types ---

/// A full response from the Chat Completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Candidate completions. The bot only ever reads the first.
    pub choices: Vec<Choice>,
    /// Token usage statistics.
    #[serde(default)]
    pub usage: Option<ApiUsage>,
}

impl ChatResponse {
    /// The message of the first choice, if the API returned any.
    pub fn first_message(&self) -> Option<&ResponseMessage> {
        self.choices.first().map(|c| &c.message)
    }
}

/// One candidate completion.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ResponseMessage,
    /// Why generation stopped ("stop", "tool_calls", ...).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message inside a choice. Either free text, tool calls,
/// or both.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Free-text content. `None` (or null) when the model only calls tools.
    #[serde(default)]
    pub content: Option<String>,
    /// Tool invocations requested by the model.
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    /// Call identifier.
    pub id: String,
    /// Call type, always "function".
    #[serde(rename = "type")]
    pub kind: String,
    /// The invoked function with its JSON-encoded arguments.
    pub function: FunctionCall,
}

/// The function half of a tool call. `arguments` is a JSON document encoded
/// as a string, exactly as the API delivers it.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable error message.
    pub message: String,
    /// Error type identifier.
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_chat_request_with_tools() {
        let req = ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![
                ChatMessage::system("Kamu adalah asisten toko."),
                ChatMessage::user("Barang saya rusak"),
            ],
            temperature: 0.7,
            max_tokens: Some(512),
            tools: Some(vec![ToolDefinition::function(
                "tangani_keluhan",
                "Menangani keluhan pelanggan",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "nomor_invoice": {"type": "string"}
                    },
                    "required": ["nomor_invoice"]
                }),
            )]),
            tool_choice: Some("auto".into()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["tool_choice"], "auto");
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(json["tools"][0]["type"], "function");
        assert_eq!(json["tools"][0]["function"]["name"], "tangani_keluhan");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Barang saya rusak");
    }

    #[test]
    fn serialize_chat_request_without_tools_omits_fields() {
        let req = ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![],
            temperature: 1.0,
            max_tokens: None,
            tools: None,
            tool_choice: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("tool_choice").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn deserialize_plain_content_response() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Halo kak!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        let msg = resp.first_message().unwrap();
        assert_eq!(msg.content.as_deref(), Some("Halo kak!"));
        assert!(msg.tool_calls.is_none());
        assert_eq!(resp.usage.unwrap().total_tokens, 16);
    }

    #[test]
    fn deserialize_tool_call_response() {
        let json = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "tangani_keluhan",
                            "arguments": "{\"nomor_invoice\": \"INV123\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        let msg = resp.first_message().unwrap();
        assert!(msg.content.is_none());
        let calls = msg.tool_calls.as_ref().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "tangani_keluhan");
        // Arguments stay a JSON string until the caller parses them.
        let args: serde_json::Value = serde_json::from_str(&calls[0].function.arguments).unwrap();
        assert_eq!(args["nomor_invoice"], "INV123");
    }

    #[test]
    fn deserialize_empty_choices() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(resp.first_message().is_none());
    }

    #[test]
    fn deserialize_api_error_body() {
        let json = r#"{"error": {"message": "Rate limit reached", "type": "rate_limit_error"}}"#;
        let err: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.error.message, "Rate limit reached");
        assert_eq!(err.error.type_.as_deref(), Some("rate_limit_error"));
    }
}
