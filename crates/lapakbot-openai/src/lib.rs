// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Chat Completions client for lapakbot.
//!
//! Wraps the Chat Completions API with typed request/response structures,
//! function-calling (tool) support, and a retry policy with exponential
//! backoff for transient failures.

pub mod client;
pub mod retry;
pub mod types;

pub use client::OpenAiClient;
pub use retry::RetryPolicy;
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, FunctionCall, ResponseMessage, ToolCall,
    ToolDefinition,
};
