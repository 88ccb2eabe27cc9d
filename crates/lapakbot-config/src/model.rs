// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Lapakbot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Lapakbot configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LapakbotConfig {
    /// Bot identity, prompt, and dispatch settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenAI chat-completion API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Marketplace seller gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Bot identity and dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory receiving the rotating log file.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Inline system prompt string. Overridden by `system_prompt_file` if both set,
    /// and by the datastore settings row if one exists.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the system prompt. Takes precedence over
    /// `system_prompt` if both are set.
    #[serde(default)]
    pub system_prompt_file: Option<String>,

    /// Maximum number of conversations replied to concurrently.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Seconds between reply passes in `serve` mode.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            system_prompt: None,
            system_prompt_file: None,
            max_concurrency: default_max_concurrency(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_agent_name() -> String {
    "lapakbot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_max_concurrency() -> usize {
    3
}

fn default_poll_interval_secs() -> u64 {
    60
}

/// OpenAI chat-completion API configuration.
///
/// `api_key`, `model`, and `temperature` act as fallbacks; the datastore
/// settings row overrides them when present.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` requires a settings row or environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier for chat completions.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature passed to the completion request.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Completion token cap. `None` lets the model decide.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Base URL of the chat-completion API.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Total attempts for a completion request (including the first).
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,

    /// Base delay in seconds before the first retry.
    #[serde(default = "default_retry_base_delay_secs")]
    pub retry_base_delay_secs: u64,

    /// Whether retry delays carry random jitter.
    #[serde(default = "default_retry_jitter")]
    pub retry_jitter: bool,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            base_url: default_openai_base_url(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_base_delay_secs: default_retry_base_delay_secs(),
            retry_jitter: default_retry_jitter(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    1.0
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_retry_max_attempts() -> u32 {
    3
}

fn default_retry_base_delay_secs() -> u64 {
    5
}

fn default_retry_jitter() -> bool {
    true
}

/// Marketplace seller gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Base URL of the messaging gateway.
    #[serde(default = "default_gateway_base_url")]
    pub base_url: String,

    /// Base URL of the order-lookup backend.
    #[serde(default = "default_order_base_url")]
    pub order_base_url: String,

    /// Full URL of the OAuth token-refresh endpoint.
    #[serde(default = "default_token_refresh_url")]
    pub token_refresh_url: String,

    /// Maximum conversations fetched per reply pass.
    #[serde(default = "default_conversation_limit")]
    pub conversation_limit: u32,

    /// Messages fetched per conversation history request.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds applied to every gateway call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_base_url(),
            order_base_url: default_order_base_url(),
            token_refresh_url: default_token_refresh_url(),
            conversation_limit: default_conversation_limit(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_gateway_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_order_base_url() -> String {
    "https://app.bantudagang.com".to_string()
}

fn default_token_refresh_url() -> String {
    "http://localhost:10000/api/refresh_token".to_string()
}

fn default_conversation_limit() -> u32 {
    20
}

fn default_page_size() -> u32 {
    25
}

fn default_timeout_secs() -> u64 {
    30
}

/// Local storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "lapakbot.db".to_string()
}
