// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Effective runtime settings: TOML config merged with the datastore
//! settings row.

use lapakbot_config::LapakbotConfig;
use lapakbot_core::{BotSettings, LapakbotError};
use tracing::info;

/// Fallback system prompt when neither config nor the settings row carry one.
const DEFAULT_SYSTEM_PROMPT: &str = "Kamu adalah asisten layanan pelanggan toko online. \
Jawab pertanyaan pelanggan dengan ramah dan singkat dalam bahasa Indonesia.";

/// Settings the reply pipeline actually runs with.
///
/// Resolved once at startup: values from the datastore settings row win over
/// the TOML config, which wins over built-in defaults. Immutable afterwards;
/// shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub system_prompt: String,
}

impl ResolvedSettings {
    /// Merges the settings row over the config. Fails when no API key is
    /// available from either source.
    pub async fn resolve(
        config: &LapakbotConfig,
        row: Option<BotSettings>,
    ) -> Result<Self, LapakbotError> {
        let row = row.unwrap_or_default();

        let api_key = row
            .openai_api
            .or_else(|| config.openai.api_key.clone())
            .ok_or_else(|| {
                LapakbotError::Config(
                    "no OpenAI API key: set openai.api_key or store one in the settings table"
                        .to_string(),
                )
            })?;

        let model = row.openai_model.unwrap_or_else(|| config.openai.model.clone());
        let temperature = row.openai_temperature.unwrap_or(config.openai.temperature);

        let system_prompt = match row.openai_prompt {
            Some(prompt) => prompt,
            None => resolve_config_prompt(config).await?,
        };

        info!(model = model.as_str(), temperature, "settings resolved");
        Ok(Self {
            api_key,
            model,
            temperature,
            max_tokens: config.openai.max_tokens,
            system_prompt,
        })
    }
}

/// Reads the prompt from `agent.system_prompt_file` if set, else uses
/// `agent.system_prompt`, else the built-in default.
async fn resolve_config_prompt(config: &LapakbotConfig) -> Result<String, LapakbotError> {
    if let Some(path) = &config.agent.system_prompt_file {
        let prompt = tokio::fs::read_to_string(path).await.map_err(|e| {
            LapakbotError::Config(format!("failed to read system prompt file {path}: {e}"))
        })?;
        return Ok(prompt.trim().to_string());
    }
    Ok(config
        .agent
        .system_prompt
        .clone()
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()))
}
