// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the shared [`AgentContext`] from config and the datastore.

use std::sync::Arc;
use std::time::Duration;

use lapakbot_agent::{AgentContext, ResolvedSettings};
use lapakbot_config::LapakbotConfig;
use lapakbot_core::LapakbotError;
use lapakbot_gateway::GatewayClient;
use lapakbot_openai::{OpenAiClient, RetryPolicy};
use lapakbot_storage::{read_settings, Database};

/// Opens storage, resolves settings, and wires up the HTTP clients.
pub async fn build_context(config: &LapakbotConfig) -> Result<AgentContext, LapakbotError> {
    let db = Database::open(&config.storage.database_path).await?;
    let row = read_settings(&db).await?;
    let settings = Arc::new(ResolvedSettings::resolve(config, row).await?);

    let retry = RetryPolicy {
        max_attempts: config.openai.retry_max_attempts,
        base_delay: Duration::from_secs(config.openai.retry_base_delay_secs),
        multiplier: 2.0,
        jitter: config.openai.retry_jitter,
    };
    let openai = OpenAiClient::new(&settings.api_key, config.openai.base_url.clone(), retry)?;
    let gateway = GatewayClient::new(
        config.gateway.base_url.clone(),
        config.gateway.order_base_url.clone(),
        config.gateway.token_refresh_url.clone(),
        Duration::from_secs(config.gateway.timeout_secs),
    )?;

    Ok(AgentContext {
        gateway,
        openai,
        db,
        settings,
        page_size: config.gateway.page_size,
    })
}
