// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lapakbot run` and `lapakbot serve` command implementations.

use std::time::Duration;

use lapakbot_agent::run_reply_pass;
use lapakbot_config::LapakbotConfig;
use lapakbot_core::LapakbotError;
use tracing::{error, info};

use crate::context::build_context;
use crate::shutdown;

/// Runs one reply pass and exits.
pub async fn run_once(config: &LapakbotConfig) -> Result<(), LapakbotError> {
    let ctx = build_context(config).await?;
    let summary = run_reply_pass(
        &ctx,
        config.gateway.conversation_limit,
        config.agent.max_concurrency,
    )
    .await?;
    info!(replied = summary.replied, "single pass done");
    ctx.db.close().await?;
    Ok(())
}

/// Polls for unread conversations until a shutdown signal arrives.
///
/// A failing pass is logged and the loop keeps going; only startup errors
/// are fatal.
pub async fn run_serve(config: &LapakbotConfig) -> Result<(), LapakbotError> {
    let ctx = build_context(config).await?;
    let cancel = shutdown::install_signal_handler();
    let poll_interval = Duration::from_secs(config.agent.poll_interval_secs);
    info!(
        poll_interval_secs = config.agent.poll_interval_secs,
        max_concurrency = config.agent.max_concurrency,
        "lapakbot serve started"
    );

    loop {
        match run_reply_pass(
            &ctx,
            config.gateway.conversation_limit,
            config.agent.max_concurrency,
        )
        .await
        {
            Ok(summary) => info!(
                dispatched = summary.dispatched,
                replied = summary.replied,
                "pass complete"
            ),
            Err(e) => error!(error = %e, "reply pass failed"),
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }

    ctx.db.close().await?;
    info!("lapakbot serve shutdown complete");
    Ok(())
}
