// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lapakbot refresh-token` command implementation.
//!
//! Keeps the gateway OAuth token alive by POSTing the refresh endpoint on
//! an interval. Failures are logged, never fatal.

use std::time::Duration;

use lapakbot_config::LapakbotConfig;
use lapakbot_core::LapakbotError;
use lapakbot_gateway::GatewayClient;
use tracing::{info, warn};

use crate::shutdown;

pub async fn run_refresh_loop(
    config: &LapakbotConfig,
    interval_secs: u64,
) -> Result<(), LapakbotError> {
    let gateway = GatewayClient::new(
        config.gateway.base_url.clone(),
        config.gateway.order_base_url.clone(),
        config.gateway.token_refresh_url.clone(),
        Duration::from_secs(config.gateway.timeout_secs),
    )?;
    let cancel = shutdown::install_signal_handler();
    info!(interval_secs, "token refresh loop started");

    loop {
        match gateway.refresh_token().await {
            Ok(body) => info!(body = body.as_str(), "token refreshed"),
            Err(e) => warn!(error = %e, "token refresh failed"),
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(interval_secs)) => {}
        }
    }

    info!("token refresh loop stopped");
    Ok(())
}
