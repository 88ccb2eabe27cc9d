// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing initialization: daily-rolling log file plus console output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. `RUST_LOG` overrides the configured
/// level when set.
pub fn init_tracing(log_level: &str, log_dir: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lapakbot={log_level},warn")));

    let file_appender = tracing_appender::rolling::daily(log_dir, "lapakbot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // Leak the guard so the non-blocking writer lives for the entire process.
    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
