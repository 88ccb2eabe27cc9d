// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lapakbot - marketplace chat auto-reply bot.
//!
//! Binary entry point: `run` does one reply pass, `serve` polls on an
//! interval, `refresh-token` keeps the gateway OAuth token alive.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod context;
mod logging;
mod refresh;
mod serve;
mod shutdown;

use clap::{Parser, Subcommand};
use tracing::error;

/// Lapakbot - marketplace chat auto-reply bot.
#[derive(Parser, Debug)]
#[command(name = "lapakbot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single reply pass and exit.
    Run,
    /// Poll for unread conversations on an interval.
    Serve,
    /// Keep the gateway OAuth token refreshed.
    RefreshToken {
        /// Seconds between refresh calls.
        #[arg(long, default_value_t = 3600)]
        interval_secs: u64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match lapakbot_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            lapakbot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    logging::init_tracing(&config.agent.log_level, &config.agent.log_dir);

    let result = match cli.command {
        Some(Commands::Run) => serve::run_once(&config).await,
        Some(Commands::Serve) => serve::run_serve(&config).await,
        Some(Commands::RefreshToken { interval_secs }) => {
            refresh::run_refresh_loop(&config, interval_secs).await
        }
        None => {
            println!("lapakbot: use --help for available commands");
            return;
        }
    };

    if let Err(e) = result {
        error!(error = %e, "lapakbot exited with an error");
        std::process::exit(1);
    }
}
