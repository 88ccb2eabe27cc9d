// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./lapakbot.toml` > `~/.config/lapakbot/lapakbot.toml`
//! > `/etc/lapakbot/lapakbot.toml`, with environment variable overrides via the
//! `LAPAKBOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LapakbotConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lapakbot/lapakbot.toml` (system-wide)
/// 3. `~/.config/lapakbot/lapakbot.toml` (user XDG config)
/// 4. `./lapakbot.toml` (local directory)
/// 5. `LAPAKBOT_*` environment variables
pub fn load_config() -> Result<LapakbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LapakbotConfig::default()))
        .merge(Toml::file("/etc/lapakbot/lapakbot.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lapakbot/lapakbot.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lapakbot.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LapakbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LapakbotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LapakbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LapakbotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `LAPAKBOT_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("LAPAKBOT_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: LAPAKBOT_GATEWAY_BASE_URL -> "gateway_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_str_with_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.agent.name, "lapakbot");
        assert_eq!(config.openai.temperature, 1.0);
    }

    #[test]
    fn load_from_str_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [agent]
            max_concurrency = 8

            [gateway]
            base_url = "http://gateway.internal:3000"
            "#,
        )
        .unwrap();
        assert_eq!(config.agent.max_concurrency, 8);
        assert_eq!(config.gateway.base_url, "http://gateway.internal:3000");
        // Unset keys still carry defaults.
        assert_eq!(config.gateway.page_size, 25);
    }

    #[test]
    fn load_from_str_rejects_unknown_section_key() {
        let result = load_config_from_str(
            r#"
            [openai]
            modell = "gpt-4o"
            "#,
        );
        assert!(result.is_err());
    }
}
