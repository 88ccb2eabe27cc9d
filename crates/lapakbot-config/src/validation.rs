// SPDX-FileCopyrightText: 2026 Lapakbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL shapes, positive limits, and temperature bounds.

use crate::diagnostic::ConfigError;
use crate::model::LapakbotConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LapakbotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.agent.max_concurrency == 0 {
        errors.push(ConfigError::Validation {
            message: "agent.max_concurrency must be at least 1".to_string(),
        });
    }

    if config.agent.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "agent.poll_interval_secs must be at least 1".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.openai.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "openai.temperature must be between 0.0 and 2.0, got {}",
                config.openai.temperature
            ),
        });
    }

    if config.openai.max_tokens == Some(0) {
        errors.push(ConfigError::Validation {
            message: "openai.max_tokens must be at least 1 when set".to_string(),
        });
    }

    if config.openai.retry_max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.retry_max_attempts must be at least 1".to_string(),
        });
    }

    for (key, value) in [
        ("openai.base_url", &config.openai.base_url),
        ("gateway.base_url", &config.gateway.base_url),
        ("gateway.order_base_url", &config.gateway.order_base_url),
        ("gateway.token_refresh_url", &config.gateway.token_refresh_url),
    ] {
        let v = value.trim();
        if v.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        } else if !v.starts_with("http://") && !v.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("{key} must start with http:// or https://, got `{v}`"),
            });
        }
    }

    if config.gateway.conversation_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.conversation_limit must be at least 1".to_string(),
        });
    }

    if config.gateway.page_size == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.page_size must be at least 1".to_string(),
        });
    }

    if config.gateway.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
