// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Only structural values are checked. Credentials stay optional: a missing
//! database password or API token shows up as a connection or login failure.

use crate::diagnostic::ConfigError;
use crate::model::KbMinerConfig;

/// Validate a deserialized configuration.
///
/// Collects every problem instead of failing fast.
pub fn validate_config(config: &KbMinerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.miner.ticket_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "miner.ticket_limit must be at least 1".to_string(),
        });
    }

    if config
        .miner
        .excluded_title_patterns
        .iter()
        .any(|p| p.is_empty())
    {
        errors.push(ConfigError::Validation {
            message: "miner.excluded_title_patterns must not contain empty strings".to_string(),
        });
    }

    if config.history.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "history.path must not be empty".to_string(),
        });
    }

    if config.database.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "database.host must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.ai.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "ai.temperature must be between 0 and 2, got {}",
                config.ai.temperature
            ),
        });
    }

    check_url("ai.url", Some(&config.ai.url), &mut errors);
    check_url("glpi.url", config.glpi.url.as_deref(), &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(key: &str, value: Option<&str>, errors: &mut Vec<ConfigError>) {
    let Some(value) = value else {
        return;
    };
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ConfigError::Validation {
            message: format!("{key} must use http or https, got `{}`", url.scheme()),
        }),
        Err(e) => errors.push(ConfigError::Validation {
            message: format!("{key} `{value}` is not a valid URL: {e}"),
        }),
    }
}
