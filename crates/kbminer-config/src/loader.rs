// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./kbminer.toml` > `~/.config/kbminer/kbminer.toml` >
//! `/etc/kbminer/kbminer.toml`, the legacy unprefixed environment names
//! (`DB_USER`, `AI_KEY`, `GLPI_URL`, ...) and `KBMINER_` prefixed overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KbMinerConfig;

const ENV_PREFIX: &str = "KBMINER_";

/// Settings read from the environment as-is, never parsed into numbers,
/// booleans, or arrays.
const TEXT_KEYS: &[&str] = &[
    "database.host",
    "database.user",
    "database.password",
    "database.name",
    "ai.api_key",
    "ai.url",
    "ai.model",
    "ai.site_url",
    "glpi.url",
    "glpi.app_token",
    "glpi.user_token",
    "history.path",
    "miner.log_level",
];

/// Legacy environment variable names and the config keys they feed.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("db_user", "database.user"),
    ("db_pass", "database.password"),
    ("db_name", "database.name"),
    ("db_host", "database.host"),
    ("db_port", "database.port"),
    ("ai_key", "ai.api_key"),
    ("ai_url", "ai.url"),
    ("ai_model", "ai.model"),
    ("ai_site", "ai.site_url"),
    ("glpi_url", "glpi.url"),
    ("glpi_app_token", "glpi.app_token"),
    ("glpi_user_token", "glpi.user_token"),
    ("history_file", "history.path"),
];

/// Load `.env` from the working directory into the process environment.
///
/// Variables already set in the environment win. A missing file is not an error.
/// This runs before logging is initialized, so a file that cannot be read or
/// parsed is returned as a warning for the caller to print.
pub fn load_dotenv() -> Option<String> {
    match dotenv::dotenv() {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!("ignoring unreadable .env file: {e}")),
    }
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/kbminer/kbminer.toml` (system-wide)
/// 3. `~/.config/kbminer/kbminer.toml` (user XDG config)
/// 4. `./kbminer.toml` (local directory)
/// 5. Legacy environment names (`DB_USER`, `GLPI_URL`, ...)
/// 6. `KBMINER_*` environment variables
pub fn load_config() -> Result<KbMinerConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no environment).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<KbMinerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KbMinerConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<KbMinerConfig, figment::Error> {
    let figment = Figment::new()
        .merge(Serialized::defaults(KbMinerConfig::default()))
        .merge(Toml::file(path));
    merge_env_layers(figment).extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    let figment = Figment::new()
        .merge(Serialized::defaults(KbMinerConfig::default()))
        .merge(Toml::file("/etc/kbminer/kbminer.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("kbminer/kbminer.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("kbminer.toml"));
    merge_env_layers(figment)
}

/// Merge the legacy names, then the `KBMINER_` names, over `figment`.
///
/// Text settings are taken verbatim from the environment. `Env` parses
/// values, which would turn `DB_PASS=0123456` into the integer 123456 and
/// reject a token such as `[abc]`; only numeric and list settings go
/// through it.
fn merge_env_layers(figment: Figment) -> Figment {
    let figment = figment.merge(legacy_env_provider());
    let figment = merge_raw(figment, raw_env_values(|name| {
        legacy_key(name).map(str::to_string)
    }));
    let figment = figment.merge(env_provider());
    merge_raw(figment, raw_env_values(prefixed_key))
}

fn merge_raw(figment: Figment, values: Vec<(String, String)>) -> Figment {
    values
        .into_iter()
        .fold(figment, |figment, (key, value)| {
            figment.merge(Serialized::default(&key, value))
        })
}

/// Text settings whose environment values are never parsed.
fn is_text_key(key: &str) -> bool {
    TEXT_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// `(config key, raw value)` for every text setting `map` recognizes.
fn raw_env_values(map: impl Fn(&str) -> Option<String>) -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| {
            let key = map(name.to_str()?)?.to_ascii_lowercase();
            let value = value.into_string().ok()?;
            is_text_key(&key).then_some((key, value))
        })
        .collect()
}

/// Maps a legacy variable name, in any case, to its config key.
fn legacy_key(name: &str) -> Option<&'static str> {
    LEGACY_ENV_KEYS
        .iter()
        .find(|(env, _)| env.eq_ignore_ascii_case(name))
        .map(|(_, key)| *key)
}

/// Maps `KBMINER_GLPI_APP_TOKEN` to `glpi.app_token`.
///
/// Section names are single words, so only the first underscore after the
/// prefix is a separator.
fn prefixed_key(name: &str) -> Option<String> {
    let (prefix, rest) = name.split_at_checked(ENV_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(ENV_PREFIX) {
        return None;
    }
    let (section, field) = rest.split_once('_')?;
    Some(format!("{section}.{field}").to_ascii_lowercase())
}

/// Unprefixed variables used by existing deployments' `.env` files.
/// Text settings are left to [`raw_env_values`].
fn legacy_env_provider() -> Env {
    Env::raw().filter_map(|key| {
        legacy_key(key.as_str())
            .filter(|k| !is_text_key(k))
            .map(Into::into)
    })
}

/// Create the `KBMINER_` provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `KBMINER_MINER_TICKET_LIMIT` must map to `miner.ticket_limit`.
/// Text settings are left to [`raw_env_values`].
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .map(|key| match key.as_str().split_once('_') {
            Some((section, field)) => format!("{section}.{field}").into(),
            None => key.as_str().to_string().into(),
        })
        .filter(|key| !is_text_key(key.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_only() -> Result<KbMinerConfig, figment::Error> {
        merge_env_layers(Figment::new().merge(Serialized::defaults(KbMinerConfig::default())))
            .extract()
    }

    #[test]
    fn prefixed_names_map_to_sections() {
        assert_eq!(
            prefixed_key("KBMINER_GLPI_APP_TOKEN").as_deref(),
            Some("glpi.app_token")
        );
        assert_eq!(
            prefixed_key("kbminer_database_password").as_deref(),
            Some("database.password")
        );
        assert_eq!(prefixed_key("KBMINER_"), None);
        assert_eq!(prefixed_key("DB_PASS"), None);
        assert_eq!(prefixed_key("K"), None);
    }

    #[test]
    fn leading_zero_password_is_kept_verbatim() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DB_PASS", "0123456");
            jail.set_env("KBMINER_GLPI_USER_TOKEN", "000987");

            let config = env_only()?;
            assert_eq!(config.database.password.as_deref(), Some("0123456"));
            assert_eq!(config.glpi.user_token.as_deref(), Some("000987"));
            Ok(())
        });
    }

    #[test]
    fn bracketed_token_does_not_break_loading() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GLPI_APP_TOKEN", "[abc]");
            jail.set_env("AI_KEY", "{sk-or-v1-x}");
            jail.set_env("DB_USER", "true");

            let config = env_only()?;
            assert_eq!(config.glpi.app_token.as_deref(), Some("[abc]"));
            assert_eq!(config.ai.api_key.as_deref(), Some("{sk-or-v1-x}"));
            assert_eq!(config.database.user.as_deref(), Some("true"));
            Ok(())
        });
    }

    #[test]
    fn numeric_settings_are_still_parsed() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DB_PORT", "3307");
            jail.set_env("KBMINER_MINER_TICKET_DELAY_SECS", "0");

            let config = env_only()?;
            assert_eq!(config.database.port, 3307);
            assert_eq!(config.miner.ticket_delay_secs, 0);
            Ok(())
        });
    }

    #[test]
    fn malformed_dotenv_is_reported_to_the_caller() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(".env", "this line has no equals sign\n")?;

            let warning = load_dotenv().expect("parse failure should be reported");
            assert!(warning.starts_with("ignoring unreadable .env file"), "got: {warning}");
            Ok(())
        });
    }

    #[test]
    fn legacy_names_map_to_sections() {
        assert_eq!(legacy_key("db_pass"), Some("database.password"));
        assert_eq!(legacy_key("glpi_user_token"), Some("glpi.user_token"));
        assert_eq!(legacy_key("ai_site"), Some("ai.site_url"));
        assert_eq!(legacy_key("DB_HOST"), Some("database.host"));
        assert_eq!(legacy_key("path"), None);
    }

    #[test]
    fn legacy_environment_feeds_config() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DB_USER", "glpi_reader");
            jail.set_env("DB_PASS", "123456");
            jail.set_env("GLPI_URL", "https://helpdesk.example.com/apirest.php");
            jail.set_env("AI_MODEL", "deepseek/deepseek-r1");

            let config = env_only()?;

            assert_eq!(config.database.user.as_deref(), Some("glpi_reader"));
            assert_eq!(config.database.password.as_deref(), Some("123456"));
            assert_eq!(
                config.glpi.url.as_deref(),
                Some("https://helpdesk.example.com/apirest.php")
            );
            assert_eq!(config.ai.model.as_deref(), Some("deepseek/deepseek-r1"));
            Ok(())
        });
    }

    #[test]
    fn prefixed_environment_overrides_legacy() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GLPI_APP_TOKEN", "legacy");
            jail.set_env("KBMINER_GLPI_APP_TOKEN", "prefixed");
            jail.set_env("KBMINER_MINER_TICKET_LIMIT", "25");

            let config = env_only()?;

            assert_eq!(config.glpi.app_token.as_deref(), Some("prefixed"));
            assert_eq!(config.miner.ticket_limit, 25);
            Ok(())
        });
    }

    #[test]
    fn file_values_are_overridden_by_environment() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[history]
path = "/var/lib/kbminer/history.txt"

[database]
host = "db.internal"
"#,
            )?;
            jail.set_env("DB_HOST", "10.0.0.5");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.history.path, "/var/lib/kbminer/history.txt");
            assert_eq!(config.database.host, "10.0.0.5");
            Ok(())
        });
    }
}
